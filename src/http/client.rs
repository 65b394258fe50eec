use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, CallError, HttpError};

use super::OutboundRequest;

/// The transport capability the dispatcher drives.
///
/// Implementations are shared by every worker of a run and must tolerate
/// concurrent calls.
#[async_trait]
pub trait HttpSender: Send + Sync {
    /// Sends one request and returns the response status code.
    ///
    /// # Errors
    ///
    /// Returns a [`CallError`] when the call times out or fails below HTTP.
    /// Non-2xx responses are not errors.
    async fn send(
        &self,
        request: OutboundRequest,
        timeout: Option<Duration>,
    ) -> Result<u16, CallError>;
}

/// Builds the pooled client shared by all workers of a run.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialized.
pub fn build_client() -> AppResult<Client> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(
        &self,
        request: OutboundRequest,
        timeout: Option<Duration>,
    ) -> Result<u16, CallError> {
        let OutboundRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        drain_response_body(response).await?;
        Ok(status)
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
