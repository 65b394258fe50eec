use http::{
    HeaderMap, Method,
    header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use url::Url;

use crate::config::RunConfig;
use crate::error::HttpError;

/// Content type set on every request, replacing any caller-supplied value.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A fully specified call, ready to hand to an [`HttpSender`](super::HttpSender).
///
/// Built fresh for every call and moved into the worker that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Produces the request for each iteration of a run.
pub trait RequestSource {
    /// Builds the next request.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be built; the dispatcher
    /// skips that iteration.
    fn next_request(&mut self) -> Result<OutboundRequest, HttpError>;
}

impl RequestSource for &RunConfig {
    fn next_request(&mut self) -> Result<OutboundRequest, HttpError> {
        build_request(self)
    }
}

/// Builds one outbound request from the run configuration.
///
/// The body, when present, is sent as a JSON string literal (the configured
/// text quoted and escaped, not parsed). Headers are applied in order, each
/// split on its first `:`, so a later entry replaces an earlier one with the
/// same name; `Content-Type: application/json` is applied last.
///
/// # Errors
///
/// Returns an error for an invalid method or URL, and for a header entry
/// that has no `:`, an empty or invalid name, or an invalid value. Entries are
/// not repaired: the whole build fails and the caller skips the iteration.
pub fn build_request(config: &RunConfig) -> Result<OutboundRequest, HttpError> {
    let method =
        Method::from_bytes(config.method.as_bytes()).map_err(|err| HttpError::InvalidMethod {
            method: config.method.clone(),
            source: err,
        })?;
    let url = Url::parse(&config.url).map_err(|err| HttpError::InvalidUrl {
        url: config.url.clone(),
        source: err,
    })?;
    let body = config
        .body
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|err| HttpError::SerializeBody { source: err })?;

    let mut headers = HeaderMap::with_capacity(config.headers.len().saturating_add(1));
    for raw in &config.headers {
        let (name, value) = split_header(raw)?;
        headers.insert(name, value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

    Ok(OutboundRequest {
        method,
        url,
        headers,
        body,
    })
}

fn split_header(raw: &str) -> Result<(HeaderName, HeaderValue), HttpError> {
    let malformed = || HttpError::MalformedHeader {
        header: raw.to_owned(),
    };
    let (name, value) = raw.split_once(':').ok_or_else(malformed)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(malformed());
    }
    let name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|err| HttpError::InvalidHeaderName {
            header: raw.to_owned(),
            source: err,
        })?;
    let value = HeaderValue::from_str(value.trim()).map_err(|err| HttpError::InvalidHeaderValue {
        header: raw.to_owned(),
        source: err,
    })?;
    Ok((name, value))
}
