use std::time::Duration;

use tokio::sync::Semaphore;
use url::Url;

use crate::args::TesterArgs;
use crate::error::{AppError, AppResult, ValidationError};

/// Validated, read-only configuration for one load-test run.
///
/// Numeric fields are already clamped: `requests` and `concurrency` are at
/// least one, `concurrency` is at most `requests`, `warmup` is at least zero,
/// and a non-positive timeout becomes `None` (no timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub url: String,
    pub method: String,
    /// Raw `name:value` entries, split when each request is built.
    pub headers: Vec<String>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    pub requests: usize,
    pub concurrency: usize,
    pub warmup: usize,
}

impl RunConfig {
    /// Builds the run configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing, is not an absolute http(s)
    /// URL, or when the method is not a valid HTTP token.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = validate_url(raw_url)?;
        let method = validate_method(&args.method)?;
        let requests = clamp_count(args.requests, 1);

        Ok(Self {
            url: url.to_string(),
            method,
            headers: args.headers.clone(),
            body: args.body.clone().filter(|body| !body.is_empty()),
            timeout: clamp_timeout(args.timeout),
            requests,
            concurrency: clamp_concurrency(clamp_count(args.concurrency, 1), requests),
            warmup: clamp_count(args.warmup, 0),
        })
    }
}

fn validate_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(ValidationError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
        }));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlWithoutHost {
            url: raw.to_owned(),
        }));
    }
    Ok(url)
}

fn validate_method(raw: &str) -> AppResult<String> {
    let normalized = raw.trim().to_ascii_uppercase();
    http::Method::from_bytes(normalized.as_bytes()).map_err(|err| {
        AppError::validation(ValidationError::InvalidMethod {
            method: raw.to_owned(),
            source: err,
        })
    })?;
    Ok(normalized)
}

pub(super) fn clamp_count(value: i64, min: i64) -> usize {
    usize::try_from(value.max(min)).unwrap_or(usize::MAX)
}

/// Admission limit for a run: never more permits than requests, and never
/// above what a tokio semaphore can hold.
#[must_use]
pub fn clamp_concurrency(concurrency: usize, requests: usize) -> usize {
    concurrency
        .min(requests.max(1))
        .clamp(1, Semaphore::MAX_PERMITS)
}

pub(super) fn clamp_timeout(seconds: i64) -> Option<Duration> {
    u64::try_from(seconds)
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
