use thiserror::Error;

/// Terminal failure of a single dispatched call.
///
/// The `Display` output is the key under which the failure is counted in the
/// run summary, so variants keep their text short and stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("timeout")]
    Timeout,
    #[error("connect: {message}")]
    Connect { message: String },
    #[error("request: {message}")]
    Request { message: String },
}

impl From<reqwest::Error> for CallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return CallError::Timeout;
        }
        let connect = err.is_connect();
        let message = describe(&err.without_url());
        if connect {
            CallError::Connect { message }
        } else {
            CallError::Request { message }
        }
    }
}

fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
