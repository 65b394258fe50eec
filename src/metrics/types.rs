use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::CallError;

/// Terminal result of one dispatched call, paired with its elapsed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    pub result: Result<u16, CallError>,
    pub elapsed: Duration,
}

impl CallOutcome {
    #[must_use]
    pub const fn status(status_code: u16, elapsed: Duration) -> Self {
        Self {
            result: Ok(status_code),
            elapsed,
        }
    }

    #[must_use]
    pub const fn error(error: CallError, elapsed: Duration) -> Self {
        Self {
            result: Err(error),
            elapsed,
        }
    }
}

/// Final statistics of a measured run. Latency fields cover successful calls
/// only; failed calls are counted in `errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub min: Duration,
    pub max: Duration,
    pub average: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
    pub statuses: BTreeMap<u16, u64>,
    pub errors: BTreeMap<String, u64>,
    pub total_time: Duration,
}

impl Summary {
    /// Calls that produced a status code, whatever the code was.
    #[must_use]
    pub fn succeeded(&self) -> u64 {
        self.statuses
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    #[must_use]
    pub fn errored(&self) -> u64 {
        self.errors
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.succeeded().saturating_add(self.errored())
    }
}
