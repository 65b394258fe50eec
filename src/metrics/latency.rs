use std::time::Duration;

/// Running min/max/sum/count over successful call latencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    min: Option<Duration>,
    max: Duration,
    sum: Duration,
    count: u64,
}

impl LatencyStats {
    pub fn add(&mut self, elapsed: Duration) {
        self.count = self.count.saturating_add(1);
        self.sum = self.sum.saturating_add(elapsed);
        self.min = Some(self.min.map_or(elapsed, |min| min.min(elapsed)));
        self.max = self.max.max(elapsed);
    }

    #[must_use]
    pub fn min(&self) -> Duration {
        self.min.unwrap_or(Duration::ZERO)
    }

    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Mean latency, or zero when nothing was recorded.
    #[must_use]
    pub fn average(&self) -> Duration {
        let nanos = self
            .sum
            .as_nanos()
            .checked_div(u128::from(self.count))
            .unwrap_or(0);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}
