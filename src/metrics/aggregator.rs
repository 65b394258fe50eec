use std::collections::BTreeMap;
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use super::{CallOutcome, LatencyHistogram, LatencyStats, Summary};

/// Running statistics for one measured run.
///
/// Owned by a single consumer; outcomes from concurrent workers reach it
/// through a channel, so none of its state is shared.
#[derive(Debug)]
pub struct Aggregator {
    latency: LatencyStats,
    statuses: BTreeMap<u16, u64>,
    errors: BTreeMap<String, u64>,
    histogram: Option<LatencyHistogram>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Failed to initialize latency histogram: {}", err);
                None
            }
        };

        Self {
            latency: LatencyStats::default(),
            statuses: BTreeMap::new(),
            errors: BTreeMap::new(),
            histogram,
        }
    }

    /// Folds one outcome into the running statistics. Failed calls are
    /// counted by description and stay out of the latency figures.
    pub fn consume(&mut self, outcome: CallOutcome) {
        match outcome.result {
            Ok(status) => {
                increment(self.statuses.entry(status).or_default());
                self.latency.add(outcome.elapsed);
                if let Some(histogram) = self.histogram.as_mut() {
                    let micros = u64::try_from(outcome.elapsed.as_micros()).unwrap_or(u64::MAX);
                    if let Err(err) = histogram.record(micros) {
                        debug!("Dropping latency sample from histogram: {}", err);
                    }
                }
            }
            Err(err) => {
                increment(self.errors.entry(err.to_string()).or_default());
            }
        }
    }

    /// Number of outcomes consumed so far, successful or not.
    #[must_use]
    pub fn consumed(&self) -> u64 {
        let errors = self
            .errors
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count));
        self.latency.count().saturating_add(errors)
    }

    #[must_use]
    pub fn finish(self, total_time: Duration) -> Summary {
        let (p50, p90, p99) = self
            .histogram
            .as_ref()
            .map_or((0, 0, 0), LatencyHistogram::percentiles);

        Summary {
            min: self.latency.min(),
            max: self.latency.max(),
            average: self.latency.average(),
            p50: Duration::from_micros(p50),
            p90: Duration::from_micros(p90),
            p99: Duration::from_micros(p99),
            statuses: self.statuses,
            errors: self.errors,
            total_time,
        }
    }
}

fn increment(count: &mut u64) {
    *count = count.saturating_add(1);
}

/// Spawns the single consumer that drains outcomes until every sender is
/// dropped, then hands back the aggregated state.
#[must_use]
pub fn setup_outcome_collector(mut outcome_rx: mpsc::Receiver<CallOutcome>) -> JoinHandle<Aggregator> {
    tokio::spawn(async move {
        let mut aggregator = Aggregator::new();
        while let Some(outcome) = outcome_rx.recv().await {
            aggregator.consume(outcome);
        }
        debug!("Outcome channel closed after {} outcomes", aggregator.consumed());
        aggregator
    })
}
