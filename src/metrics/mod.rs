//! Call outcomes, latency accumulation, and single-consumer aggregation.
mod aggregator;
mod histogram;
mod latency;
mod types;


pub use aggregator::{Aggregator, setup_outcome_collector};
pub use histogram::LatencyHistogram;
pub use latency::LatencyStats;
pub use types::{CallOutcome, Summary};
