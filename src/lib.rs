//! Core library for the `volley` CLI.
//!
//! `volley` fires a fixed number of HTTP requests at one endpoint with at most
//! `concurrency` calls in flight, after an optional unmeasured warmup, and
//! reports latency, status-code, and error statistics. The library exposes
//! the pieces the binary is built from: argument and config handling, the
//! request builder and dispatcher, and the outcome aggregator.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;

mod app;
mod entry;
mod system;

pub use entry::run;
