use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::{RunConfig, clamp_concurrency};
use crate::error::AppResult;
use crate::metrics::{CallOutcome, Summary, setup_outcome_collector};
use crate::shutdown::{ShutdownReceiver, ShutdownSender};

use super::{HttpSender, RequestSource};

/// Drives one run: sequential warmup calls, then the measured calls with at
/// most `concurrency` in flight.
///
/// Each measured call is admitted by taking a semaphore permit, sent from its
/// own task, and reported to a single outcome collector. The permit travels
/// with the task and is released when the task ends, whether the call
/// succeeded, failed, or the task panicked.
pub struct Dispatcher<S> {
    sender: Arc<S>,
    shutdown_tx: ShutdownSender,
}

impl<S> Dispatcher<S>
where
    S: HttpSender + 'static,
{
    #[must_use]
    pub fn new(sender: Arc<S>, shutdown_tx: &ShutdownSender) -> Self {
        Self {
            sender,
            shutdown_tx: shutdown_tx.clone(),
        }
    }

    /// Runs warmup and the measured phase using requests built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the outcome collector task fails.
    pub async fn run(&self, config: &RunConfig) -> AppResult<Summary> {
        let mut source = config;
        self.run_with_source(config, &mut source).await
    }

    /// Same as [`run`](Self::run) but takes requests from `source`.
    ///
    /// Iterations whose request cannot be built are skipped with a warning
    /// and do not count toward the summary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the outcome collector task fails.
    pub async fn run_with_source<R>(&self, config: &RunConfig, source: &mut R) -> AppResult<Summary>
    where
        R: RequestSource,
    {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let mut interrupted = false;
        if config.warmup > 0 {
            info!("Warming up...");
            interrupted = self.warmup(config, source, &mut shutdown_rx).await;
            if !interrupted {
                info!("Warmup complete");
            }
        }

        if interrupted {
            info!("Interrupted during warmup; skipping measured requests");
        } else {
            info!("Starting load test...");
        }
        self.measure(config, source, &mut shutdown_rx, interrupted)
            .await
    }

    /// Sends warmup calls one at a time and discards their outcomes.
    /// Returns `true` if shutdown was requested.
    async fn warmup<R>(
        &self,
        config: &RunConfig,
        source: &mut R,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> bool
    where
        R: RequestSource,
    {
        for iteration in 0..config.warmup {
            let request = match source.next_request() {
                Ok(request) => request,
                Err(err) => {
                    warn!("Skipping warmup request {}: {}", iteration, err);
                    continue;
                }
            };

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => return true,
                result = self.sender.send(request, config.timeout) => {
                    if let Err(err) = result {
                        debug!("Warmup request {} failed: {}", iteration, err);
                    }
                }
            }
        }
        false
    }

    async fn measure<R>(
        &self,
        config: &RunConfig,
        source: &mut R,
        shutdown_rx: &mut ShutdownReceiver,
        skip: bool,
    ) -> AppResult<Summary>
    where
        R: RequestSource,
    {
        let concurrency = clamp_concurrency(config.concurrency, config.requests);
        let permits = Arc::new(Semaphore::new(concurrency));
        let (outcome_tx, outcome_rx) = mpsc::channel::<CallOutcome>(concurrency);
        let collector = setup_outcome_collector(outcome_rx);
        let mut workers = JoinSet::new();
        let mut started: Option<Instant> = None;

        let planned = if skip { 0 } else { config.requests };
        for iteration in 0..planned {
            let request = match source.next_request() {
                Ok(request) => request,
                Err(err) => {
                    warn!("Skipping request {}: {}", iteration, err);
                    continue;
                }
            };

            let permit = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Shutdown requested; waiting for in-flight requests");
                    break;
                }
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(err) => {
                        error!("Admission closed unexpectedly: {}", err);
                        break;
                    }
                },
            };
            if started.is_none() {
                started = Some(Instant::now());
            }

            let sender = Arc::clone(&self.sender);
            let outcome_tx = outcome_tx.clone();
            let timeout = config.timeout;
            workers.spawn(async move {
                let call_start = Instant::now();
                let result = sender.send(request, timeout).await;
                let outcome = CallOutcome {
                    result,
                    elapsed: call_start.elapsed(),
                };
                if outcome_tx.send(outcome).await.is_err() {
                    debug!("Outcome collector closed before request {} reported", iteration);
                }
                drop(permit);
            });
        }

        drop(outcome_tx);
        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                error!("Request worker failed: {}", err);
            }
        }
        let total_time = started.map_or(Duration::ZERO, |start| start.elapsed());

        let aggregator = collector.await?;
        Ok(aggregator.finish(total_time))
    }
}
