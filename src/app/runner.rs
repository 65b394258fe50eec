use std::sync::Arc;

use tracing::{error, info};

use crate::{
    args::{OutputFormat, TesterArgs},
    config::RunConfig,
    error::AppResult,
    http::{Dispatcher, ReqwestSender, build_client},
    metrics::Summary,
    shutdown::{setup_signal_shutdown_handler, shutdown_channel},
};

use super::summary;

/// Runs one load test from parsed arguments and prints the report to stdout.
pub(crate) async fn run_local(args: &TesterArgs) -> AppResult<Summary> {
    let config = RunConfig::from_args(args).inspect_err(|err| {
        error!("Invalid run configuration: {}", err);
    })?;
    let client = build_client().inspect_err(|err| {
        error!("Failed to set up HTTP client: {}", err);
    })?;

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let dispatcher = Dispatcher::new(Arc::new(ReqwestSender::new(client)), &shutdown_tx);
    let result = dispatcher.run(&config).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        error!("Signal handler task failed: {}", err);
    }

    let summary = result?;
    match args.output_format {
        OutputFormat::Text => println!("{}", summary::render_text(&summary)),
        OutputFormat::Json => println!("{}", summary::render_json(&summary)?),
    }
    info!("Finished");
    Ok(summary)
}
