use clap::Parser;

use super::parsers::parse_header;
use super::types::OutputFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bounded-concurrency HTTP load generator: fires a fixed number of requests with at most N in flight and reports latency, status-code and error statistics."
)]
pub struct TesterArgs {
    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', visible_short_alias = 'm', default_value = "GET")]
    pub method: String,

    /// Request header in 'name:value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<String>,

    /// Request body, sent as a JSON string value
    #[arg(long, short)]
    pub body: Option<String>,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[arg(long, short, default_value = "10", allow_negative_numbers = true)]
    pub timeout: i64,

    /// Total number of measured requests
    #[arg(
        long,
        short = 'r',
        visible_short_alias = 'n',
        default_value = "1",
        allow_negative_numbers = true
    )]
    pub requests: i64,

    /// Maximum number of requests in flight at once
    #[arg(long, short, default_value = "1", allow_negative_numbers = true)]
    pub concurrency: i64,

    /// Unmeasured sequential requests sent before the test starts
    #[arg(long, short, default_value = "0", allow_negative_numbers = true)]
    pub warmup: i64,

    /// Path to config file (TOML/JSON). Defaults to ./volley.toml or ./volley.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Report format written to stdout
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,
}
