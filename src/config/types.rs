use serde::Deserialize;

use crate::args::OutputFormat;

/// On-disk configuration. Every field is optional; values given on the
/// command line take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<Vec<String>>,
    pub body: Option<String>,
    pub timeout: Option<i64>,
    pub requests: Option<i64>,
    #[serde(alias = "connections")]
    pub concurrency: Option<i64>,
    pub warmup: Option<i64>,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}
