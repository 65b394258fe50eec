use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::error::AppResult;
use crate::metrics::Summary;

/// Divisor for fixed-point values scaled by 100.
const PERCENT_DIVISOR: u64 = 100;

/// Report document written by `--output-format json`. Durations are in
/// microseconds; the request rate is fixed-point, scaled by 100.
#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    total_requests: u64,
    succeeded: u64,
    errored: u64,
    total_time_us: u64,
    requests_per_second_x100: u64,
    latency_us: LatencyReport,
    statuses: BTreeMap<String, u64>,
    errors: &'a BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
struct LatencyReport {
    min: u64,
    average: u64,
    max: u64,
    p50: u64,
    p90: u64,
    p99: u64,
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Completed requests per second, scaled by 100.
fn requests_per_second_x100(summary: &Summary) -> u64 {
    let total = summary.total_requests();
    let elapsed_us = summary.total_time.as_micros();
    if total == 0 || elapsed_us == 0 {
        return 0;
    }
    let scaled = u128::from(total)
        .saturating_mul(100_000_000)
        .checked_div(elapsed_us)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

pub(crate) fn summary_lines(summary: &Summary) -> Vec<String> {
    let rps_x100 = requests_per_second_x100(summary);
    let mut lines = vec![
        "Results:".to_owned(),
        format!("  Total Requests: {}", summary.total_requests()),
        format!("  Succeeded:      {}", summary.succeeded()),
        format!("  Errored:        {}", summary.errored()),
        format!("  Total Time:     {:.2?}", summary.total_time),
        format!(
            "  Requests/sec:   {}.{:02}",
            rps_x100 / PERCENT_DIVISOR,
            rps_x100 % PERCENT_DIVISOR
        ),
        String::new(),
        "Status Codes:".to_owned(),
    ];

    if summary.statuses.is_empty() {
        lines.push("  (none)".to_owned());
    }
    for (status, count) in &summary.statuses {
        lines.push(format!("  [{}] {} responses", status, count));
    }

    lines.push(String::new());
    lines.push("Latency (successful requests):".to_owned());
    lines.push(format!("  Min:     {:.2?}", summary.min));
    lines.push(format!("  Average: {:.2?}", summary.average));
    lines.push(format!("  Max:     {:.2?}", summary.max));
    lines.push(format!(
        "  P50/P90/P99: {:.2?} / {:.2?} / {:.2?}",
        summary.p50, summary.p90, summary.p99
    ));

    if !summary.errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_owned());
        for (description, count) in &summary.errors {
            lines.push(format!("  [{}] {}", count, description));
        }
    }

    lines
}

#[must_use]
pub(crate) fn render_text(summary: &Summary) -> String {
    summary_lines(summary).join("\n")
}

/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub(crate) fn render_json(summary: &Summary) -> AppResult<String> {
    let report = SummaryReport {
        total_requests: summary.total_requests(),
        succeeded: summary.succeeded(),
        errored: summary.errored(),
        total_time_us: micros(summary.total_time),
        requests_per_second_x100: requests_per_second_x100(summary),
        latency_us: LatencyReport {
            min: micros(summary.min),
            average: micros(summary.average),
            max: micros(summary.max),
            p50: micros(summary.p50),
            p90: micros(summary.p90),
            p99: micros(summary.p99),
        },
        statuses: summary
            .statuses
            .iter()
            .map(|(status, count)| (status.to_string(), *count))
            .collect(),
        errors: &summary.errors,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
