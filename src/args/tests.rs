use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult};

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["volley", "-u", "http://localhost"])?;

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.method == "GET", "Expected GET method"),
        (args.headers.is_empty(), "Expected no headers"),
        (args.body.is_none(), "Expected body to be None"),
        (args.timeout == 10, "Unexpected timeout"),
        (args.requests == 1, "Unexpected requests"),
        (args.concurrency == 1, "Unexpected concurrency"),
        (args.warmup == 0, "Unexpected warmup"),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (
            args.output_format == OutputFormat::Text,
            "Expected text output",
        ),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }

    Ok(())
}

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args([
        "volley",
        "-u",
        "http://localhost:8080",
        "-r",
        "1000",
        "-c",
        "10",
        "-w",
        "5",
        "-m",
        "POST",
        "-b",
        "hello",
        "-t",
        "3",
        "-H",
        "Authorization:Bearer token",
        "-H",
        "x-correlation-id:123",
    ])?;

    if args.requests != 1000 || args.concurrency != 10 || args.warmup != 5 {
        return Err(AppError::validation("Unexpected numeric flags"));
    }
    if args.method != "POST" {
        return Err(AppError::validation(format!(
            "Unexpected method: {}",
            args.method
        )));
    }
    if args.body.as_deref() != Some("hello") || args.timeout != 3 {
        return Err(AppError::validation("Unexpected body/timeout"));
    }
    if args.headers != ["Authorization:Bearer token", "x-correlation-id:123"] {
        return Err(AppError::validation(format!(
            "Unexpected headers: {:?}",
            args.headers
        )));
    }
    Ok(())
}

#[test]
fn parse_args_accepts_negative_counts() -> AppResult<()> {
    let args = parse_test_args([
        "volley",
        "-u",
        "http://localhost",
        "--requests",
        "-5",
        "--concurrency",
        "0",
        "--warmup",
        "-1",
        "--timeout",
        "-2",
    ])?;
    if args.requests != -5 || args.concurrency != 0 || args.warmup != -1 || args.timeout != -2 {
        return Err(AppError::validation(
            "Expected raw values to pass through to clamping",
        ));
    }
    Ok(())
}

#[test]
fn parse_args_json_output() -> AppResult<()> {
    let args = parse_test_args([
        "volley",
        "-u",
        "http://localhost",
        "--output-format",
        "json",
    ])?;
    if args.output_format != OutputFormat::Json {
        return Err(AppError::validation("Expected json output format"));
    }
    Ok(())
}

#[test]
fn parse_header_valid() -> AppResult<()> {
    let parsed = parse_header("Content-Type: application/json");
    match parsed {
        Ok(raw) => {
            if raw != "Content-Type: application/json" {
                return Err(AppError::validation(format!("Unexpected header: {}", raw)));
            }
            Ok(())
        }
        Err(err) => Err(AppError::validation(format!(
            "Expected Ok, got Err: {}",
            err
        ))),
    }
}

#[test]
fn parse_header_invalid() -> AppResult<()> {
    for raw in ["MissingDelimiter", ":value", "  :value"] {
        if parse_header(raw).is_ok() {
            return Err(AppError::validation(format!(
                "Expected Err for invalid header: {}",
                raw
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_args_rejects_malformed_header() -> AppResult<()> {
    let result = parse_test_args(["volley", "-u", "http://localhost", "-H", "NoSeparator"]);
    if result.is_ok() {
        return Err(AppError::validation("Expected malformed header to be rejected"));
    }
    Ok(())
}
