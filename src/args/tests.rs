use super::parsers::parse_duration_arg;
use super::*;
use crate::error::{AppError, AppResult};
use clap::Parser;
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = ProbeArgs::try_parse_from(["urlprobe", "http://localhost"])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.url != "http://localhost" {
        return Err(AppError::validation("Unexpected url"));
    }
    if args.retries.get() != 1 {
        return Err(AppError::validation("Expected default retries of 1"));
    }
    if args.timeout != Duration::from_secs(5) {
        return Err(AppError::validation("Expected default timeout of 5s"));
    }
    if args.concurrency.get() != 1 || args.requests.get() != 1 {
        return Err(AppError::validation("Expected default load settings of 1"));
    }
    if args.tui || args.verbose {
        return Err(AppError::validation("Expected tui/verbose to default off"));
    }
    if args.output != OutputFormat::Text {
        return Err(AppError::validation("Expected default output of text"));
    }
    Ok(())
}

#[test]
fn parse_args_load_flags() -> AppResult<()> {
    let args = ProbeArgs::try_parse_from(["urlprobe", "http://localhost", "-n", "20", "-c", "4"])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.requests.get() != 20 {
        return Err(AppError::validation("Unexpected requests"));
    }
    if args.concurrency.get() != 4 {
        return Err(AppError::validation("Unexpected concurrency"));
    }
    Ok(())
}

#[test]
fn parse_args_retries_and_timeout() -> AppResult<()> {
    let args = ProbeArgs::try_parse_from([
        "urlprobe",
        "http://localhost",
        "--retries",
        "3",
        "--timeout",
        "250ms",
    ])
    .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.retries.get() != 3 {
        return Err(AppError::validation("Unexpected retries"));
    }
    if args.timeout != Duration::from_millis(250) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    Ok(())
}

#[test]
fn parse_args_requires_url() -> AppResult<()> {
    if ProbeArgs::try_parse_from(["urlprobe"]).is_ok() {
        return Err(AppError::validation("Expected Err for missing URL"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_counts() -> AppResult<()> {
    if ProbeArgs::try_parse_from(["urlprobe", "http://localhost", "-n", "0"]).is_ok() {
        return Err(AppError::validation("Expected Err for zero requests"));
    }
    if ProbeArgs::try_parse_from(["urlprobe", "http://localhost", "-c", "0"]).is_ok() {
        return Err(AppError::validation("Expected Err for zero concurrency"));
    }
    if ProbeArgs::try_parse_from(["urlprobe", "http://localhost", "-r", "0"]).is_ok() {
        return Err(AppError::validation("Expected Err for zero retries"));
    }
    Ok(())
}

#[test]
fn parse_args_output_json() -> AppResult<()> {
    let args = ProbeArgs::try_parse_from(["urlprobe", "http://localhost", "--output", "JSON"])
        .map_err(|err| AppError::validation(format!("Expected parse success: {}", err)))?;

    if args.output != OutputFormat::Json {
        return Err(AppError::validation("Expected OutputFormat::Json"));
    }
    Ok(())
}

#[test]
fn parse_args_tui_conflicts_with_output() -> AppResult<()> {
    let parsed = ProbeArgs::try_parse_from([
        "urlprobe",
        "http://localhost",
        "--tui",
        "--output",
        "json",
    ]);
    if parsed.is_ok() {
        return Err(AppError::validation("Expected Err for --tui with --output"));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> AppResult<()> {
    if parse_duration_arg("1500ms")? != Duration::from_millis(1500) {
        return Err(AppError::validation("Unexpected ms duration"));
    }
    if parse_duration_arg("2m")? != Duration::from_secs(120) {
        return Err(AppError::validation("Unexpected minutes duration"));
    }
    if parse_duration_arg("30")? != Duration::from_secs(30) {
        return Err(AppError::validation("Expected bare numbers to be seconds"));
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_invalid_input() -> AppResult<()> {
    if parse_duration_arg("abc").is_ok() {
        return Err(AppError::validation("Expected Err for non-numeric duration"));
    }
    if parse_duration_arg("10d").is_ok() {
        return Err(AppError::validation("Expected Err for unknown unit"));
    }
    if parse_duration_arg("0s").is_ok() {
        return Err(AppError::validation("Expected Err for zero duration"));
    }
    Ok(())
}
