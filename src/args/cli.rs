use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_duration_arg, parse_positive_u32, parse_positive_u64, parse_positive_usize,
};
use super::types::{OutputFormat, PositiveU32, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Layered URL diagnostics - concurrent DNS/TCP/TLS/HTTP probes with fixed-count retries and an optional bounded load test."
)]
pub struct ProbeArgs {
    /// Target URL to probe (http or https)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Attempts per network operation (1 = no retry)
    #[arg(
        long,
        short = 'r',
        default_value = "1",
        value_parser = parse_positive_u32
    )]
    pub retries: PositiveU32,

    /// Overall deadline for the entire run (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub timeout: Duration,

    /// Concurrent in-flight requests during the load test
    #[arg(
        long,
        short = 'c',
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Total load-test requests (1 = layer probes only)
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "1",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Render an interactive terminal dashboard instead of plain output
    #[arg(long)]
    pub tui: bool,

    /// Output format for non-interactive runs
    #[arg(
        long,
        default_value = "text",
        ignore_case = true,
        conflicts_with = "tui"
    )]
    pub output: OutputFormat,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
