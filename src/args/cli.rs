use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_FAILURE_CAPACITY, DEFAULT_INBOUND_CAPACITY, DEFAULT_INTERVAL, STDIN_INPUT,
};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_usize};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Live metrics aggregator for load-test outcomes - windowed rates, lifetime totals, and failure routing."
)]
pub struct AggregatorArgs {
    /// JSON-lines file of classified outcomes ('-' reads stdin)
    #[arg(long = "input", short = 'i', default_value = STDIN_INPUT)]
    pub input: String,

    /// Reporting interval for windowed rates (supports ms/s/m/h)
    #[arg(long = "interval", default_value = DEFAULT_INTERVAL, value_parser = parse_duration_arg)]
    pub interval: Duration,

    /// Print a live summary this often while ingesting (supports ms/s/m/h)
    #[arg(long = "report-interval", value_parser = parse_duration_arg)]
    pub report_interval: Option<Duration>,

    /// Outcomes buffered between the input reader and the aggregator
    #[arg(
        long = "inbound-capacity",
        default_value = DEFAULT_INBOUND_CAPACITY,
        value_parser = parse_positive_usize
    )]
    pub inbound_capacity: PositiveUsize,

    /// Failures buffered between the aggregator and the failure sink
    #[arg(
        long = "failure-capacity",
        default_value = DEFAULT_FAILURE_CAPACITY,
        value_parser = parse_positive_usize
    )]
    pub failure_capacity: PositiveUsize,

    /// Append forwarded failures to this file as JSON lines (logged when unset)
    #[arg(long = "failures-out")]
    pub failures_out: Option<String>,

    /// Final report format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADTALLY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
