use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{AggregatorArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Options given explicitly on
/// the command line always win.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut AggregatorArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "input")
        && let Some(input) = config.input.clone()
    {
        args.input = input;
    }

    if !is_cli(matches, "interval")
        && let Some(interval) = config.interval.as_ref()
    {
        args.interval = ensure_duration(interval, "interval")?;
    }

    if !is_cli(matches, "report_interval")
        && let Some(report_interval) = config.report_interval.as_ref()
    {
        args.report_interval = Some(ensure_duration(report_interval, "report_interval")?);
    }

    if !is_cli(matches, "inbound_capacity")
        && let Some(capacity) = config.inbound_capacity
    {
        args.inbound_capacity = ensure_positive_usize(capacity, "inbound_capacity")?;
    }

    if !is_cli(matches, "failure_capacity")
        && let Some(capacity) = config.failure_capacity
    {
        args.failure_capacity = ensure_positive_usize(capacity, "failure_capacity")?;
    }

    if !is_cli(matches, "failures_out")
        && let Some(path) = config.failures_out.clone()
    {
        args.failures_out = Some(path);
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_duration(value: &DurationValue, field: &str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}
