use super::{apply_config, load_config, load_config_file, types::DurationValue};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{AggregatorArgs, OutputFormat};

fn parse_with_config(
    cli: &[&str],
    config: &super::types::ConfigFile,
) -> Result<AggregatorArgs, String> {
    let matches = AggregatorArgs::command()
        .try_get_matches_from(cli)
        .map_err(|err| format!("parse failed: {}", err))?;
    let mut args = AggregatorArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from matches failed: {}", err))?;
    apply_config(&mut args, &matches, config).map_err(|err| err.to_string())?;
    Ok(args)
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadtally.toml");
    let content = r#"
input = "outcomes.jsonl"
interval = "500ms"
report_interval = 5
inbound_capacity = 64
failures_out = "failures.jsonl"
output_format = "json"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.input.as_deref() != Some("outcomes.jsonl") {
        return Err("Unexpected input".to_owned());
    }
    let interval = config
        .interval
        .as_ref()
        .ok_or_else(|| "Expected interval".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if interval != Duration::from_millis(500) {
        return Err(format!("Unexpected interval {:?}", interval));
    }
    if !matches!(config.report_interval, Some(DurationValue::Seconds(5))) {
        return Err("Expected report_interval seconds".to_owned());
    }
    if config.inbound_capacity != Some(64) {
        return Err("Unexpected inbound_capacity".to_owned());
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err("Unexpected output_format".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadtally.json");
    let content = r#"{"interval": "2s", "failure_capacity": 4, "no_color": true}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config(path.to_str()).map_err(|err| err.to_string())?;
    let config = config.ok_or_else(|| "Expected config".to_owned())?;
    if config.failure_capacity != Some(4) || config.no_color != Some(true) {
        return Err(format!("Unexpected config {:?}", config));
    }
    Ok(())
}

#[test]
fn rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadtally.yaml");
    std::fs::write(&path, "interval: 1s").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Ok(_) => Err("Expected unsupported extension error".to_owned()),
        Err(err) if err.to_string().contains("yaml") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn config_fills_values_not_set_on_cli() -> Result<(), String> {
    let config = super::types::ConfigFile {
        input: Some("from-config.jsonl".to_owned()),
        interval: Some(DurationValue::Text("250ms".to_owned())),
        report_interval: Some(DurationValue::Seconds(3)),
        inbound_capacity: Some(16),
        failure_capacity: Some(8),
        failures_out: Some("failures.jsonl".to_owned()),
        output_format: Some(OutputFormat::Json),
        verbose: Some(true),
        no_color: Some(true),
    };
    let args = parse_with_config(&["loadtally", "--interval", "2s"], &config)?;

    if args.interval != Duration::from_secs(2) {
        return Err(format!("CLI interval should win, got {:?}", args.interval));
    }
    if args.input != "from-config.jsonl" {
        return Err(format!("Unexpected input {}", args.input));
    }
    if args.report_interval != Some(Duration::from_secs(3)) {
        return Err("Unexpected report_interval".to_owned());
    }
    if args.inbound_capacity.get() != 16 || args.failure_capacity.get() != 8 {
        return Err("Unexpected capacities".to_owned());
    }
    if args.failures_out.as_deref() != Some("failures.jsonl") {
        return Err("Unexpected failures_out".to_owned());
    }
    if args.output_format != OutputFormat::Json || !args.verbose || !args.no_color {
        return Err("Unexpected output/logging flags".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_zero_capacity() -> Result<(), String> {
    let config = super::types::ConfigFile {
        inbound_capacity: Some(0),
        ..Default::default()
    };
    match parse_with_config(&["loadtally"], &config) {
        Ok(_) => Err("Expected zero capacity to be rejected".to_owned()),
        Err(err) if err.contains("inbound_capacity") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn config_rejects_zero_interval() -> Result<(), String> {
    let config = super::types::ConfigFile {
        interval: Some(DurationValue::Seconds(0)),
        ..Default::default()
    };
    match parse_with_config(&["loadtally"], &config) {
        Ok(_) => Err("Expected zero interval to be rejected".to_owned()),
        Err(err) if err.contains("interval") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}
