mod support_cli;

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use support_cli::{ensure_success, run_loadtally};

const OUTCOMES: &str = concat!(
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"get\",\"status\":\"success\"}\n",
    "{\"kind\":\"put\",\"status\":\"test_failure\",\"message\":\"etag mismatch\"}\n",
    "{\"kind\":\"put\",\"status\":\"test_failure\",\"message\":\"body mismatch\"}\n",
    "{\"kind\":\"consistency\",\"status\":\"success\"}\n",
    "this line is not an outcome\n",
    "{\"kind\":\"delete\",\"status\":\"http_error\",\"code\":503,\"message\":\"unavailable\"}\n",
    "{\"kind\":\"get\",\"status\":\"not_found\"}\n",
);

fn write_outcomes(dir: &tempfile::TempDir) -> Result<PathBuf, String> {
    let path = dir.path().join("outcomes.jsonl");
    fs::write(&path, OUTCOMES).map_err(|err| format!("write outcomes failed: {}", err))?;
    Ok(path)
}

#[test]
fn e2e_text_report_from_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let input = write_outcomes(&dir)?;
    let failures = dir.path().join("failures.jsonl");

    let output = run_loadtally([
        "--input".to_owned(),
        input.to_string_lossy().into_owned(),
        "--failures-out".to_owned(),
        failures.to_string_lossy().into_owned(),
        "--interval".to_owned(),
        "250ms".to_owned(),
    ])?;
    ensure_success(&output)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected_rows = [
        ("# Requests", "18"),
        ("# Test Success", "14"),
        ("# Test Failures", "3"),
        ("# 5XX Errors", "1"),
    ];
    for (metric, value) in expected_rows {
        let found = stdout.lines().any(|line| {
            line.starts_with(metric)
                && line
                    .trim_start_matches(metric)
                    .split_whitespace()
                    .next()
                    == Some(value)
        });
        if !found {
            return Err(format!("Missing '{} {}' in report:\n{}", metric, value, stdout));
        }
    }
    if !stdout.contains("HTTP 503: unavailable") {
        return Err(format!("Missing HTTP error line:\n{}", stdout));
    }
    if !stdout.contains("Current req/250ms") {
        return Err(format!("Missing interval label:\n{}", stdout));
    }

    let logged = fs::read_to_string(&failures)
        .map_err(|err| format!("read failures failed: {}", err))?;
    let count = logged.lines().count();
    if count != 4 {
        return Err(format!("Expected 4 forwarded failures, got {}:\n{}", count, logged));
    }
    Ok(())
}

#[test]
fn e2e_json_report() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let input = write_outcomes(&dir)?;

    let output = run_loadtally([
        "-i".to_owned(),
        input.to_string_lossy().into_owned(),
        "--output-format".to_owned(),
        "json".to_owned(),
    ])?;
    ensure_success(&output)?;

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("report is not JSON: {}", err))?;
    let requests = report.pointer("/summary/totals/requests");
    if requests != Some(&serde_json::json!(18)) {
        return Err(format!("Unexpected requests: {:?}", requests));
    }
    let consistency = report.pointer("/summary/totals/consistency");
    if consistency != Some(&serde_json::json!(1)) {
        return Err(format!("Unexpected consistency count: {:?}", consistency));
    }
    let http = report.pointer("/recent_errors/http/0");
    if http != Some(&serde_json::json!("HTTP 503: unavailable")) {
        return Err(format!("Unexpected http errors: {:?}", http));
    }
    Ok(())
}

#[test]
fn e2e_config_file_sets_output_format() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let input = write_outcomes(&dir)?;
    let config = dir.path().join("loadtally.toml");
    fs::write(&config, "output_format = \"json\"\ninterval = \"500ms\"\n")
        .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_loadtally([
        "--config".to_owned(),
        config.to_string_lossy().into_owned(),
        "--input".to_owned(),
        input.to_string_lossy().into_owned(),
    ])?;
    ensure_success(&output)?;

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("report is not JSON: {}", err))?;
    let interval = report.pointer("/summary/interval_ms");
    if interval == Some(&serde_json::json!(500)) {
        Ok(())
    } else {
        Err(format!("Unexpected interval: {:?}", interval))
    }
}

#[test]
fn e2e_missing_input_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let missing = dir.path().join("absent.jsonl");

    let output = run_loadtally(["--input".to_owned(), missing.to_string_lossy().into_owned()])?;
    if output.status.success() {
        return Err("Expected a missing input file to fail".to_owned());
    }
    Ok(())
}
