use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult, MetricsError};
use crate::metrics::{ClassifiedOutcome, OperationKind, OutcomeStatus};

/// One line of the failure log.
#[derive(Debug, Serialize)]
struct FailureRecord<'outcome> {
    recorded_at: String,
    kind: OperationKind,
    #[serde(flatten)]
    status: &'outcome OutcomeStatus,
}

impl<'outcome> FailureRecord<'outcome> {
    fn new(outcome: &'outcome ClassifiedOutcome) -> Self {
        Self {
            recorded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            kind: outcome.kind(),
            status: outcome.status(),
        }
    }
}

/// Drains forwarded failures until the aggregator drops its sender. With a
/// path, each failure is appended as one JSON line; otherwise it is logged.
/// Resolves to the number of failures handled.
pub(crate) fn spawn_failure_sink(
    rx: mpsc::Receiver<ClassifiedOutcome>,
    path: Option<PathBuf>,
) -> JoinHandle<AppResult<u64>> {
    tokio::spawn(async move {
        match path {
            Some(path) => write_failures(rx, &path).await,
            None => Ok(log_failures(rx).await),
        }
    })
}

async fn log_failures(mut rx: mpsc::Receiver<ClassifiedOutcome>) -> u64 {
    let mut handled = 0u64;
    while let Some(outcome) = rx.recv().await {
        tracing::warn!(kind = outcome.kind().as_str(), "{}", outcome.status());
        handled = handled.saturating_add(1);
    }
    handled
}

async fn write_failures(mut rx: mpsc::Receiver<ClassifiedOutcome>, path: &Path) -> AppResult<u64> {
    let file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|err| {
            AppError::metrics(MetricsError::OpenFailureLog {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
    let mut writer = BufWriter::new(file);
    let mut handled = 0u64;

    while let Some(outcome) = rx.recv().await {
        let mut line = serde_json::to_vec(&FailureRecord::new(&outcome))
            .map_err(|err| AppError::metrics(MetricsError::EncodeFailure { source: err }))?;
        line.push(b'\n');
        writer.write_all(&line).await.map_err(|err| {
            AppError::metrics(MetricsError::Io {
                context: "writing failure log",
                source: err,
            })
        })?;
        handled = handled.saturating_add(1);
    }

    writer.flush().await.map_err(|err| {
        AppError::metrics(MetricsError::Io {
            context: "flushing failure log",
            source: err,
        })
    })?;
    tracing::debug!("Wrote {} failures to {}", handled, path.display());
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    fn run_async_test<F>(future: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AppError::metrics(format!("Failed to build runtime: {}", err)))?;
        runtime.block_on(future)
    }

    #[test]
    fn writes_one_json_line_per_failure() -> AppResult<()> {
        run_async_test(async {
            let dir = tempfile::tempdir()?;
            let path = dir.path().join("failures.jsonl");
            let (tx, rx) = mpsc::channel(4);
            let handle = spawn_failure_sink(rx, Some(path.clone()));

            tx.send(ClassifiedOutcome::http_error(OperationKind::Get, 503, "unavailable"))
                .await
                .map_err(|err| AppError::metrics(format!("send failed: {}", err)))?;
            tx.send(ClassifiedOutcome::test_failure(
                OperationKind::Consistency,
                "stale read",
            ))
            .await
            .map_err(|err| AppError::metrics(format!("send failed: {}", err)))?;
            drop(tx);

            let handled = handle.await??;
            if handled != 2 {
                return Err(AppError::metrics(format!("Expected 2 failures, got {}", handled)));
            }

            let contents = tokio::fs::read_to_string(&path).await?;
            let records: Vec<serde_json::Value> = contents
                .lines()
                .map(serde_json::from_str)
                .collect::<Result<_, _>>()?;
            let [first, second] = records.as_slice() else {
                return Err(AppError::metrics(format!("Unexpected log: {}", contents)));
            };
            if first.get("status") != Some(&serde_json::json!("http_error"))
                || first.get("code") != Some(&serde_json::json!(503))
            {
                return Err(AppError::metrics(format!("Unexpected first record: {}", first)));
            }
            if second.get("kind") != Some(&serde_json::json!("consistency"))
                || second.get("message") != Some(&serde_json::json!("stale read"))
            {
                return Err(AppError::metrics(format!("Unexpected second record: {}", second)));
            }
            if first.get("recorded_at").is_none() {
                return Err(AppError::metrics("Missing timestamp"));
            }
            Ok(())
        })
    }

    #[test]
    fn log_only_sink_counts_failures() -> AppResult<()> {
        run_async_test(async {
            let (tx, rx) = mpsc::channel(4);
            let handle = spawn_failure_sink(rx, None);
            tx.send(ClassifiedOutcome::new(OperationKind::Get, OutcomeStatus::NotFound))
                .await
                .map_err(|err| AppError::metrics(format!("send failed: {}", err)))?;
            drop(tx);
            let handled = handle.await??;
            if handled == 1 {
                Ok(())
            } else {
                Err(AppError::metrics(format!("Expected 1 failure, got {}", handled)))
            }
        })
    }
}
