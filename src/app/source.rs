use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::error::{AppError, AppResult, MetricsError};
use crate::metrics::ClassifiedOutcome;
use crate::shutdown::ShutdownSender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ReaderReport {
    pub(crate) lines: u64,
    pub(crate) accepted: u64,
    pub(crate) skipped: u64,
    pub(crate) interrupted: bool,
}

/// Feeds JSON-lines outcomes into the inbound queue until the input ends or a
/// shutdown is broadcast. Dropping `tx` on return closes the queue.
///
/// # Errors
///
/// Returns an error when the underlying reader fails.
pub(crate) async fn read_outcomes<R>(
    reader: R,
    tx: mpsc::Sender<ClassifiedOutcome>,
    shutdown_tx: &ShutdownSender,
) -> AppResult<ReaderReport>
where
    R: AsyncBufRead + Unpin,
{
    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut lines = reader.lines();
    let mut report = ReaderReport::default();

    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                report.interrupted = true;
                break;
            }
            next = lines.next_line() => next.map_err(|err| {
                AppError::metrics(MetricsError::Io {
                    context: "reading outcome input",
                    source: err,
                })
            })?,
        };
        let Some(line) = next else {
            break;
        };
        report.lines = report.lines.saturating_add(1);

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<ClassifiedOutcome>(trimmed) {
            Ok(outcome) => {
                if tx.send(outcome).await.is_err() {
                    tracing::warn!("Inbound queue closed before input ended");
                    break;
                }
                report.accepted = report.accepted.saturating_add(1);
            }
            Err(err) => {
                report.skipped = report.skipped.saturating_add(1);
                tracing::warn!("Skipping input line {}: {}", report.lines, err);
            }
        }
    }

    drop(tx);
    Ok(report)
}
