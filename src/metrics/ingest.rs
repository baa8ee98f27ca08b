use serde::Serialize;
use tokio::sync::mpsc;

use super::aggregate::Aggregate;
use super::types::ClassifiedOutcome;

/// What the ingestion loop did before the inbound queue closed.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IngestReport {
    pub merged: u64,
    pub forwarded: u64,
    /// Failures that could not be handed to the failure sink.
    pub unrouted: u64,
}

/// Merges every outcome from `inbound` until it closes, routing failures and
/// not-found results to `failure_tx`.
///
/// Forwarding waits for room in the failure sink, so a slow sink slows
/// ingestion down. A sink that has gone away disables forwarding for the rest
/// of the run.
pub async fn run_ingestion(
    aggregate: Aggregate,
    mut inbound: mpsc::Receiver<ClassifiedOutcome>,
    failure_tx: Option<mpsc::Sender<ClassifiedOutcome>>,
) -> IngestReport {
    let mut report = IngestReport::default();
    let mut failure_tx = failure_tx;

    while let Some(outcome) = inbound.recv().await {
        aggregate.merge(&outcome).await;
        report.merged = report.merged.saturating_add(1);

        if !outcome.should_forward() {
            continue;
        }
        let Some(tx) = failure_tx.as_ref() else {
            report.unrouted = report.unrouted.saturating_add(1);
            continue;
        };
        if tx.send(outcome).await.is_err() {
            tracing::warn!("Failure sink closed; further failures will not be forwarded");
            failure_tx = None;
            report.unrouted = report.unrouted.saturating_add(1);
        } else {
            report.forwarded = report.forwarded.saturating_add(1);
        }
    }

    tracing::debug!(
        merged = report.merged,
        forwarded = report.forwarded,
        unrouted = report.unrouted,
        "Inbound queue closed"
    );
    report
}
