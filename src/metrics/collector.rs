use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::error::AppResult;
use crate::shutdown::{ShutdownSender, shutdown_channel};

use super::aggregate::Aggregate;
use super::ingest::{IngestReport, run_ingestion};
use super::sampler::spawn_interval_sampler;
use super::types::ClassifiedOutcome;

/// Construction-time wiring for one aggregator run.
pub struct ResultAggregator {
    aggregate: Aggregate,
    inbound: mpsc::Receiver<ClassifiedOutcome>,
    failure_tx: Option<mpsc::Sender<ClassifiedOutcome>>,
}

impl ResultAggregator {
    #[must_use]
    pub fn new(
        interval: Duration,
        inbound: mpsc::Receiver<ClassifiedOutcome>,
        failure_tx: Option<mpsc::Sender<ClassifiedOutcome>>,
    ) -> Self {
        Self::with_aggregate(Aggregate::new(interval), inbound, failure_tx)
    }

    #[must_use]
    pub const fn with_aggregate(
        aggregate: Aggregate,
        inbound: mpsc::Receiver<ClassifiedOutcome>,
        failure_tx: Option<mpsc::Sender<ClassifiedOutcome>>,
    ) -> Self {
        Self {
            aggregate,
            inbound,
            failure_tx,
        }
    }

    #[must_use]
    pub fn aggregate(&self) -> Aggregate {
        self.aggregate.clone()
    }

    /// Starts the sampler and the ingestion loop.
    #[must_use]
    pub fn spawn(self) -> AggregatorHandle {
        let (stop_tx, _) = shutdown_channel();
        let sampler = spawn_interval_sampler(self.aggregate.clone(), &stop_tx);
        let ingest = tokio::spawn(run_ingestion(
            self.aggregate.clone(),
            self.inbound,
            self.failure_tx,
        ));
        tracing::info!(
            interval_ms = u64::try_from(self.aggregate.interval().as_millis()).unwrap_or(u64::MAX),
            "Result aggregator started"
        );

        AggregatorHandle {
            aggregate: self.aggregate,
            ingest,
            sampler,
            stop_tx,
        }
    }
}

/// Running aggregator. Readers may take snapshots through [`Self::aggregate`]
/// at any time while it runs.
pub struct AggregatorHandle {
    aggregate: Aggregate,
    ingest: JoinHandle<IngestReport>,
    sampler: JoinHandle<u64>,
    stop_tx: ShutdownSender,
}

/// Final state once both tasks have exited.
pub struct AggregatorOutcome {
    pub aggregate: Aggregate,
    pub ingest: IngestReport,
    pub ticks: u64,
}

impl AggregatorHandle {
    #[must_use]
    pub fn aggregate(&self) -> Aggregate {
        self.aggregate.clone()
    }

    /// Waits for the inbound queue to close and drain, then stops the sampler.
    ///
    /// # Errors
    ///
    /// Returns an error if either task panicked or was cancelled.
    pub async fn finish(self) -> AppResult<AggregatorOutcome> {
        let ingest = self.ingest.await?;
        drop(self.stop_tx.send(()));
        let ticks = self.sampler.await?;
        tracing::info!(
            merged = ingest.merged,
            forwarded = ingest.forwarded,
            ticks,
            "Result aggregator finished"
        );

        Ok(AggregatorOutcome {
            aggregate: self.aggregate,
            ingest,
            ticks,
        })
    }
}
