//! Live aggregation of classified load-test outcomes.
//!
//! Workers push [`ClassifiedOutcome`]s into a bounded queue; a single
//! ingestion task merges them into a shared [`Aggregate`], a background
//! sampler closes one reporting interval per tick, and readers take
//! [`SummarySnapshot`]s whenever they like.
mod aggregate;
mod collector;
mod ingest;
mod sampler;
mod types;


pub use aggregate::{Aggregate, RECENT_ERROR_CAPACITY, WINDOW_CAPACITY};
pub use collector::{AggregatorHandle, AggregatorOutcome, ResultAggregator};
pub use ingest::{IngestReport, run_ingestion};
pub use sampler::spawn_interval_sampler;
pub use types::{
    CONSISTENCY_REQUEST_MULTIPLIER, ClassifiedOutcome, IntervalCounts, LifetimeCounters,
    OperationKind, OutcomeStatus, RecentErrors, SummarySnapshot,
};
