use super::super::types::{IntervalCounts, LifetimeCounters};
use super::helpers::{IntervalHistory, RecentRing};

/// Recent error messages kept per origin.
pub const RECENT_ERROR_CAPACITY: usize = 5;

/// Every mutable field of the aggregate. Only ever touched through the
/// `RwLock` owned by [`super::Aggregate`].
pub(super) struct AggregateState {
    pub(super) lifetime: LifetimeCounters,
    pub(super) open_interval_requests: u64,
    pub(super) baseline: LifetimeCounters,
    pub(super) history: IntervalHistory,
    pub(super) current: IntervalCounts,
    pub(super) samples_taken: u64,
    pub(super) http_errors: RecentRing<String>,
    pub(super) other_errors: RecentRing<String>,
}

impl AggregateState {
    pub(super) fn new() -> Self {
        Self {
            lifetime: LifetimeCounters::default(),
            open_interval_requests: 0,
            baseline: LifetimeCounters::default(),
            history: IntervalHistory::new(),
            current: IntervalCounts::default(),
            samples_taken: 0,
            http_errors: RecentRing::new(RECENT_ERROR_CAPACITY),
            other_errors: RecentRing::new(RECENT_ERROR_CAPACITY),
        }
    }
}
