mod helpers;
mod state;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use super::types::{ClassifiedOutcome, IntervalCounts, RecentErrors, SummarySnapshot};
use helpers::{apply_outcome, build_recent_errors, build_summary, take_sample};
use state::AggregateState;

pub use helpers::WINDOW_CAPACITY;
pub use state::RECENT_ERROR_CAPACITY;

/// Shared handle to the running counters and sliding windows.
///
/// Cloning is cheap; every clone observes the same state. All fields live
/// behind one `RwLock`, so a merge or a sample is a single transaction and a
/// reader never sees a half-applied update.
#[derive(Clone)]
pub struct Aggregate {
    state: Arc<RwLock<AggregateState>>,
    started: Instant,
    interval: Duration,
}

impl Aggregate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::started_at(Instant::now(), interval)
    }

    #[must_use]
    pub fn started_at(started: Instant, interval: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(AggregateState::new())),
            started,
            interval,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn started(&self) -> Instant {
        self.started
    }

    /// Applies one outcome to every counter it touches.
    pub async fn merge(&self, outcome: &ClassifiedOutcome) {
        let mut state = self.state.write().await;
        apply_outcome(&mut state, outcome);
    }

    /// Closes the current interval and refreshes the smoothed rates.
    pub async fn sample(&self) -> IntervalCounts {
        let mut state = self.state.write().await;
        take_sample(&mut state)
    }

    pub async fn summary(&self) -> SummarySnapshot {
        let elapsed = self.started.elapsed();
        let state = self.state.read().await;
        build_summary(&state, elapsed, self.interval)
    }

    pub async fn recent_errors(&self) -> RecentErrors {
        let state = self.state.read().await;
        build_recent_errors(&state)
    }
}
