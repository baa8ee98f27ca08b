use std::collections::VecDeque;

use super::super::super::types::IntervalCounts;
use super::super::state::AggregateState;

/// Interval deltas kept per tracked quantity.
pub const WINDOW_CAPACITY: usize = 5;

/// Fixed-capacity FIFO. Pushing onto a full ring evicts the oldest entry.
#[derive(Debug, Clone)]
pub(in crate::metrics::aggregate) struct RecentRing<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RecentRing<T> {
    pub(in crate::metrics::aggregate) fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(in crate::metrics::aggregate) fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    #[cfg(test)]
    pub(in crate::metrics::aggregate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(in crate::metrics::aggregate) fn newest_first(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }

    #[cfg(test)]
    pub(in crate::metrics::aggregate) fn oldest_first(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl RecentRing<u64> {
    /// Truncating mean; an empty ring averages to zero.
    pub(in crate::metrics::aggregate) fn mean(&self) -> u64 {
        let sum = self
            .items
            .iter()
            .fold(0u64, |acc, value| acc.saturating_add(*value));
        let len = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        sum.checked_div(len).unwrap_or(0)
    }
}

pub(in crate::metrics::aggregate) struct IntervalHistory {
    pub(in crate::metrics::aggregate) requests: RecentRing<u64>,
    pub(in crate::metrics::aggregate) successes: RecentRing<u64>,
    pub(in crate::metrics::aggregate) gets: RecentRing<u64>,
    pub(in crate::metrics::aggregate) puts: RecentRing<u64>,
    pub(in crate::metrics::aggregate) deletes: RecentRing<u64>,
    pub(in crate::metrics::aggregate) throttled: RecentRing<u64>,
    pub(in crate::metrics::aggregate) consistency: RecentRing<u64>,
}

impl IntervalHistory {
    pub(in crate::metrics::aggregate) fn new() -> Self {
        Self {
            requests: RecentRing::new(WINDOW_CAPACITY),
            successes: RecentRing::new(WINDOW_CAPACITY),
            gets: RecentRing::new(WINDOW_CAPACITY),
            puts: RecentRing::new(WINDOW_CAPACITY),
            deletes: RecentRing::new(WINDOW_CAPACITY),
            throttled: RecentRing::new(WINDOW_CAPACITY),
            consistency: RecentRing::new(WINDOW_CAPACITY),
        }
    }

    fn push(&mut self, deltas: IntervalCounts) {
        self.requests.push(deltas.requests);
        self.successes.push(deltas.successes);
        self.gets.push(deltas.gets);
        self.puts.push(deltas.puts);
        self.deletes.push(deltas.deletes);
        self.throttled.push(deltas.throttled);
        self.consistency.push(deltas.consistency);
    }

    fn means(&self) -> IntervalCounts {
        IntervalCounts {
            requests: self.requests.mean(),
            successes: self.successes.mean(),
            gets: self.gets.mean(),
            puts: self.puts.mean(),
            deletes: self.deletes.mean(),
            throttled: self.throttled.mean(),
            consistency: self.consistency.mean(),
        }
    }
}

/// Closes the open interval: records its deltas, refreshes the smoothed rates
/// and resets the interval counter. Returns the deltas that were recorded.
pub(in crate::metrics::aggregate) fn take_sample(state: &mut AggregateState) -> IntervalCounts {
    let lifetime = state.lifetime;
    let baseline = state.baseline;
    let deltas = IntervalCounts {
        requests: state.open_interval_requests,
        successes: lifetime.successes.saturating_sub(baseline.successes),
        gets: lifetime.gets.saturating_sub(baseline.gets),
        puts: lifetime.puts.saturating_sub(baseline.puts),
        deletes: lifetime.deletes.saturating_sub(baseline.deletes),
        throttled: lifetime.throttled.saturating_sub(baseline.throttled),
        consistency: lifetime.consistency.saturating_sub(baseline.consistency),
    };

    state.history.push(deltas);
    state.current = state.history.means();
    state.baseline = lifetime;
    state.open_interval_requests = 0;
    state.samples_taken = state.samples_taken.saturating_add(1);

    deltas
}
