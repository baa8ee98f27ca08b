use std::time::Duration;

use super::super::super::types::{RecentErrors, SummarySnapshot};
use super::super::state::AggregateState;

/// Shortest elapsed time used for lifetime averages.
const MIN_ELAPSED_MS: u128 = 1;
/// Tenths-per-unit scale times milliseconds-per-second.
const TENTHS_PER_SEC_SCALE: u128 = 10 * 1_000;

pub(in crate::metrics::aggregate) fn build_summary(
    state: &AggregateState,
    elapsed: Duration,
    interval: Duration,
) -> SummarySnapshot {
    let elapsed_ms = elapsed.as_millis();
    let totals = state.lifetime;

    SummarySnapshot {
        elapsed_ms: u64::try_from(elapsed_ms).unwrap_or(u64::MAX),
        interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        samples_taken: state.samples_taken,
        totals,
        current: state.current,
        avg_rps_x10: per_sec_x10(totals.requests, elapsed_ms),
        avg_success_rps_x10: per_sec_x10(totals.successes, elapsed_ms),
    }
}

pub(in crate::metrics::aggregate) fn build_recent_errors(state: &AggregateState) -> RecentErrors {
    RecentErrors {
        http: state.http_errors.newest_first().cloned().collect(),
        other: state.other_errors.newest_first().cloned().collect(),
    }
}

/// `count / seconds`, expressed in tenths and rounded half up.
fn per_sec_x10(count: u64, elapsed_ms: u128) -> u64 {
    let elapsed_ms = elapsed_ms.max(MIN_ELAPSED_MS);
    let scaled = u128::from(count)
        .saturating_mul(TENTHS_PER_SEC_SCALE)
        .saturating_add(elapsed_ms.checked_div(2).unwrap_or(0))
        .checked_div(elapsed_ms)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
