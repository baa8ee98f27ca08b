use super::super::super::types::{ClassifiedOutcome, OperationKind, OutcomeStatus};
use super::super::state::AggregateState;

pub(in crate::metrics::aggregate) fn apply_outcome(
    state: &mut AggregateState,
    outcome: &ClassifiedOutcome,
) {
    let kind = outcome.kind();
    let weight = kind.requests_represented();
    let lifetime = &mut state.lifetime;

    lifetime.requests = lifetime.requests.saturating_add(weight);
    state.open_interval_requests = state.open_interval_requests.saturating_add(weight);

    if outcome.is_success() {
        lifetime.successes = lifetime.successes.saturating_add(weight);
    }
    if outcome.is_test_failure() {
        lifetime.failures = lifetime.failures.saturating_add(1);
    }
    if outcome.is_5xx() {
        lifetime.status_5xx = lifetime.status_5xx.saturating_add(1);
    }
    if outcome.is_throttled() {
        lifetime.throttled = lifetime.throttled.saturating_add(1);
    }

    match outcome.status() {
        OutcomeStatus::HttpError { code, message } => {
            state.http_errors.push(format!("HTTP {}: {}", code, message));
        }
        OutcomeStatus::OtherError { message } => {
            state.other_errors.push(message.clone());
        }
        // Consistency failures carry diagnostics no other field captures.
        OutcomeStatus::TestFailure { message } if kind == OperationKind::Consistency => {
            state.other_errors.push(message.clone());
        }
        OutcomeStatus::TestFailure { .. }
        | OutcomeStatus::Success
        | OutcomeStatus::Throttled
        | OutcomeStatus::NotFound => {}
    }

    match kind {
        OperationKind::Get => lifetime.gets = lifetime.gets.saturating_add(1),
        OperationKind::Put | OperationKind::Create => {
            lifetime.puts = lifetime.puts.saturating_add(1);
        }
        OperationKind::Delete => lifetime.deletes = lifetime.deletes.saturating_add(1),
        OperationKind::Consistency => {
            lifetime.consistency = lifetime.consistency.saturating_add(1);
        }
    }
}
