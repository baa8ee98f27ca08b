use serde::{Deserialize, Serialize};

/// Logical requests issued by one consistency check on the worker side. Request
/// and success counters scale by this factor; the per-kind consistency counter
/// does not.
pub const CONSISTENCY_REQUEST_MULTIPLIER: u64 = 4;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Get,
    Put,
    Create,
    Delete,
    #[serde(alias = "consistency-check", alias = "consistency_check")]
    Consistency,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OperationKind::Get => "GET",
            OperationKind::Put => "PUT",
            OperationKind::Create => "CREATE",
            OperationKind::Delete => "DELETE",
            OperationKind::Consistency => "CONSISTENCY",
        }
    }

    /// Number of logical requests one outcome of this kind stands for.
    #[must_use]
    pub const fn requests_represented(self) -> u64 {
        match self {
            OperationKind::Consistency => CONSISTENCY_REQUEST_MULTIPLIER,
            OperationKind::Get
            | OperationKind::Put
            | OperationKind::Create
            | OperationKind::Delete => 1,
        }
    }
}

/// How a worker classified one completed operation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    TestFailure { message: String },
    Throttled,
    HttpError { code: u16, message: String },
    OtherError { message: String },
    NotFound,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Success => f.write_str("success"),
            OutcomeStatus::TestFailure { message } => write!(f, "test failure: {}", message),
            OutcomeStatus::Throttled => f.write_str("throttled"),
            OutcomeStatus::HttpError { code, message } => write!(f, "HTTP {}: {}", code, message),
            OutcomeStatus::OtherError { message } => write!(f, "error: {}", message),
            OutcomeStatus::NotFound => f.write_str("not found"),
        }
    }
}

/// One classified load-test result, produced by a worker and consumed exactly
/// once by the ingestion loop.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClassifiedOutcome {
    kind: OperationKind,
    #[serde(flatten)]
    status: OutcomeStatus,
}

impl ClassifiedOutcome {
    #[must_use]
    pub const fn new(kind: OperationKind, status: OutcomeStatus) -> Self {
        Self { kind, status }
    }

    #[must_use]
    pub const fn success(kind: OperationKind) -> Self {
        Self::new(kind, OutcomeStatus::Success)
    }

    #[must_use]
    pub fn test_failure(kind: OperationKind, message: impl Into<String>) -> Self {
        Self::new(
            kind,
            OutcomeStatus::TestFailure {
                message: message.into(),
            },
        )
    }

    #[must_use]
    pub fn http_error(kind: OperationKind, code: u16, message: impl Into<String>) -> Self {
        Self::new(
            kind,
            OutcomeStatus::HttpError {
                code,
                message: message.into(),
            },
        )
    }

    #[must_use]
    pub fn other_error(kind: OperationKind, message: impl Into<String>) -> Self {
        Self::new(
            kind,
            OutcomeStatus::OtherError {
                message: message.into(),
            },
        )
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub const fn status(&self) -> &OutcomeStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }

    /// The operation ran but did not behave as the test expected.
    #[must_use]
    pub const fn is_test_failure(&self) -> bool {
        match self.status {
            OutcomeStatus::TestFailure { .. }
            | OutcomeStatus::HttpError { .. }
            | OutcomeStatus::OtherError { .. } => true,
            OutcomeStatus::Success | OutcomeStatus::Throttled | OutcomeStatus::NotFound => false,
        }
    }

    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        match self.status {
            OutcomeStatus::Throttled => true,
            OutcomeStatus::HttpError { code, .. } => code == 429,
            OutcomeStatus::Success
            | OutcomeStatus::TestFailure { .. }
            | OutcomeStatus::OtherError { .. }
            | OutcomeStatus::NotFound => false,
        }
    }

    #[must_use]
    pub const fn is_5xx(&self) -> bool {
        match self.status {
            OutcomeStatus::HttpError { code, .. } => matches!(code, 500..=599),
            OutcomeStatus::Success
            | OutcomeStatus::TestFailure { .. }
            | OutcomeStatus::Throttled
            | OutcomeStatus::OtherError { .. }
            | OutcomeStatus::NotFound => false,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match self.status {
            OutcomeStatus::NotFound => true,
            OutcomeStatus::HttpError { code, .. } => code == 404,
            OutcomeStatus::Success
            | OutcomeStatus::TestFailure { .. }
            | OutcomeStatus::Throttled
            | OutcomeStatus::OtherError { .. } => false,
        }
    }

    /// Outcomes routed to the failure sink after they are merged.
    #[must_use]
    pub const fn should_forward(&self) -> bool {
        self.is_test_failure() || self.is_not_found()
    }
}

/// Lifetime counters, never reset while the aggregator lives.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LifetimeCounters {
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub throttled: u64,
    pub status_5xx: u64,
    pub gets: u64,
    pub puts: u64,
    pub deletes: u64,
    pub consistency: u64,
}

/// One value per windowed quantity. Used both for the deltas of a single
/// interval and for the smoothed current rates.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IntervalCounts {
    pub requests: u64,
    pub successes: u64,
    pub gets: u64,
    pub puts: u64,
    pub deletes: u64,
    pub throttled: u64,
    pub consistency: u64,
}

/// Point-in-time copy of the aggregate, safe to format without holding the lock.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummarySnapshot {
    pub elapsed_ms: u64,
    pub interval_ms: u64,
    pub samples_taken: u64,
    pub totals: LifetimeCounters,
    pub current: IntervalCounts,
    /// Lifetime requests per second in tenths, rounded half up.
    pub avg_rps_x10: u64,
    /// Lifetime successful requests per second in tenths, rounded half up.
    pub avg_success_rps_x10: u64,
}

/// Most recent error messages, newest first.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RecentErrors {
    pub http: Vec<String>,
    pub other: Vec<String>,
}
