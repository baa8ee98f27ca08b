//! Read-only views over aggregate snapshots.
//!
//! Everything here works on owned [`SummarySnapshot`] / [`RecentErrors`]
//! copies, so no formatting ever happens while the aggregate lock is held.
mod errors;
mod table;


pub use errors::error_lines;
pub use table::{SummaryRow, format_x10, render_rows, summary_lines, summary_rows};

use serde::Serialize;

use crate::metrics::{Aggregate, RecentErrors, SummarySnapshot};

/// Combined report used for machine-readable output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Report {
    pub summary: SummarySnapshot,
    pub recent_errors: RecentErrors,
}

impl Report {
    /// Copies both views out of the aggregate.
    pub async fn capture(aggregate: &Aggregate) -> Self {
        Self {
            summary: aggregate.summary().await,
            recent_errors: aggregate.recent_errors().await,
        }
    }

    /// Summary table followed by the recent error listing.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = summary_lines(&self.summary);
        lines.extend(error_lines(&self.recent_errors));
        lines
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
