mod merge;
mod summary;
mod windows;

pub(in crate::metrics::aggregate) use merge::apply_outcome;
pub(in crate::metrics::aggregate) use summary::{build_recent_errors, build_summary};
pub(in crate::metrics::aggregate) use windows::{IntervalHistory, RecentRing, take_sample};
pub use windows::WINDOW_CAPACITY;
