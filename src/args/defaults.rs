/// Input path that selects stdin.
pub(crate) const STDIN_INPUT: &str = "-";
/// Outcomes buffered between the input reader and the ingestion loop.
pub(crate) const DEFAULT_INBOUND_CAPACITY: &str = "1024";
/// Failures buffered between the ingestion loop and the failure sink.
pub(crate) const DEFAULT_FAILURE_CAPACITY: &str = "256";
/// Reporting interval used when neither CLI nor config sets one.
pub(crate) const DEFAULT_INTERVAL: &str = "1s";
