use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("I/O error during {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open outcome input '{path}': {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open failure log '{path}': {source}")]
    OpenFailureLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode failure record: {source}")]
    EncodeFailure {
        #[source]
        source: serde_json::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
