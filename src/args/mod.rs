//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::AggregatorArgs;
pub use types::{OutputFormat, PositiveUsize};

pub(crate) use defaults::STDIN_INPUT;
pub(crate) use parsers::parse_duration_value;
