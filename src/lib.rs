//! Core library for the `loadtally` CLI.
//!
//! This crate provides the live aggregation core of a load-testing harness:
//! classified outcome types, the shared aggregate with its sliding windows,
//! the interval sampler, the ingestion loop, and read-only report views. The
//! binary wires these to a JSON-lines input and a failure log; library users
//! can feed the aggregator from their own worker pool instead.
pub mod args;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod shutdown;
