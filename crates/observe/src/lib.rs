//! Logging initialization shared by the conformance binary and the tests.

mod config;
pub mod tracing;

pub use config::Config;
