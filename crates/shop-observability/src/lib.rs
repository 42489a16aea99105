//! Logging and call timing for the shop client.
//!
//! This crate provides:
//! - `init_logging` - Installs the `tracing` subscriber (human or JSON output)
//! - `LogLevel` / `LogFormat` - Configuration values for the subscriber
//! - `CallTimer` / `CallRecord` - Timing of outbound API calls

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
