//! Tracing/logging setup shared by the fleetops binaries.
//!
//! Libraries in the workspace only emit `tracing` events; installing a subscriber
//! is left to the process entry point.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
