//! Process-wide logging setup.

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide structured logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}
