//! Tracing/logging setup shared by the browser shell and native tests.

/// Initialize process-wide tracing.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers, writers).
pub mod tracing;
