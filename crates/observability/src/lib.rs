//! Tracing setup shared by the web shell and native tooling.

/// Initialize process-wide tracing.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, writers).
pub mod tracing;
