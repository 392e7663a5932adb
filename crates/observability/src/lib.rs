//! Tracing/logging setup shared by every Innkeep binary.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
