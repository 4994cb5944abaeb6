//! Process-wide tracing/logging setup.

/// Initialize tracing for the process using `TOKENGATE_LOG_FORMAT`.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    let format = std::env::var("TOKENGATE_LOG_FORMAT")
        .ok()
        .and_then(|v| tracing::LogFormat::parse(&v))
        .unwrap_or_default();
    tracing::init(format);
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
