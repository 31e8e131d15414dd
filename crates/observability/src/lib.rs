//! Tracing/logging setup shared by binaries.

/// Environment-driven settings.
pub mod config;

/// Subscriber installation.
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(&ObservabilityConfig::from_env());
}

/// Initialize process-wide tracing with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init(config);

    if let Some(raw) = &config.rejected_format {
        ::tracing::warn!(
            value = %raw,
            fallback = config.format.as_str(),
            "unknown {} value; using fallback",
            config::LOG_FORMAT_VAR
        );
    }
}
