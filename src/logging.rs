//! Logger setup for applications and the GPU tests.
//!
//! The crate itself only emits through `log`; installing a backend is left to
//! the caller. [`init_logging`] is a convenience that installs `env_logger`
//! natively and `console_log` on wasm.

use std::sync::atomic::{AtomicBool, Ordering};

use log::SetLoggerError;

/// Used when neither [`LoggingConfig::filter`] nor `RUST_LOG` is set. wgpu is chatty at info.
pub const DEFAULT_FILTER: &str = "warn,tint_ngin=info";

static INSTALLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` directives such as `"tint_ngin=debug,wgpu=warn"`. Overrides `RUST_LOG`.
    pub filter: Option<String>,
    pub timestamps: bool,
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Installs the global logger. Calls after the first one are no-ops and
/// return `Ok`; an error means some other logger was installed already.
pub fn init_logging(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    install(config)?;
    log::debug!("logger installed");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn install(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(filter) = &config.filter {
        builder.parse_filters(filter);
    }
    if !config.timestamps {
        builder.format_timestamp(None);
    }
    builder.try_init()
}

#[cfg(target_arch = "wasm32")]
fn install(_config: &LoggingConfig) -> Result<(), SetLoggerError> {
    console_log::init_with_level(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_a_no_op() {
        let config = LoggingConfig::default().with_filter("tint_ngin=debug");
        assert_eq!(config.filter.as_deref(), Some("tint_ngin=debug"));
        // the first call may lose to a logger installed by another test
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_ok());
    }
}
