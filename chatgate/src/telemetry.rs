//! Process-wide tracing subscriber setup.

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// `RUST_LOG` takes precedence over `level` when set.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Returns `false` when one was already set.
pub fn init_tracing(format: LogFormat, level: &str) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter(level));

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.is_ok()
}
