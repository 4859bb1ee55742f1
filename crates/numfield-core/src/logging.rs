//! Structured logging helpers.
//!
//! Widgets log through `tracing` directly. Binaries call [`init_from_env`]
//! once at startup to install a subscriber that honours `RUST_LOG`.

pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format (`text` or `json`).
pub const ENV_LOG_FORMAT: &str = "NUMFIELD_LOG_FORMAT";

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event (requires the `tracing-json` feature).
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "plain" => Some(Self::Text),
            "json" | "jsonl" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolve the log format using a custom environment lookup.
#[must_use]
pub fn log_format_from_env<F>(get_env: F) -> LogFormat
where
    F: Fn(&str) -> Option<String>,
{
    get_env(ENV_LOG_FORMAT)
        .and_then(|value| LogFormat::parse(&value))
        .unwrap_or_default()
}

/// Install a global subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` (default `warn`). Returns `false` when a
/// subscriber was already installed.
pub fn init_from_env() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match log_format_from_env(|key| std::env::var(key).ok()) {
        #[cfg(feature = "tracing-json")]
        LogFormat::Json => builder.json().try_init().is_ok(),
        #[cfg(not(feature = "tracing-json"))]
        LogFormat::Json => {
            let installed = builder.try_init().is_ok();
            warn!("json log format requested without the tracing-json feature");
            installed
        }
        LogFormat::Text => builder.try_init().is_ok(),
    }
}
