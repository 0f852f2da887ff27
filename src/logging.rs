//! Tracing subscriber setup.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Output style of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line text, `fmt()`'s default
    Full,
}

impl LogFormat {
    /// Unknown names fall back to `Full`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Full,
        }
    }
}

/// Logging section of the settings file.
///
/// `level` is an `EnvFilter` directive such as `info` or
/// `coin_info_bot=debug,reqwest=warn`. `format` is `pretty`, `json` or `full`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_name(&self.format)
    }

    /// Install the global tracing subscriber for this process.
    ///
    /// `RUST_LOG` takes precedence over `level` when set. Call once, before
    /// the first log line; a second call panics inside `tracing-subscriber`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = fmt().with_env_filter(filter);

        match self.log_format() {
            LogFormat::Pretty => builder.pretty().init(),
            LogFormat::Json => builder.json().init(),
            LogFormat::Full => builder.init(),
        }
    }
}
