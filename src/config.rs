//! Settings file loading.
//!
//! Settings are read once at startup from a TOML file and handed to the
//! components that need them. `TELEGRAM_BOT_TOKEN` in the environment takes
//! precedence over the file's token.

use std::{fs, path::Path, str::FromStr};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{error::ConfigError, logging::LoggingConfig};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "COIN_INFO_CONFIG";
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_TIMEZONE: &str = "America/Chicago";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub coingecko: CoinGeckoSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSettings {
    #[serde(default)]
    pub bot_token: String,
    pub chat_id: i64,
    /// Send an "online" notice to `chat_id` once polling starts.
    #[serde(default)]
    pub notify_on_start: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoSettings {
    pub api_key: Option<String>,
    #[serde(default = "default_coingecko_url")]
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

fn default_coingecko_url() -> String {
    DEFAULT_COINGECKO_URL.to_string()
}

impl Default for CoinGeckoSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_coingecko_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    /// IANA zone name used for the "Current Time" line
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl DisplaySettings {
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        Tz::from_str(&self.timezone).map_err(|e| ConfigError::InvalidValue {
            field: "display.timezone",
            reason: e.to_string(),
        })
    }
}

impl Settings {
    /// Load settings from a TOML file, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;

        let mut settings = Self::parse(&content)?;
        if let Ok(token) = std::env::var(BOT_TOKEN_ENV) {
            settings.telegram.bot_token = token;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from TOML text without touching the environment.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.bot_token",
            });
        }
        if self.coingecko.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "coingecko.base_url",
                reason: "must not be empty".into(),
            });
        }
        self.display.tz()?;
        Ok(())
    }
}
