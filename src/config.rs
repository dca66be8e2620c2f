//! Bot configuration.
//!
//! Secrets come from the environment (a `.env` file is merged in by `main`
//! before loading). Non-secret tunables come from an optional
//! `homework_bot.toml`; missing keys fall back to defaults.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::practicum::API_URL;

pub const DEFAULT_CONFIG_PATH: &str = "homework_bot.toml";

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Target chat for notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Id(i64),
    Channel(String),
}

impl ChatTarget {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(ChatTarget::Id(id));
        }
        if raw.len() > 1 && raw.starts_with('@') {
            return Ok(ChatTarget::Channel(raw.to_string()));
        }
        Err(ConfigError::InvalidChatId(raw.to_string()))
    }
}

/// Credentials read from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat: ChatTarget,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat", &self.chat)
            .finish()
    }
}

/// Look up `name` and treat unset or blank values as missing.
fn required(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read all three credentials through `lookup`, reporting every missing
    /// variable at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let practicum = required(&lookup, PRACTICUM_TOKEN);
        let telegram = required(&lookup, TELEGRAM_TOKEN);
        let chat = required(&lookup, TELEGRAM_CHAT_ID);

        match (practicum, telegram, chat) {
            (Some(practicum_token), Some(telegram_token), Some(chat)) => Ok(Self {
                practicum_token,
                telegram_token,
                chat: ChatTarget::parse(&chat)?,
            }),
            (practicum, telegram, chat) => {
                let missing = [
                    (PRACTICUM_TOKEN, practicum.is_none()),
                    (TELEGRAM_TOKEN, telegram.is_none()),
                    (TELEGRAM_CHAT_ID, chat.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(ConfigError::MissingEnv(missing))
            }
        }
    }

    /// Only the API token, for commands that never talk to Telegram.
    pub fn practicum_token_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        required(&lookup, PRACTICUM_TOKEN)
            .ok_or_else(|| ConfigError::MissingEnv(vec![PRACTICUM_TOKEN]))
    }
}

/// Tunables loaded from `homework_bot.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Homework status endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fixed delay between poll cycles.
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// How far back the first request looks.
    #[serde(default)]
    pub lookback_secs: u64,

    /// Log file, truncated on start. An empty path disables file logging.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_endpoint() -> String {
    API_URL.to_string()
}

fn default_retry_period_secs() -> u64 {
    600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_file() -> PathBuf {
    PathBuf::from("homework_bot.log")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_period_secs: default_retry_period_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            lookback_secs: 0,
            log_file: default_log_file(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = match std::fs::read_to_string(path) {
            Ok(contents) => {
                toml::from_str::<Settings>(&contents).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_period_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "retry_period_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "endpoint",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn log_file(&self) -> Option<&Path> {
        (!self.log_file.as_os_str().is_empty()).then_some(self.log_file.as_path())
    }

    /// `from_date` for the first request, given the current unix time.
    pub fn initial_from_date(&self, now: i64) -> i64 {
        now.saturating_sub(i64::try_from(self.lookback_secs).unwrap_or(i64::MAX))
    }
}

/// Everything the bot needs, assembled once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub credentials: Credentials,
    pub settings: Settings,
}

impl BotConfig {
    /// Pair already loaded settings with credentials from the environment.
    pub fn from_env(settings: Settings) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env()?;
        Ok(Self {
            credentials,
            settings,
        })
    }
}
