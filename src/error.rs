use std::path::PathBuf;

use thiserror::Error;

use crate::practicum::{ApiError, HomeworkError, SchemaError};

/// Startup failures. None of these are recoverable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("TELEGRAM_CHAT_ID must be a numeric chat id or an @channel name, got {0:?}")]
    InvalidChatId(String),

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Everything a single poll cycle can fail with.
///
/// The poll loop catches these at its boundary, logs them and relays them to
/// the chat; none of them stop the loop.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Homework(#[from] HomeworkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_lists_every_name() {
        let err = ConfigError::MissingEnv(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn poll_error_is_transparent() {
        let err: PollError = HomeworkError::UnknownStatus("lost".into()).into();
        assert_eq!(
            err.to_string(),
            HomeworkError::UnknownStatus("lost".into()).to_string()
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<PollError>();
    }
}
