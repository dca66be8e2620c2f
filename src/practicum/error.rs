//! Error types for the Practicum homework API.
//!
//! [`ApiError`] covers the request itself, [`SchemaError`] the shape of the
//! decoded body and [`HomeworkError`] a single homework record.

use thiserror::Error;

/// Failures while talking to the homework status endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, timeout, broken body).
    #[error("request to homework API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any status other than 200. The body is kept for diagnostics.
    #[error("homework API returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The body was not valid JSON.
    #[error("homework API returned invalid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The decoded body does not have the documented shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("expected a JSON object in the API response, got {found}")]
    NotAnObject { found: &'static str },

    #[error("key `{0}` not found in the API response")]
    MissingKey(&'static str),

    #[error("expected `{key}` to be {expected}, got {found}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// A homework record that cannot be turned into a verdict.
#[derive(Debug, Error)]
pub enum HomeworkError {
    #[error("expected a JSON object for the homework record, got {found}")]
    NotAnObject { found: &'static str },

    /// An object whose fields have the wrong JSON types.
    #[error("malformed homework record: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("key `{0}` not found in the homework record")]
    MissingField(&'static str),

    #[error("unknown homework status {0:?}, expected one of approved|reviewing|rejected")]
    UnknownStatus(String),
}
