//! Data types for the Practicum `homework_statuses` endpoint.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::error::HomeworkError;

/// Review status of a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// The sentence sent to the chat for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(HomeworkError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the `homeworks` array.
///
/// Both fields are optional at the serde level so that a missing key is
/// reported as [`HomeworkError::MissingField`] rather than a generic decode
/// error. Unknown keys (`id`, `reviewer_comment`, `date_updated`, ...) are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Homework {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Homework {
    /// Decode one record. Only JSON objects are accepted; serde would
    /// otherwise read an array positionally.
    pub fn from_value(value: &Value) -> Result<Self, HomeworkError> {
        if !value.is_object() {
            return Err(HomeworkError::NotAnObject {
                found: json_type_name(value),
            });
        }
        Homework::deserialize(value).map_err(HomeworkError::Malformed)
    }

    pub fn name(&self) -> Result<&str, HomeworkError> {
        self.homework_name
            .as_deref()
            .ok_or(HomeworkError::MissingField("homework_name"))
    }

    /// The raw status code, not yet checked against the known set.
    pub fn raw_status(&self) -> Result<&str, HomeworkError> {
        self.status
            .as_deref()
            .ok_or(HomeworkError::MissingField("status"))
    }
}

/// A validated API response.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusesResponse {
    /// Most recent first, possibly empty. Entries are checked individually
    /// when they are formatted.
    pub homeworks: Vec<Value>,
    /// Server time of the response, used as the next `from_date`.
    pub current_date: Option<i64>,
}

/// Human-readable JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
