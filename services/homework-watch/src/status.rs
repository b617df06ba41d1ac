//! Homework status vocabulary and message translation

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TranslationError;

/// JSON key holding the homework identifier
pub const NAME_FIELD: &str = "homework_name";
/// JSON key holding the review status code
pub const STATUS_FIELD: &str = "status";

/// Review states reported by the homework endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Every known status, in vocabulary order
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Look up a raw status code
    pub fn from_code(code: &str) -> Option<Self> {
        serde_json::from_value(Value::String(code.to_string())).ok()
    }

    /// The wire code for this status
    pub fn code(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Canonical display text for this status
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review by the reviewer.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One homework entry extracted from a status response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedItem {
    pub name: String,
    pub status: HomeworkStatus,
}

impl TrackedItem {
    /// Extract name and status from a raw homework object
    pub fn from_value(item: &Value) -> Result<Self, TranslationError> {
        let name = match item.get(NAME_FIELD) {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(TranslationError::MissingField { field: NAME_FIELD }),
        };

        let status = match item.get(STATUS_FIELD) {
            None | Some(Value::Null) => {
                return Err(TranslationError::MissingField {
                    field: STATUS_FIELD,
                })
            }
            Some(Value::String(code)) => {
                serde_json::from_value::<HomeworkStatus>(Value::String(code.clone()))
                    .map_err(|_| TranslationError::UnknownStatus { code: code.clone() })?
            }
            Some(other) => {
                return Err(TranslationError::UnknownStatus {
                    code: other.to_string(),
                })
            }
        };

        Ok(Self { name, status })
    }

    /// Render the chat message announcing this item's status
    pub fn message(&self) -> String {
        format!(
            "Status of \"{}\" changed: {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Translate a raw homework object into a notification message
pub fn translate(item: &Value) -> Result<String, TranslationError> {
    TrackedItem::from_value(item).map(|tracked| tracked.message())
}
