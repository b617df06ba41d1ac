//! Shape checks for status endpoint responses

use serde_json::Value;

use crate::error::ValidationError;

/// JSON key holding the homework list
pub const HOMEWORKS_FIELD: &str = "homeworks";
/// JSON key holding the server timestamp for the next poll
pub const CURRENT_DATE_FIELD: &str = "current_date";

/// A status response that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// Raw homework objects, newest first
    pub homeworks: Vec<Value>,
    /// Server time to use as the next watermark
    pub current_date: u64,
}

/// Check that `raw` carries a homework list and a current date.
///
/// Items are passed through untouched; their fields are checked when they
/// are translated.
pub fn validate(raw: &Value) -> Result<FetchResponse, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAMapping)?;

    let homeworks = object
        .get(HOMEWORKS_FIELD)
        .ok_or(ValidationError::MissingField {
            field: HOMEWORKS_FIELD,
        })?;
    let current_date = object
        .get(CURRENT_DATE_FIELD)
        .ok_or(ValidationError::MissingField {
            field: CURRENT_DATE_FIELD,
        })?;

    let homeworks = homeworks
        .as_array()
        .ok_or(ValidationError::WrongType {
            field: HOMEWORKS_FIELD,
            expected: "a list",
        })?;
    let current_date = current_date
        .as_u64()
        .ok_or(ValidationError::WrongType {
            field: CURRENT_DATE_FIELD,
            expected: "a non-negative integer",
        })?;

    Ok(FetchResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}
