//! Field rules shared by the knowledge base services.

use serde_json::Value as JsonValue;

use super::ServiceError;

/// Upper bound for names and titles, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// A required text field: non-blank and at most [`MAX_TEXT_LEN`] characters.
pub fn required_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(
            field,
            format!("The {} field is required.", field),
        ));
    }
    max_length(field, value)
}

pub fn max_length(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ServiceError::validation(
            field,
            format!(
                "The {} may not be greater than {} characters.",
                field, MAX_TEXT_LEN
            ),
        ));
    }
    Ok(())
}

/// Whether a partial-update value counts as "not provided".
///
/// Null, the empty string, and empty arrays or objects are blank. Numbers
/// and booleans never are, so an `order` of 0 still overwrites.
pub fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}
