//! Untyped request fields shared by the resource handlers.
//!
//! Bodies are read as raw JSON values so that a missing field, an explicit
//! `null` and a value of the wrong type each get their own message.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::config::{
    MAX_TEXT_FIELD_LENGTH, MSG_BLANK, MSG_INVALID_BOOLEAN, MSG_INVALID_STRING, MSG_NULL,
    MSG_REQUIRED, MSG_TOO_LONG,
};

/// Distinguishes an explicit `null` from an absent field
pub(crate) fn present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new("invalid");
    error.message = Some(message.into());
    error
}

/// Parse one field, recording its message on failure.
///
/// Absent fields are skipped when `partial`, otherwise reported as required.
pub(crate) fn check<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&Value>,
    partial: bool,
    parse: fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match value {
        None if partial => None,
        None => {
            errors.add(field, invalid(MSG_REQUIRED));
            None
        }
        Some(value) => match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.add(field, invalid(message));
                None
            }
        },
    }
}

/// Trimmed, non-blank text of at most 255 characters.
///
/// Numbers are taken as their decimal text; booleans and containers are not text.
pub(crate) fn parse_text(value: &Value) -> Result<String, String> {
    let text = match value {
        Value::Null => return Err(MSG_NULL.to_string()),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(MSG_INVALID_STRING.to_string()),
    };

    if text.is_empty() {
        Err(MSG_BLANK.to_string())
    } else if text.chars().count() as u64 > MAX_TEXT_FIELD_LENGTH {
        Err(MSG_TOO_LONG.to_string())
    } else {
        Ok(text)
    }
}

/// JSON booleans, `1`/`0`, and the usual textual spellings
pub(crate) fn parse_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(MSG_INVALID_BOOLEAN.to_string()),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(MSG_INVALID_BOOLEAN.to_string()),
        },
        _ => Err(MSG_INVALID_BOOLEAN.to_string()),
    }
}
