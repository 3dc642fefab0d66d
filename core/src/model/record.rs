// core/src/model/record.rs

//! Typed field readers over plain JSON records.
//!
//! Every reader checks presence and type before use; nothing falls back to a
//! default silently. `entity` only feeds the error message.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// A JSON object borrowed from a request body or a serialized aggregate.
pub type Record = Map<String, Value>;

/// Views `value` as an object, or reports the payload as bad data.
pub fn as_record<'a>(entity: &'static str, value: &'a Value) -> Result<&'a Record, ValidationError> {
  value.as_object().ok_or_else(|| ValidationError::BadData {
    entity,
    detail: format!("expected a JSON object, found {}", kind_of(value)),
  })
}

/// Looks up a required key. An explicit `null` counts as missing.
pub fn require<'a>(entity: &'static str, record: &'a Record, field: &str) -> Result<&'a Value, ValidationError> {
  match record.get(field) {
    Some(Value::Null) | None => Err(ValidationError::MissingField {
      entity,
      field: field.to_string(),
    }),
    Some(value) => Ok(value),
  }
}

/// Reads a required string and trims it; empty after trimming is rejected.
pub fn read_name(entity: &'static str, record: &Record, field: &str) -> Result<String, ValidationError> {
  let value = require(entity, record, field)?;
  let raw = value.as_str().ok_or_else(|| invalid(entity, field, format!("must be a string, found {}", kind_of(value))))?;
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::EmptyName {
      entity,
      field: field.to_string(),
    });
  }
  Ok(trimmed.to_string())
}

/// Reads a required integer.
///
/// A float is accepted only when the cast to `i64` loses nothing, so `1.0`
/// reads as `1` while `1.2` is rejected. Strings and booleans are rejected.
pub fn read_integer(entity: &'static str, record: &Record, field: &str) -> Result<i64, ValidationError> {
  let value = require(entity, record, field)?;
  integral(value).ok_or_else(|| invalid(entity, field, format!("must be an integer, found {}", describe(value))))
}

/// Reads a required float. Numbers and numeric strings convert; the result
/// must be finite.
pub fn read_float(entity: &'static str, record: &Record, field: &str) -> Result<f64, ValidationError> {
  let value = require(entity, record, field)?;
  let parsed = match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  match parsed {
    Some(f) if f.is_finite() => Ok(f),
    _ => Err(invalid(entity, field, format!("must be a number, found {}", describe(value)))),
  }
}

fn integral(value: &Value) -> Option<i64> {
  let Value::Number(n) = value else {
    return None;
  };
  if let Some(i) = n.as_i64() {
    return Some(i);
  }
  let f = n.as_f64()?;
  // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
  if f.is_finite() && f.trunc() == f && f >= i64::MIN as f64 && f < i64::MAX as f64 {
    let cast = f as i64;
    if cast as f64 == f {
      return Some(cast);
    }
  }
  None
}

fn invalid(entity: &'static str, field: &str, reason: String) -> ValidationError {
  ValidationError::InvalidField {
    entity,
    field: field.to_string(),
    reason,
  }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

fn describe(value: &Value) -> String {
  match value {
    Value::Number(n) => n.to_string(),
    Value::String(s) => format!("{:?}", s),
    other => kind_of(other).to_string(),
  }
}
