//! Coercion of loosely-typed request fields.
//!
//! Form posts carry every field as a string while JSON posts may carry
//! numbers or booleans; both are read as text here.

use serde_json::Value;

/// Render a scalar as text. Objects, arrays and null count as absent.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
  match value? {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  }
}

/// Trimmed text, or `None` when nothing is left.
pub(crate) fn non_blank(s: Option<String>) -> Option<String> {
  s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Trimmed text, empty when absent.
pub(crate) fn trimmed(value: Option<&Value>) -> String {
  text(value).map(|s| s.trim().to_owned()).unwrap_or_default()
}
