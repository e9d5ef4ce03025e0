//! Feedback items and the parsing step that turns a loosely-typed submission
//! into validated, typed fields.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  document::{self, Entry, Keyed},
  error::ValidationError,
  input::{non_blank, text, trimmed},
};

/// Open-ended score mapping, e.g. `{"venue": 5, "speakers": 4}`.
pub type Ratings = serde_json::Map<String, Value>;

// ─── Visitor type ────────────────────────────────────────────────────────────

/// Classification of the person submitting feedback.
///
/// Serialised as its plain string form; unknown values round-trip through
/// [`VisitorType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisitorType {
  /// Staff; an employee id is mandatory.
  Internal,
  /// General public.
  #[default]
  Umum,
  Other(String),
}

impl VisitorType {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Internal => "internal",
      Self::Umum => "umum",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for VisitorType {
  fn from(s: String) -> Self {
    match s.as_str() {
      "internal" => Self::Internal,
      "umum" => Self::Umum,
      _ => Self::Other(s),
    }
  }
}

impl From<VisitorType> for String {
  fn from(v: VisitorType) -> Self {
    match v {
      VisitorType::Other(s) => s,
      other => other.as_str().to_owned(),
    }
  }
}

impl fmt::Display for VisitorType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Stored types ────────────────────────────────────────────────────────────

/// One visitor's submitted ratings and comments for one event.
///
/// `event_id` referenced an existing event when the item was created. Later
/// deletion of that event leaves the item in place with a dangling id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
  pub id:           u64,
  pub event_id:     u64,
  pub name:         String,
  #[serde(default)]
  pub visitor_type: VisitorType,
  #[serde(default)]
  pub employee_id:  String,
  pub email:        String,
  pub ratings:      Ratings,
  /// Suggestion.
  #[serde(default)]
  pub saran:        String,
  /// Critique.
  #[serde(default)]
  pub kritik:       String,
  pub created_at:   DateTime<Utc>,
}

/// The persisted document backing the feedback collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDocument {
  #[serde(default, deserialize_with = "document::lenient_last_id")]
  pub last_id: u64,
  #[serde(default)]
  pub items:   Vec<Entry<FeedbackItem>>,
}

impl Keyed for FeedbackItem {
  fn key(&self) -> u64 { self.id }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// Raw body of a feedback submission.
///
/// Every field is kept as an untyped JSON value so that form posts (all
/// strings) and JSON posts (numbers, nested objects) share one parsing path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
  pub name:         Option<Value>,
  pub visitor_type: Option<Value>,
  pub employee_id:  Option<Value>,
  pub email:        Option<Value>,
  pub event_id:     Option<Value>,
  /// An object, or a string holding a JSON-encoded object.
  pub ratings:      Option<Value>,
  pub saran:        Option<Value>,
  pub kritik:       Option<Value>,
}

/// A submission whose fields passed validation.
///
/// `event_id` is still the number the caller sent; it becomes a stored id
/// only after it has been checked against the event collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
  pub event_id:     f64,
  pub name:         String,
  pub visitor_type: VisitorType,
  pub employee_id:  String,
  pub email:        String,
  pub ratings:      Ratings,
  pub saran:        String,
  pub kritik:       String,
}

impl FeedbackSubmission {
  /// Names of the fields the caller sent, for logging without their values.
  pub fn present_fields(&self) -> Vec<&'static str> {
    [
      ("name", &self.name),
      ("visitorType", &self.visitor_type),
      ("employeeId", &self.employee_id),
      ("email", &self.email),
      ("eventId", &self.event_id),
      ("ratings", &self.ratings),
      ("saran", &self.saran),
      ("kritik", &self.kritik),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_some())
    .map(|(name, _)| name)
    .collect()
  }

  /// Run the validation pipeline. The first failing check wins.
  pub fn validate(self) -> Result<NewFeedback, ValidationError> {
    let name = text(self.name.as_ref());
    let email = text(self.email.as_ref());
    let (Some(name), Some(email), Some(event_id)) = (
      non_blank(name),
      non_blank(email),
      self.event_id.as_ref().filter(|v| !v.is_null()),
    ) else {
      return Err(ValidationError::MissingRequired);
    };

    let event_id = numeric(event_id).ok_or(ValidationError::EventIdNotNumeric)?;
    let ratings = parse_ratings(self.ratings)?;

    // Compared and stored as sent; only an empty value falls back to the default.
    let visitor_type = text(self.visitor_type.as_ref())
      .filter(|s| !s.is_empty())
      .map(VisitorType::from)
      .unwrap_or_default();
    let employee_id = text(self.employee_id.as_ref())
      .map(|s| s.trim().to_owned())
      .unwrap_or_default();
    if visitor_type == VisitorType::Internal && employee_id.is_empty() {
      return Err(ValidationError::EmployeeIdRequired);
    }

    Ok(NewFeedback {
      event_id,
      name,
      visitor_type,
      employee_id,
      email,
      ratings,
      saran: trimmed(self.saran.as_ref()),
      kritik: trimmed(self.kritik.as_ref()),
    })
  }
}

fn numeric(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) if !s.trim().is_empty() => {
      s.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
    }
    _ => None,
  }
}

fn parse_ratings(value: Option<Value>) -> Result<Ratings, ValidationError> {
  let value = match value {
    Some(Value::String(raw)) => {
      serde_json::from_str(&raw).map_err(ValidationError::RatingsInvalidJson)?
    }
    Some(v) => v,
    None => return Err(ValidationError::RatingsNotObject),
  };
  match value {
    Value::Object(map) => Ok(map),
    _ => Err(ValidationError::RatingsNotObject),
  }
}
