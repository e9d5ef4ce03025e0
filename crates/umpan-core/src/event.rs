//! Events — the named occurrences feedback is submitted against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  document::{self, Entry, Keyed},
  error::ValidationError,
  input::{non_blank, text, trimmed},
};

// ─── Stored types ────────────────────────────────────────────────────────────

/// An event. Immutable once created; only ever removed as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  pub id:          u64,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub created_at:  DateTime<Utc>,
}

/// The persisted document backing the event collection.
///
/// `last_id` is the highest id ever handed out and is never decremented, so
/// ids of deleted events are not reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
  #[serde(default, deserialize_with = "document::lenient_last_id")]
  pub last_id: u64,
  #[serde(default)]
  pub events:  Vec<Entry<Event>>,
}

impl Keyed for Event {
  fn key(&self) -> u64 { self.id }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Raw body of a create-event request.
///
/// Scalars of any JSON type are accepted and read as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDraft {
  pub title:       Option<Value>,
  pub description: Option<Value>,
}

/// A validated event, ready to be assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
  pub title:       String,
  pub description: String,
}

impl EventDraft {
  pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      title:       Some(Value::String(title.into())),
      description: Some(Value::String(description.into())),
    }
  }

  /// Trim both fields and require a non-empty title.
  pub fn validate(self) -> Result<NewEvent, ValidationError> {
    let title = non_blank(text(self.title.as_ref()))
      .ok_or(ValidationError::TitleRequired)?;
    Ok(NewEvent {
      title,
      description: trimmed(self.description.as_ref()),
    })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn validate_trims_fields() {
    let new = EventDraft::new("  Launch ", " Q1\n").validate().unwrap();
    assert_eq!(new.title, "Launch");
    assert_eq!(new.description, "Q1");
  }

  #[test]
  fn description_defaults_to_empty() {
    let draft = EventDraft { title: Some("Launch".into()), description: None };
    assert_eq!(draft.validate().unwrap().description, "");
  }

  #[test]
  fn blank_title_is_rejected() {
    for title in [None, Some(json!("")), Some(json!("   \t")), Some(Value::Null), Some(json!({}))] {
      let draft = EventDraft { title, description: None };
      assert!(matches!(draft.validate(), Err(ValidationError::TitleRequired)));
    }
  }

  #[test]
  fn scalar_fields_are_read_as_text() {
    let draft: EventDraft = serde_json::from_value(json!({ "title": 5, "description": true })).unwrap();
    let new = draft.validate().unwrap();
    assert_eq!(new.title, "5");
    assert_eq!(new.description, "true");
  }

  #[test]
  fn document_tolerates_missing_fields() {
    let doc: EventDocument = serde_json::from_str(r#"{"events": []}"#).unwrap();
    assert_eq!(doc, EventDocument::default());
  }

  #[test]
  fn event_serializes_camel_case() {
    let event = Event {
      id:          3,
      title:       "Expo".into(),
      description: String::new(),
      created_at:  "2024-05-01T09:30:00.123Z".parse().unwrap(),
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["createdAt"], "2024-05-01T09:30:00.123Z");
    assert_eq!(json["id"], 3);
  }
}
