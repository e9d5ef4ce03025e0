//! Tests for `JsonFileStore` against a temporary directory.

use serde_json::{Value, json};
use umpan_core::{
  Registry,
  event::EventDraft,
  id::IdRef,
  query::FeedbackFilter,
  store::{Collection, DocumentStore},
};

use crate::{Error, JsonFileStore};

fn read_json(store: &JsonFileStore, collection: Collection) -> Value {
  let raw = std::fs::read_to_string(store.path(collection)).expect("document on disk");
  serde_json::from_str(&raw).expect("valid json")
}

// ─── Raw documents ───────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_file_reads_as_none() {
  let dir = tempfile::tempdir().unwrap();
  let store = JsonFileStore::new(dir.path());
  assert!(store.read(Collection::Events).await.unwrap().is_none());
}

#[tokio::test]
async fn write_creates_nested_data_dir() {
  let dir = tempfile::tempdir().unwrap();
  let data_dir = dir.path().join("var").join("umpan");
  let store = JsonFileStore::new(&data_dir);

  store
    .write(Collection::Feedback, "{}".to_string())
    .await
    .unwrap();

  assert!(data_dir.join("feedback.json").is_file());
  assert_eq!(
    store.read(Collection::Feedback).await.unwrap().as_deref(),
    Some("{}")
  );
}

#[tokio::test]
async fn write_overwrites_previous_contents() {
  let dir = tempfile::tempdir().unwrap();
  let store = JsonFileStore::new(dir.path());

  store.write(Collection::Events, "first, and longer".into()).await.unwrap();
  store.write(Collection::Events, "second".into()).await.unwrap();

  assert_eq!(
    store.read(Collection::Events).await.unwrap().as_deref(),
    Some("second")
  );
}

#[tokio::test]
async fn unwritable_data_dir_is_reported() {
  let dir = tempfile::tempdir().unwrap();
  let blocker = dir.path().join("not-a-dir");
  std::fs::write(&blocker, "file in the way").unwrap();

  let store = JsonFileStore::new(&blocker);
  let err = store.write(Collection::Events, "{}".into()).await.unwrap_err();
  assert!(matches!(err, Error::CreateDir { .. }));
}

// ─── Through the registry ────────────────────────────────────────────────────

#[tokio::test]
async fn events_persist_as_pretty_json() {
  let dir = tempfile::tempdir().unwrap();
  let registry = Registry::new(JsonFileStore::new(dir.path()));

  let event = registry
    .create_event(EventDraft::new("Launch", "Q1"))
    .await
    .unwrap();

  let raw = std::fs::read_to_string(dir.path().join("events.json")).unwrap();
  assert!(raw.contains("\n  \"lastId\": 1,"), "not pretty-printed: {raw}");

  let doc = read_json(registry.store(), Collection::Events);
  assert_eq!(doc["lastId"], 1);
  assert_eq!(doc["events"][0]["id"], event.id);
  assert_eq!(doc["events"][0]["title"], "Launch");
  assert_eq!(doc["events"][0]["description"], "Q1");
  assert!(doc["events"][0]["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn state_survives_reopening() {
  let dir = tempfile::tempdir().unwrap();
  {
    let registry = Registry::new(JsonFileStore::new(dir.path()));
    registry.create_event(EventDraft::new("A", "")).await.unwrap();
    registry.create_event(EventDraft::new("B", "")).await.unwrap();
    registry.delete_event(&IdRef::from(2)).await.unwrap();
  }

  let registry = Registry::new(JsonFileStore::new(dir.path()));
  let c = registry.create_event(EventDraft::new("C", "")).await.unwrap();
  assert_eq!(c.id, 3);
  let titles: Vec<_> = registry
    .list_events()
    .await
    .into_iter()
    .map(|e| e.title)
    .collect();
  assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn corrupt_file_reads_as_empty_collection() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("feedback.json"), "{\"items\": [oops").unwrap();
  std::fs::write(dir.path().join("events.json"), "").unwrap();

  let registry = Registry::new(JsonFileStore::new(dir.path()));
  assert!(registry.list_events().await.is_empty());
  assert!(registry.list_feedback(&FeedbackFilter::default()).await.is_empty());
}

#[tokio::test]
async fn hand_written_documents_are_accepted() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(
    dir.path().join("events.json"),
    json!({
      "lastId": 7,
      "events": [
        { "id": 7, "title": "Legacy", "createdAt": "2023-11-02T10:00:00.000Z" }
      ]
    })
    .to_string(),
  )
  .unwrap();

  let registry = Registry::new(JsonFileStore::new(dir.path()));
  let events = registry.list_events().await;
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].description, "");

  let submission = serde_json::from_value(json!({
    "name": "Sari",
    "email": "sari@example.com",
    "eventId": "7",
    "ratings": { "overall": 5 },
  }))
  .unwrap();
  let item = registry.submit_feedback(submission).await.unwrap();
  assert_eq!(item.event_id, 7);

  let doc = read_json(registry.store(), Collection::Feedback);
  assert_eq!(doc["lastId"], 1);
  assert_eq!(doc["items"][0]["eventId"], 7);
  assert_eq!(doc["items"][0]["visitorType"], "umum");
}

#[tokio::test]
async fn unreadable_entries_stay_on_disk() {
  let dir = tempfile::tempdir().unwrap();
  let odd = json!({ "id": 3, "title": "Hand edited", "createdAt": "sometime" });
  std::fs::write(
    dir.path().join("events.json"),
    json!({
      "events": [
        { "id": 1, "title": "Legacy", "createdAt": "2023-11-02T10:00:00.000Z" },
        odd,
      ]
    })
    .to_string(),
  )
  .unwrap();

  let registry = Registry::new(JsonFileStore::new(dir.path()));
  assert_eq!(registry.list_events().await.len(), 1);

  let event = registry.create_event(EventDraft::new("New", "")).await.unwrap();
  assert_eq!(event.id, 4);

  let doc = read_json(registry.store(), Collection::Events);
  assert_eq!(doc["lastId"], 4);
  assert_eq!(doc["events"][1], odd);
  assert_eq!(doc["events"][2]["title"], "New");
}
