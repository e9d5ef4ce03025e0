//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | All events, oldest first |
//! | `POST` | `/events` | Body: `{"title":"...","description":"..."}` |
//! | `POST` | `/events/{id}/delete` | Always `{"ok":true}`, even for unknown ids |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};
use umpan_core::{
  Registry,
  event::{Event, EventDraft},
  id::IdRef,
  store::DocumentStore,
};

use crate::{error::ApiError, extract::Payload};

/// `GET /events`
pub async fn list<S>(State(registry): State<Arc<Registry<S>>>) -> Json<Vec<Event>>
where
  S: DocumentStore,
{
  Json(registry.list_events().await)
}

/// `POST /events` — returns `{"ok":true,"event":{...}}`.
pub async fn create<S>(
  State(registry): State<Arc<Registry<S>>>,
  Payload(draft): Payload<EventDraft>,
) -> Result<Json<Value>, ApiError>
where
  S: DocumentStore,
{
  let event = registry.create_event(draft).await?;
  Ok(Json(json!({ "ok": true, "event": event })))
}

/// `POST /events/{id}/delete`
pub async fn delete_one<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: DocumentStore,
{
  registry.delete_event(&IdRef::parse(&id)).await?;
  Ok(Json(json!({ "ok": true })))
}
