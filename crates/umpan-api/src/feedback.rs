//! Handlers for feedback endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/submit` | Body: [`FeedbackSubmission`], JSON or form |
//! | `GET`  | `/feedback` | Optional `eventId`, `visitorType`, `from`, `to`, `search` |
//! | `POST` | `/feedback/{id}/delete` | Always `{"ok":true}`, even for unknown ids |
//! | `GET`  | `/feedback/export` | Optional `eventId`; served as a download |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::header,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};
use umpan_core::{
  Registry,
  feedback::{FeedbackItem, FeedbackSubmission},
  id::IdRef,
  query::{FeedbackFilter, FeedbackQuery},
  store::DocumentStore,
};

use crate::{error::ApiError, extract::Payload};

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /submit` — returns `{"message":"ok","item":{...}}`.
pub async fn submit<S>(
  State(registry): State<Arc<Registry<S>>>,
  Payload(submission): Payload<FeedbackSubmission>,
) -> Result<Json<Value>, ApiError>
where
  S: DocumentStore,
{
  let item = registry.submit_feedback(submission).await?;
  Ok(Json(json!({ "message": "ok", "item": item })))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /feedback[?eventId=...][&visitorType=...][&from=...][&to=...][&search=...]`
pub async fn list<S>(
  State(registry): State<Arc<Registry<S>>>,
  Query(query): Query<FeedbackQuery>,
) -> Json<Vec<FeedbackItem>>
where
  S: DocumentStore,
{
  Json(registry.list_feedback(&FeedbackFilter::from(&query)).await)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `POST /feedback/{id}/delete`
pub async fn delete_one<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: DocumentStore,
{
  registry.delete_feedback(&IdRef::parse(&id)).await?;
  Ok(Json(json!({ "ok": true })))
}

// ─── Export ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
  pub event_id: Option<String>,
}

/// `GET /feedback/export[?eventId=...]` — JSON array with a
/// `Content-Disposition: attachment` header.
pub async fn export<S>(
  State(registry): State<Arc<Registry<S>>>,
  Query(params): Query<ExportParams>,
) -> impl IntoResponse
where
  S: DocumentStore,
{
  let event = params
    .event_id
    .as_deref()
    .filter(|s| !s.trim().is_empty())
    .map(IdRef::parse);
  let export = registry.export_feedback(event).await;
  (
    [(
      header::CONTENT_DISPOSITION,
      format!("attachment; filename={}", export.file_name),
    )],
    Json(export.body),
  )
}
