//! HTTP server wiring for umpan.
//!
//! Mounts the JSON API under `/api`, adds a health probe, request tracing and
//! panic recovery, and loads the runtime configuration.

use std::{
  any::Any,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Json, Router,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use umpan_core::{Registry, store::DocumentStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Environment variable prefix, e.g. `UMPAN_PORT=8080`.
pub const ENV_PREFIX: &str = "UMPAN";

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:     String,
  pub port:     u16,
  /// Directory holding `events.json` and `feedback.json`.
  pub data_dir: PathBuf,
}

impl ServerConfig {
  /// Layer built-in defaults, the optional TOML file at `path`, and
  /// `UMPAN_*` environment variables, in increasing precedence.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("data_dir", "data")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(registry: Arc<Registry<S>>) -> Router
where
  S: DocumentStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", umpan_api::api_router(registry))
    .fallback(not_found)
    .layer(CatchPanicLayer::custom(internal_error))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "OK" }

async fn not_found() -> impl IntoResponse { (StatusCode::NOT_FOUND, "Not Found") }

fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = panic
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| panic.downcast_ref::<&str>().copied())
    .unwrap_or("unknown panic");
  tracing::error!(detail, "handler panicked");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({ "message": "internal error" })),
  )
    .into_response()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
