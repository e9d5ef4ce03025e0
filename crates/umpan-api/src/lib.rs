//! JSON API for umpan.
//!
//! Exposes an axum [`Router`] backed by a [`Registry`] over any
//! [`DocumentStore`]. Static pages, TLS and middleware are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", umpan_api::api_router(registry.clone()))
//! ```

pub mod error;
pub mod events;
pub mod extract;
pub mod feedback;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use umpan_core::{Registry, store::DocumentStore};

pub use error::ApiError;

/// Build the API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(registry: Arc<Registry<S>>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route("/events/{id}/delete", post(events::delete_one::<S>))
    // Feedback
    .route("/submit", post(feedback::submit::<S>))
    .route("/feedback", get(feedback::list::<S>))
    .route("/feedback/export", get(feedback::export::<S>))
    .route("/feedback/{id}/delete", post(feedback::delete_one::<S>))
    .with_state(registry)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
