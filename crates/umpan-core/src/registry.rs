//! [`Registry`] — the operations over the event and feedback collections.
//!
//! Every write is a full load → mutate → save cycle against the injected
//! [`DocumentStore`]. Writers to the same collection within this process are
//! serialised by a per-collection lock, so interleaved requests cannot drop
//! each other's changes. Other processes writing the same documents are not
//! coordinated with; the last save wins.

use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::Mutex;

use crate::{
  Error, Result,
  document::{self, Entry},
  event::{Event, EventDocument, EventDraft},
  feedback::{FeedbackDocument, FeedbackItem, FeedbackSubmission},
  id::IdRef,
  query::FeedbackFilter,
  store::{Collection, DocumentStore},
};

/// File name offered to clients downloading a feedback export.
pub const EXPORT_FILE_NAME: &str = "feedback.json";

/// A payload meant to be delivered as a named download.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment<T> {
  pub file_name: &'static str,
  pub body:      T,
}

pub struct Registry<S> {
  store:         S,
  events_lock:   Mutex<()>,
  feedback_lock: Mutex<()>,
}

impl<S: DocumentStore> Registry<S> {
  pub fn new(store: S) -> Self {
    Self {
      store,
      events_lock: Mutex::new(()),
      feedback_lock: Mutex::new(()),
    }
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Events ────────────────────────────────────────────────────────────

  /// All events, oldest first.
  pub async fn list_events(&self) -> Vec<Event> {
    document::typed(self.load_events().await.events)
  }

  /// Validate `draft`, assign it the next id and persist it.
  pub async fn create_event(&self, draft: EventDraft) -> Result<Event> {
    let new = draft.validate()?;

    let _guard = self.events_lock.lock().await;
    let mut doc = self.load_events().await;

    let id = document::next_id(doc.last_id, &doc.events)
      .ok_or(Error::IdsExhausted(Collection::Events))?;
    let event = Event {
      id,
      title:       new.title,
      description: new.description,
      created_at:  now(),
    };
    doc.last_id = id;
    doc.events.push(Entry::Typed(event.clone()));
    document::save(&self.store, Collection::Events, &doc).await?;

    tracing::info!(id = event.id, title = %event.title, "event created");
    Ok(event)
  }

  /// Remove every event matching `id`. Unknown ids are not an error.
  ///
  /// Feedback that references the event is left untouched.
  pub async fn delete_event(&self, id: &IdRef) -> Result<()> {
    let _guard = self.events_lock.lock().await;
    let mut doc = self.load_events().await;

    let before = doc.events.len();
    doc.events.retain(|e| !e.id().is_some_and(|n| id.matches(n)));
    document::save(&self.store, Collection::Events, &doc).await?;

    tracing::info!(%id, removed = before - doc.events.len(), "events deleted");
    Ok(())
  }

  async fn load_events(&self) -> EventDocument {
    let doc: EventDocument = document::load(&self.store, Collection::Events).await;
    let skipped = document::raw_count(&doc.events);
    if skipped > 0 {
      tracing::warn!(skipped, "unreadable events kept as stored");
    }
    doc
  }

  // ── Feedback ──────────────────────────────────────────────────────────

  /// Validate a submission, check its event exists, and persist it.
  pub async fn submit_feedback(&self, submission: FeedbackSubmission) -> Result<FeedbackItem> {
    tracing::debug!(
      event_id = ?submission.event_id,
      fields = ?submission.present_fields(),
      "feedback submitted"
    );
    let new = submission.validate()?;

    let events = self.load_events().await;
    let event_id = events
      .events
      .iter()
      .filter_map(Entry::id)
      .find(|&id| id as f64 == new.event_id)
      .ok_or(Error::EventNotFound(new.event_id))?;

    let _guard = self.feedback_lock.lock().await;
    let mut doc = self.load_feedback().await;

    let id = document::next_id(doc.last_id, &doc.items)
      .ok_or(Error::IdsExhausted(Collection::Feedback))?;
    let item = FeedbackItem {
      id,
      event_id,
      name: new.name,
      visitor_type: new.visitor_type,
      employee_id: new.employee_id,
      email: new.email,
      ratings: new.ratings,
      saran: new.saran,
      kritik: new.kritik,
      created_at: now(),
    };
    doc.last_id = id;
    doc.items.push(Entry::Typed(item.clone()));
    document::save(&self.store, Collection::Feedback, &doc).await?;

    tracing::info!(id = item.id, event_id, "feedback stored");
    Ok(item)
  }

  /// Feedback matching `filter`, in submission order.
  pub async fn list_feedback(&self, filter: &FeedbackFilter) -> Vec<FeedbackItem> {
    filter.apply(document::typed(self.load_feedback().await.items))
  }

  /// Remove every feedback item matching `id`. Unknown ids are not an error.
  pub async fn delete_feedback(&self, id: &IdRef) -> Result<()> {
    let _guard = self.feedback_lock.lock().await;
    let mut doc = self.load_feedback().await;

    let before = doc.items.len();
    doc.items.retain(|i| !i.id().is_some_and(|n| id.matches(n)));
    document::save(&self.store, Collection::Feedback, &doc).await?;

    tracing::info!(%id, removed = before - doc.items.len(), "feedback deleted");
    Ok(())
  }

  /// All feedback, or the feedback for one event, packaged for download.
  ///
  /// The event filter uses the same matching as [`Self::list_feedback`].
  pub async fn export_feedback(&self, event: Option<IdRef>) -> Attachment<Vec<FeedbackItem>> {
    let items = document::typed(self.load_feedback().await.items);
    let body = match event {
      Some(event) => FeedbackFilter::for_event(event).apply(items),
      None => items,
    };
    Attachment {
      file_name: EXPORT_FILE_NAME,
      body,
    }
  }

  async fn load_feedback(&self) -> FeedbackDocument {
    let doc: FeedbackDocument = document::load(&self.store, Collection::Feedback).await;
    let skipped = document::raw_count(&doc.items);
    if skipped > 0 {
      tracing::warn!(skipped, "unreadable feedback items kept as stored");
    }
    doc
  }
}

/// Creation timestamp, at the millisecond precision stored on disk.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }
