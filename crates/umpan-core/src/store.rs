//! The `DocumentStore` trait and an in-memory implementation.
//!
//! A store only moves raw document text in and out. Parsing, fallback on
//! unreadable documents, and pretty-printing live in [`crate::document`], so
//! every backend gets the same tolerant-read policy.
//!
//! No backend is required to provide locking or crash atomicity; the last
//! write to a collection wins.

use std::{
  collections::HashMap,
  fmt,
  future::Future,
  sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
  },
};

use thiserror::Error;

// ─── Collections ─────────────────────────────────────────────────────────────

/// The independently persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Events,
  Feedback,
}

impl Collection {
  pub fn name(self) -> &'static str {
    match self {
      Self::Events => "events",
      Self::Feedback => "feedback",
    }
  }

  /// File name used by file-backed stores.
  pub fn file_name(self) -> &'static str {
    match self {
      Self::Events => "events.json",
      Self::Feedback => "feedback.json",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Raw persistence for one document per [`Collection`].
///
/// All methods return `Send` futures so stores can be shared across a
/// multi-threaded runtime behind `axum`.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the document text, or `None` if it has never been written.
  fn read(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Replace the document text, creating it if needed.
  fn write(
    &self,
    collection: Collection,
    contents: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("write to {0} rejected")]
pub struct WriteRejected(pub Collection);

/// A [`DocumentStore`] that keeps documents in a map. Useful for testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
  docs:        Mutex<HashMap<Collection, String>>,
  fail_writes: AtomicBool,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Seed a collection with raw document text.
  pub fn with_document(self, collection: Collection, contents: impl Into<String>) -> Self {
    self.put(collection, contents.into());
    self
  }

  /// Make every subsequent write fail (or succeed again).
  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// The current raw text of a collection.
  pub fn document(&self, collection: Collection) -> Option<String> {
    self
      .docs
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(&collection)
      .cloned()
  }

  fn put(&self, collection: Collection, contents: String) {
    self
      .docs
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(collection, contents);
  }
}

impl DocumentStore for MemoryStore {
  type Error = WriteRejected;

  async fn read(&self, collection: Collection) -> Result<Option<String>, WriteRejected> {
    Ok(self.document(collection))
  }

  async fn write(&self, collection: Collection, contents: String) -> Result<(), WriteRejected> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(WriteRejected(collection));
    }
    self.put(collection, contents);
    Ok(())
  }
}
