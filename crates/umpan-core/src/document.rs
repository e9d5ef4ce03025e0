//! Loading and saving whole documents through a [`DocumentStore`].
//!
//! Reads never fail: a missing, empty, unreadable or malformed document
//! degrades to the empty default so that a damaged file turns into an empty
//! collection instead of a failed request. Writes overwrite the full document
//! with pretty-printed JSON.
//!
//! Within a well-formed document, an entry that no longer fits the typed
//! schema is kept as an [`Entry::Raw`] value: it is hidden from reads but
//! written back unchanged, and its id still counts when allocating new ids.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  Error, Result,
  store::{Collection, DocumentStore},
};

/// Load the document for `collection`, falling back to `D::default()`.
pub async fn load<S, D>(store: &S, collection: Collection) -> D
where
  S: DocumentStore,
  D: DeserializeOwned + Default,
{
  let raw = match store.read(collection).await {
    Ok(Some(raw)) => raw,
    Ok(None) => return D::default(),
    Err(e) => {
      tracing::warn!(%collection, error = %e, "could not read document, using empty default");
      return D::default();
    }
  };

  if raw.trim().is_empty() {
    return D::default();
  }

  serde_json::from_str(&raw).unwrap_or_else(|e| {
    tracing::warn!(%collection, error = %e, "malformed document, using empty default");
    D::default()
  })
}

/// Serialise `doc` and overwrite the document for `collection`.
pub async fn save<S, D>(store: &S, collection: Collection, doc: &D) -> Result<()>
where
  S: DocumentStore,
  D: Serialize,
{
  let contents = serde_json::to_string_pretty(doc)?;
  store.write(collection, contents).await.map_err(|e| {
    tracing::error!(%collection, error = %e, "could not save document");
    Error::Storage {
      collection,
      source: Box::new(e),
    }
  })
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// A stored record carrying a numeric id.
pub trait Keyed {
  fn key(&self) -> u64;
}

/// One element of a stored collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry<T> {
  Typed(T),
  /// Valid JSON that does not match `T`, preserved verbatim.
  Raw(Value),
}

impl<T: Keyed> Entry<T> {
  pub fn typed(&self) -> Option<&T> {
    match self {
      Self::Typed(t) => Some(t),
      Self::Raw(_) => None,
    }
  }

  pub fn into_typed(self) -> Option<T> {
    match self {
      Self::Typed(t) => Some(t),
      Self::Raw(_) => None,
    }
  }

  /// The entry's id, if a raw entry still has a usable one.
  pub fn id(&self) -> Option<u64> {
    match self {
      Self::Typed(t) => Some(t.key()),
      Self::Raw(v) => v.get("id").and_then(Value::as_u64),
    }
  }
}

/// Typed entries only, in stored order.
pub fn typed<T: Keyed>(entries: Vec<Entry<T>>) -> Vec<T> {
  entries.into_iter().filter_map(Entry::into_typed).collect()
}

/// Number of entries that could not be read as `T`.
pub fn raw_count<T>(entries: &[Entry<T>]) -> usize {
  entries.iter().filter(|e| matches!(e, Entry::Raw(_))).count()
}

/// The id after both `last_id` and every stored id.
///
/// `None` once the id space is exhausted.
pub fn next_id<T: Keyed>(last_id: u64, entries: &[Entry<T>]) -> Option<u64> {
  entries
    .iter()
    .filter_map(Entry::id)
    .fold(last_id, u64::max)
    .checked_add(1)
}

/// Read `lastId` leniently: anything but a non-negative integer counts as 0.
pub fn lenient_last_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Value::deserialize(deserializer)?.as_u64().unwrap_or(0))
}
