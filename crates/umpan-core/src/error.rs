//! Error types for `umpan-core`.

use thiserror::Error;

use crate::store::Collection;

/// Why a caller-supplied payload was rejected.
///
/// The `Display` output is the message returned to clients, so it is kept
/// short and stable.
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("title required")]
  TitleRequired,

  #[error("name, email, and eventId are required")]
  MissingRequired,

  #[error("eventId must be a number")]
  EventIdNotNumeric,

  #[error("ratings invalid JSON")]
  RatingsInvalidJson(#[source] serde_json::Error),

  #[error("ratings required (object)")]
  RatingsNotObject,

  #[error("employeeId is required for internal visitors")]
  EmployeeIdRequired,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The feedback referenced an event id absent from the event collection.
  #[error("eventId not found")]
  EventNotFound(f64),

  #[error("could not save {collection}")]
  Storage {
    collection: Collection,
    #[source]
    source:     Box<dyn std::error::Error + Send + Sync>,
  },

  /// The next id would not fit in a `u64`.
  #[error("{0} ids exhausted")]
  IdsExhausted(Collection),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
