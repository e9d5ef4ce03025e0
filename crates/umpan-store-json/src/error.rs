//! Error type for `umpan-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("could not read {path:?}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("could not create data directory {path:?}: {source}")]
  CreateDir {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("could not write {path:?}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
