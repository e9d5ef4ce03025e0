//! [`JsonFileStore`] — the on-disk implementation of [`DocumentStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use umpan_core::store::{Collection, DocumentStore};

use crate::{Error, Result};

/// Documents stored as `<data_dir>/events.json` and `<data_dir>/feedback.json`.
///
/// The directory is created on the first write. Writes overwrite the whole
/// file in place; there is no locking against other processes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  data_dir: PathBuf,
}

impl JsonFileStore {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    Self { data_dir: data_dir.into() }
  }

  pub fn data_dir(&self) -> &Path { &self.data_dir }

  /// Path of the file backing `collection`.
  pub fn path(&self, collection: Collection) -> PathBuf {
    self.data_dir.join(collection.file_name())
  }
}

impl DocumentStore for JsonFileStore {
  type Error = Error;

  async fn read(&self, collection: Collection) -> Result<Option<String>> {
    let path = self.path(collection);
    match tokio::fs::read_to_string(&path).await {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(source) => Err(Error::Read { path, source }),
    }
  }

  async fn write(&self, collection: Collection, contents: String) -> Result<()> {
    tokio::fs::create_dir_all(&self.data_dir)
      .await
      .map_err(|source| Error::CreateDir {
        path: self.data_dir.clone(),
        source,
      })?;

    let path = self.path(collection);
    tokio::fs::write(&path, contents)
      .await
      .map_err(|source| Error::Write { path: path.clone(), source })?;

    tracing::debug!(?path, "document written");
    Ok(())
  }
}
