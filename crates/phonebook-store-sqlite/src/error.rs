//! Error type for `phonebook-store-sqlite`.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("database operation timed out after {0:?}")]
  Timeout(Duration),
}

impl From<Error> for phonebook_core::Error {
  fn from(err: Error) -> Self { phonebook_core::Error::storage(err) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
