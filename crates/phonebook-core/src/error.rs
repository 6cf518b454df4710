//! Error types for `phonebook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("name is not valid")]
  InvalidName,

  #[error("phone number is not valid")]
  InvalidPhone,

  #[error("contact id is not valid: {0:?}")]
  InvalidId(String),

  #[error("contact not found: {0}")]
  NotFound(i64),

  #[error("no contact ids left after {0}")]
  IdsExhausted(i64),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("format error: {0}")]
  Format(#[from] serde_json::Error),
}

impl Error {
  /// Wrap any backend failure as [`Error::Storage`].
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }

  /// `true` for the errors a presentation adapter reports as bad input.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::InvalidName | Self::InvalidPhone | Self::InvalidId(_))
  }
}

impl From<std::io::Error> for Error {
  fn from(err: std::io::Error) -> Self { Self::storage(err) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
