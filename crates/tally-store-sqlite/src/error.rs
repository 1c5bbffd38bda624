//! Error type for `tally-store-sqlite`.

use tally_core::{ErrorKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Caller-supplied input violates the data model.
  #[error("validation error: {0}")]
  Validation(#[from] tally_core::Error),

  /// Schema (re)creation failed. The instance keeps its prior state and the
  /// operation can be retried from the top.
  #[error("schema initialization failed: {0}")]
  Schema(#[source] tokio_rusqlite::Error),

  /// The backing instance could not be reached, or a data operation failed
  /// in flight.
  #[error("store unavailable: {0}")]
  Unavailable(#[source] tokio_rusqlite::Error),

  /// A stored row no longer decodes to the schema shape.
  #[error("stored timestamp is not valid RFC 3339: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Validation(_) => ErrorKind::Validation,
      Error::Schema(_) | Error::DateParse(_) => ErrorKind::Schema,
      Error::Unavailable(_) => ErrorKind::Unavailable,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
