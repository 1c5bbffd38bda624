//! Error types for `tally-core` and the error-classification seam shared by
//! all storage backends.

use thiserror::Error;

/// Coarse classification of a store failure.
///
/// Callers react to the kind, not the concrete backend error: validation
/// failures are caller-fixable and must never be retried, unavailability is
/// safe to retry with backoff, schema failures go to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Caller-supplied data violates the data model.
  Validation,
  /// Schema (re)initialisation failed, or stored rows no longer match the
  /// schema contract. The instance is left fully initialised or untouched.
  Schema,
  /// The backing instance could not be reached. The store never retries
  /// internally: a retried `submit` after an ambiguous failure could
  /// insert a duplicate, so the ambiguity is surfaced to the caller.
  Unavailable,
}

/// Implemented by every backend error type so generic callers (e.g. the HTTP
/// serving layer) can distinguish failure kinds without naming the backend.
pub trait StoreError: std::error::Error {
  fn kind(&self) -> ErrorKind;
}

/// Domain-level errors raised by input validation.
#[derive(Debug, Error)]
pub enum Error {
  #[error("player_name must be a non-empty string")]
  EmptyPlayerName,
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::EmptyPlayerName => ErrorKind::Validation,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
