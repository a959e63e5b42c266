//! Error types for `rsvp-core`.

use thiserror::Error;

/// A type-erased error coming from a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// The bulk load of the collection failed.
  #[error("failed to load submissions: {0}")]
  Fetch(#[source] BoxError),

  /// The store rejected or failed a single deletion.
  #[error("failed to delete submission {id}: {source}")]
  Delete {
    id:     String,
    #[source]
    source: BoxError,
  },

  #[error("submission {0} is not present")]
  NotPresent(String),

  #[error("a delete for submission {0} is already in flight")]
  InFlight(String),

  #[error("document {id} has unrecognized attendance {value:?}")]
  UnrecognizedAttendance { id: String, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
