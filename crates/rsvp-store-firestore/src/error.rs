//! Error type for `rsvp-store-firestore`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// Firestore answered with a non-success status.
  #[error("firestore returned {status}: {message}")]
  Status { status: StatusCode, message: String },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid base url: {0:?}")]
  InvalidBaseUrl(String),

  #[error("invalid document name: {0:?}")]
  InvalidDocumentName(String),

  #[error("invalid document id: {0:?}")]
  InvalidDocumentId(String),

  #[error("invalid integer value: {0:?}")]
  InvalidInteger(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
