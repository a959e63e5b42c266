//! Firestore backend for RSVP submissions.
//!
//! Talks to the Firestore REST API (`/v1/projects/*/databases/*/documents`)
//! with [`reqwest`], decoding Firestore's typed values into the plain JSON
//! payloads [`rsvp_core::submission::Document`] carries. Works against the
//! Firestore emulator by pointing `base_url` at it.

mod config;
mod store;
mod value;

pub mod error;

pub use config::FirestoreConfig;
pub use error::{Error, Result};
pub use store::FirestoreStore;
