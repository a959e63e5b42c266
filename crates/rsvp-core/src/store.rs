//! The `SubmissionStore` trait.
//!
//! Implemented by storage backends (e.g. `rsvp-store-firestore`). Front-ends
//! receive a store explicitly and hand it to [`crate::admin::AdminView`]; no
//! process-wide client handle exists.

use std::future::Future;

use crate::submission::Document;

/// Name of the collection holding RSVP responses.
pub const COLLECTION: &str = "rsvp_responses";

/// Abstraction over a remote document store.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`, or spawned tasks in the TUI).
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every document in `collection`, in the store's order.
  fn list_all<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  /// Delete the document `id` from `collection`.
  ///
  /// Deleting a document that does not exist succeeds.
  fn delete_by_id<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
