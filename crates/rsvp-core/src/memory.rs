//! [`MemoryStore`] — an in-process [`SubmissionStore`].
//!
//! Useful for tests and local demos. Outages can be switched on per operation
//! to exercise the failure paths of the front-ends.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{store::SubmissionStore, submission::Document};

#[derive(Debug, Error)]
pub enum MemoryStoreError {
  #[error("store unavailable")]
  Unavailable,
}

#[derive(Debug, Default)]
struct Inner {
  collections:  HashMap<String, Vec<Document>>,
  fail_lists:   bool,
  fail_deletes: bool,
  delete_calls: usize,
}

/// Cloning is cheap; clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Insert `doc`, replacing any document with the same id.
  pub fn insert(&self, collection: &str, doc: Document) {
    let mut inner = self.lock();
    let docs = inner.collections.entry(collection.to_owned()).or_default();
    match docs.iter_mut().find(|d| d.id == doc.id) {
      Some(existing) => *existing = doc,
      None => docs.push(doc),
    }
  }

  /// Insert `fields` under a freshly generated id and return the id.
  pub fn add(&self, collection: &str, fields: Map<String, Value>) -> String {
    let id = Uuid::new_v4().simple().to_string();
    self.insert(collection, Document::new(id.clone(), fields));
    id
  }

  pub fn documents(&self, collection: &str) -> Vec<Document> {
    self
      .lock()
      .collections
      .get(collection)
      .cloned()
      .unwrap_or_default()
  }

  /// Make every subsequent `list_all` fail (or succeed again).
  pub fn set_list_failure(&self, fail: bool) { self.lock().fail_lists = fail; }

  /// Make every subsequent `delete_by_id` fail (or succeed again).
  pub fn set_delete_failure(&self, fail: bool) {
    self.lock().fail_deletes = fail;
  }

  /// Number of `delete_by_id` calls received, failed ones included.
  pub fn delete_calls(&self) -> usize { self.lock().delete_calls }
}

impl SubmissionStore for MemoryStore {
  type Error = MemoryStoreError;

  async fn list_all(&self, collection: &str) -> Result<Vec<Document>, Self::Error> {
    if self.lock().fail_lists {
      return Err(MemoryStoreError::Unavailable);
    }
    Ok(self.documents(collection))
  }

  async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), Self::Error> {
    let mut inner = self.lock();
    inner.delete_calls += 1;
    if inner.fail_deletes {
      return Err(MemoryStoreError::Unavailable);
    }
    if let Some(docs) = inner.collections.get_mut(collection) {
      docs.retain(|d| d.id != id);
    }
    Ok(())
  }
}
