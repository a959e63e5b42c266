//! Per-identifier guard against duplicate delete requests.

use std::{
  collections::HashSet,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// The set of submission ids with a delete currently pending.
///
/// Cloning yields another handle onto the same set, so several views (e.g.
/// one per HTTP request) can share a single guard.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
  ids: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
  pub fn new() -> Self { Self::default() }

  /// Claim `id`. Returns `None` if it is already claimed. The claim is
  /// released when the returned [`Claim`] is dropped.
  pub fn claim(&self, id: &str) -> Option<Claim> {
    if !lock(&self.ids).insert(id.to_owned()) {
      return None;
    }
    Some(Claim {
      id:  id.to_owned(),
      ids: Arc::clone(&self.ids),
    })
  }

  pub fn contains(&self, id: &str) -> bool { lock(&self.ids).contains(id) }

  pub fn len(&self) -> usize { lock(&self.ids).len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Proof that an id is claimed; releases it on drop.
#[derive(Debug)]
pub struct Claim {
  id:  String,
  ids: Arc<Mutex<HashSet<String>>>,
}

impl Claim {
  pub fn id(&self) -> &str { &self.id }
}

impl Drop for Claim {
  fn drop(&mut self) { lock(&self.ids).remove(&self.id); }
}

// The set holds plain strings, so a panic mid-update cannot leave it torn.
fn lock(ids: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
  ids.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_claim_is_refused_until_release() {
    let guard = InFlight::new();
    let first = guard.claim("a").unwrap();
    assert!(guard.claim("a").is_none());
    assert!(guard.contains("a"));

    drop(first);
    assert!(!guard.contains("a"));
    assert!(guard.claim("a").is_some());
  }

  #[test]
  fn distinct_ids_are_independent() {
    let guard = InFlight::new();
    let _a = guard.claim("a").unwrap();
    let _b = guard.claim("b").unwrap();
    assert_eq!(guard.len(), 2);
  }

  #[test]
  fn clones_share_the_set() {
    let guard = InFlight::new();
    let other = guard.clone();
    let claim = guard.claim("a").unwrap();
    assert!(other.claim("a").is_none());
    drop(claim);
    assert!(other.is_empty());
  }
}
