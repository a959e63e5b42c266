//! The admin view — state behind the submissions page.
//!
//! [`AdminView`] is I/O free: front-ends either call the async helpers
//! ([`AdminView::load`], [`AdminView::delete`]) or run the store calls
//! themselves and feed the results back through [`AdminView::finish_load`] and
//! [`AdminView::finish_delete`].
//!
//! ```text
//! Loading ──► Ready (Empty | Populated) ──delete──► Ready
//!    └──────► Failed
//! ```

use std::collections::HashSet;

use tracing::{error, info, warn};

use crate::{
  Error, Result,
  in_flight::{Claim, InFlight},
  store::{COLLECTION, SubmissionStore},
  submission::{Document, Submission, UnknownAttendance},
  tally::Tally,
};

// ─── Render state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
  Loading,
  Failed(String),
  Ready,
}

/// Exactly one of these is rendered at any time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
  Loading,
  /// The initial load failed. Distinct from [`View::Empty`].
  Failed { message: &'a str },
  Empty,
  Populated(&'a [Submission]),
}

// ─── Delete ticket ───────────────────────────────────────────────────────────

/// A claimed, pending delete. Hand it back to [`AdminView::finish_delete`]
/// together with the store's result.
#[derive(Debug)]
pub struct DeleteTicket {
  claim: Claim,
}

impl DeleteTicket {
  pub fn id(&self) -> &str { self.claim.id() }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// Local state of one mounted admin page.
#[derive(Debug)]
pub struct AdminView {
  submissions: Vec<Submission>,
  phase:       Phase,
  in_flight:   InFlight,
  policy:      UnknownAttendance,
}

impl Default for AdminView {
  fn default() -> Self { Self::new() }
}

impl AdminView {
  /// A freshly mounted view: loading, with no submissions.
  pub fn new() -> Self { Self::with_policy(UnknownAttendance::default()) }

  pub fn with_policy(policy: UnknownAttendance) -> Self {
    Self {
      submissions: Vec::new(),
      phase: Phase::Loading,
      in_flight: InFlight::new(),
      policy,
    }
  }

  /// Use `in_flight` instead of a private guard, so concurrently mounted views
  /// refuse each other's duplicate deletes.
  pub fn with_in_flight(mut self, in_flight: InFlight) -> Self {
    self.in_flight = in_flight;
    self
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn is_loading(&self) -> bool { self.phase == Phase::Loading }

  pub fn submissions(&self) -> &[Submission] { &self.submissions }

  pub fn tally(&self) -> Tally { Tally::of(&self.submissions) }

  pub fn is_deleting(&self, id: &str) -> bool { self.in_flight.contains(id) }

  pub fn view(&self) -> View<'_> {
    match &self.phase {
      Phase::Loading => View::Loading,
      Phase::Failed(message) => View::Failed { message },
      Phase::Ready if self.submissions.is_empty() => View::Empty,
      Phase::Ready => View::Populated(&self.submissions),
    }
  }

  // ── Load ──────────────────────────────────────────────────────────────────

  /// Fetch the whole collection from `store` and apply the result.
  pub async fn load<S: SubmissionStore>(&mut self, store: &S) {
    let result = store.list_all(COLLECTION).await;
    self.finish_load(result);
  }

  /// Apply the outcome of a bulk fetch. Only the first outcome counts; later
  /// calls are ignored and return `false`.
  pub fn finish_load<E>(&mut self, result: Result<Vec<Document>, E>) -> bool
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    if !self.is_loading() {
      return false;
    }

    match result {
      Ok(documents) => {
        let mut seen = HashSet::with_capacity(documents.len());
        let mut submissions = Vec::with_capacity(documents.len());
        for doc in documents {
          if !seen.insert(doc.id.clone()) {
            warn!(id = %doc.id, "duplicate document id, keeping the first");
            continue;
          }
          match Submission::from_document(doc, self.policy) {
            Ok(submission) => submissions.push(submission),
            Err(e) => warn!(error = %e, "skipping submission"),
          }
        }
        info!(count = submissions.len(), "loaded submissions");
        self.submissions = submissions;
        self.phase = Phase::Ready;
      }
      Err(e) => {
        let err = Error::Fetch(Box::new(e));
        error!(error = %err, "failed to load submissions");
        self.phase = Phase::Failed(err.to_string());
      }
    }
    true
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Delete `id` remotely, then locally. Issues exactly one store call unless
  /// the delete is refused up front.
  pub async fn delete<S: SubmissionStore>(
    &mut self,
    store: &S,
    id: &str,
  ) -> Result<()> {
    let ticket = self.begin_delete(id)?;
    let result = store.delete_by_id(COLLECTION, ticket.id()).await;
    self.finish_delete(ticket, result)
  }

  /// Claim `id` for deletion.
  ///
  /// Refused with [`Error::NotPresent`] when no rendered entry has this id
  /// (including after it was already deleted), and with [`Error::InFlight`]
  /// while another delete for it is pending.
  pub fn begin_delete(&mut self, id: &str) -> Result<DeleteTicket> {
    if !self.submissions.iter().any(|s| s.id == id) {
      return Err(Error::NotPresent(id.to_owned()));
    }
    let claim = self
      .in_flight
      .claim(id)
      .ok_or_else(|| Error::InFlight(id.to_owned()))?;
    Ok(DeleteTicket { claim })
  }

  /// Apply the store's answer to a delete. Local state changes only on
  /// success; on failure the entry stays and [`Error::Delete`] is returned.
  pub fn finish_delete<E>(
    &mut self,
    ticket: DeleteTicket,
    result: Result<(), E>,
  ) -> Result<()>
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let id = ticket.id().to_owned();
    drop(ticket);

    match result {
      Ok(()) => {
        self.submissions.retain(|s| s.id != id);
        info!(%id, "deleted submission");
        Ok(())
      }
      Err(e) => {
        let err = Error::Delete {
          id,
          source: Box::new(e),
        };
        error!(error = %err, "failed to delete submission");
        Err(err)
      }
    }
  }
}
