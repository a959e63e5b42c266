//! Application state machine and event dispatcher.
//!
//! Store calls run on spawned tasks; their results come back as
//! [`Completion`]s over a channel and are applied on the event loop, so the
//! UI keeps drawing while a load or delete is pending.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rsvp_core::{
  admin::{AdminView, DeleteTicket},
  store::{COLLECTION, SubmissionStore},
  submission::{Document, Submission, UnknownAttendance},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const DELETE_FAILED: &str = "An error occurred while deleting.";

// ─── Completions ──────────────────────────────────────────────────────────────

/// Outcome of a store call started by the app.
pub enum Completion<E> {
  Loaded(Result<Vec<Document>, E>),
  Deleted(DeleteTicket, Result<(), E>),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S: SubmissionStore> {
  /// The mounted page.
  pub view: AdminView,

  /// Index of the selected card.
  pub cursor: usize,

  /// Number of card columns at the current terminal width.
  pub columns: usize,

  /// Blocking alert; while set, only dismiss keys are handled.
  pub alert: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  store: Arc<S>,
  tx:    UnboundedSender<Completion<S::Error>>,
  rx:    UnboundedReceiver<Completion<S::Error>>,
}

impl<S> App<S>
where
  S: SubmissionStore + 'static,
{
  pub fn new(store: S, policy: UnknownAttendance) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      view: AdminView::with_policy(policy),
      cursor: 0,
      columns: 1,
      alert: None,
      status_msg: String::new(),
      store: Arc::new(store),
      tx,
      rx,
    }
  }

  // ── Store calls ───────────────────────────────────────────────────────────

  /// Start the initial fetch. The view stays in its loading state until the
  /// result is applied.
  pub fn start_load(&mut self) {
    self.status_msg = "Loading submissions…".into();
    let store = Arc::clone(&self.store);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = store.list_all(COLLECTION).await;
      // The receiver only goes away when the app shuts down.
      let _ = tx.send(Completion::Loaded(result));
    });
  }

  fn start_delete(&mut self, ticket: DeleteTicket) {
    let store = Arc::clone(&self.store);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = store.delete_by_id(COLLECTION, ticket.id()).await;
      let _ = tx.send(Completion::Deleted(ticket, result));
    });
  }

  /// Apply every completion that has already arrived.
  pub fn drain_completions(&mut self) {
    while let Ok(completion) = self.rx.try_recv() {
      self.apply(completion);
    }
  }

  /// Wait for the next completion and apply it.
  #[cfg(test)]
  pub async fn next_completion(&mut self) {
    if let Some(completion) = self.rx.recv().await {
      self.apply(completion);
    }
  }

  pub fn apply(&mut self, completion: Completion<S::Error>) {
    match completion {
      Completion::Loaded(result) => {
        self.view.finish_load(result);
        self.status_msg.clear();
      }
      Completion::Deleted(ticket, result) => {
        match self.view.finish_delete(ticket, result) {
          Ok(()) => self.status_msg = "Deleted.".into(),
          Err(e) => {
            self.status_msg = e.to_string();
            self.alert = Some(DELETE_FAILED.into());
          }
        }
      }
    }
    self.clamp_cursor();
  }

  // ── Selection ─────────────────────────────────────────────────────────────

  pub fn selected(&self) -> Option<&Submission> {
    self.view.submissions().get(self.cursor)
  }

  pub fn set_columns(&mut self, columns: usize) {
    self.columns = columns.max(1);
  }

  fn clamp_cursor(&mut self) {
    let len = self.view.submissions().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.alert.is_some() {
      if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        self.alert = None;
      }
      return true;
    }

    let len = self.view.submissions().len();
    let cols = self.columns;
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Left | KeyCode::Char('h') => {
        if self.cursor % cols > 0 {
          self.cursor -= 1;
        }
      }
      KeyCode::Right | KeyCode::Char('l') => {
        if self.cursor % cols + 1 < cols && self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.cursor >= cols {
          self.cursor -= cols;
        }
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + cols < len {
          self.cursor += cols;
        }
      }

      // Deletes right away, no confirmation.
      KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),

      _ => {}
    }
    true
  }

  fn delete_selected(&mut self) {
    let Some(id) = self.selected().map(|s| s.id.clone()) else {
      return;
    };
    match self.view.begin_delete(&id) {
      Ok(ticket) => {
        self.status_msg = format!("Deleting {id}…");
        self.start_delete(ticket);
      }
      Err(e) => self.status_msg = e.to_string(),
    }
  }
}
