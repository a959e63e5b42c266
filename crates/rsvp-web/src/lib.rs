//! Web front-end for the RSVP admin page.
//!
//! Exposes an axum [`Router`] serving the page at `/admin` backed by any
//! [`SubmissionStore`]. Every page request mounts a fresh
//! [`AdminView`] and loads the collection before rendering; deletes are plain
//! form posts.

pub mod auth;
pub mod error;
pub mod page;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  extract::{Path, State},
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
  routing::{get, post},
};
use rsvp_core::{
  admin::{AdminView, View},
  in_flight::InFlight,
  store::SubmissionStore,
  submission::UnknownAttendance,
};
use rsvp_store_firestore::FirestoreConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, Authenticated};
use page::Pages;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default)]
  pub unknown_attendance: UnknownAttendance,
  pub firestore:          FirestoreConfig,
  /// Without this section the page is served to anyone who can reach it.
  #[serde(default)]
  pub auth:               Option<AuthConfig>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: SubmissionStore> {
  pub store:              Arc<S>,
  pub auth:               Option<Arc<AuthConfig>>,
  pub pages:              Arc<Pages>,
  /// One guard for all requests, so a double-submitted delete form issues a
  /// single remote delete.
  pub in_flight:          InFlight,
  pub unknown_attendance: UnknownAttendance,
}

impl<S: SubmissionStore> AppState<S> {
  pub fn new(
    store: Arc<S>,
    auth: Option<AuthConfig>,
    unknown_attendance: UnknownAttendance,
  ) -> Result<Self, Error> {
    Ok(Self {
      store,
      auth: auth.map(Arc::new),
      pages: Arc::new(Pages::new()?),
      in_flight: InFlight::new(),
      unknown_attendance,
    })
  }

  /// Mount a view and run its initial load.
  async fn mount(&self) -> AdminView {
    let mut view = AdminView::with_policy(self.unknown_attendance)
      .with_in_flight(self.in_flight.clone());
    view.load(&*self.store).await;
    view
  }

  fn respond(
    &self,
    view: &AdminView,
    status: StatusCode,
    alert: Option<&str>,
  ) -> Result<Response, Error> {
    let html = self.pages.render(view, alert)?;
    Ok((status, Html(html)).into_response())
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the admin page.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SubmissionStore + Clone + 'static,
{
  Router::new()
    .route("/", get(|| async { Redirect::to("/admin") }))
    .route("/admin", get(admin_page::<S>))
    .route("/admin/submissions/{id}/delete", post(delete_submission::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

const DELETE_FAILED: &str = "An error occurred while deleting.";
const DELETE_PENDING: &str = "This submission is already being deleted.";

/// `GET /admin`
async fn admin_page<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Response, Error>
where
  S: SubmissionStore + Clone + 'static,
{
  let view = state.mount().await;
  let status = match view.view() {
    View::Failed { .. } => StatusCode::BAD_GATEWAY,
    _ => StatusCode::OK,
  };
  state.respond(&view, status, None)
}

/// `POST /admin/submissions/{id}/delete`. There is no confirmation step.
async fn delete_submission<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Response, Error>
where
  S: SubmissionStore + Clone + 'static,
{
  let mut view = state.mount().await;
  // Without a listing there is nothing to check the id against.
  if matches!(view.view(), View::Failed { .. }) {
    return state.respond(&view, StatusCode::BAD_GATEWAY, Some(DELETE_FAILED));
  }
  match view.delete(&*state.store, &id).await {
    // Already gone (or never listed): nothing left to do.
    Ok(()) | Err(rsvp_core::Error::NotPresent(_)) => {
      Ok(Redirect::to("/admin").into_response())
    }
    Err(rsvp_core::Error::InFlight(_)) => {
      state.respond(&view, StatusCode::CONFLICT, Some(DELETE_PENDING))
    }
    Err(_) => state.respond(&view, StatusCode::BAD_GATEWAY, Some(DELETE_FAILED)),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
