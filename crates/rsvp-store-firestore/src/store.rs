//! [`FirestoreStore`] — the Firestore implementation of [`SubmissionStore`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use rsvp_core::{store::SubmissionStore, submission::Document};
use tracing::{debug, warn};

use crate::{
  Error, Result,
  config::FirestoreConfig,
  value::{ErrorEnvelope, ListResponse},
};

/// A Firestore REST client bound to one project and database.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
  client: Client,
  config: FirestoreConfig,
  base:   Url,
}

impl FirestoreStore {
  pub fn new(config: FirestoreConfig) -> Result<Self> {
    let base = Url::parse(&config.base_url)
      .ok()
      .filter(|url| !url.cannot_be_a_base())
      .ok_or_else(|| Error::InvalidBaseUrl(config.base_url.clone()))?;
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      config,
      base,
    })
  }

  pub fn config(&self) -> &FirestoreConfig { &self.config }

  /// `{base}/v1/projects/{p}/databases/{d}/documents/{tail...}`, with each
  /// segment percent-encoded.
  fn documents_url(&self, tail: &[&str]) -> Result<Url> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| Error::InvalidBaseUrl(self.config.base_url.clone()))?
      .pop_if_empty()
      .extend([
        "v1",
        "projects",
        self.config.project_id.as_str(),
        "databases",
        self.config.database.as_str(),
        "documents",
      ])
      .extend(tail);
    Ok(url)
  }

  fn request(&self, method: Method, url: Url) -> RequestBuilder {
    let mut req = self.client.request(method, url);
    if let Some(key) = &self.config.api_key {
      req = req.query(&[("key", key)]);
    }
    if let Some(token) = &self.config.bearer_token {
      req = req.bearer_auth(token);
    }
    req
  }
}

/// Turn a non-success response into [`Error::Status`], preferring the message
/// from Google's error envelope over the raw body.
async fn check(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  let message = serde_json::from_str::<ErrorEnvelope>(&body)
    .map(|e| e.error.message)
    .unwrap_or(body);
  Err(Error::Status { status, message })
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for FirestoreStore {
  type Error = Error;

  async fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
    let url = self.documents_url(&[collection])?;
    let page_size = self.config.page_size.to_string();

    let mut documents = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
      let mut req = self
        .request(Method::GET, url.clone())
        .query(&[("pageSize", page_size.as_str())]);
      if let Some(token) = &page_token {
        req = req.query(&[("pageToken", token.as_str())]);
      }

      let page: ListResponse = check(req.send().await?).await?.json().await?;
      for raw in page.documents {
        let name = raw.name.clone();
        match raw.into_document() {
          Ok(doc) => documents.push(doc),
          Err(e) => warn!(%name, error = %e, "skipping undecodable document"),
        }
      }

      match page.next_page_token.filter(|t| !t.is_empty()) {
        Some(token) => page_token = Some(token),
        None => break,
      }
    }

    debug!(collection, count = documents.len(), "listed documents");
    Ok(documents)
  }

  async fn delete_by_id(&self, collection: &str, id: &str) -> Result<()> {
    if id.is_empty() {
      return Err(Error::InvalidDocumentId(id.to_owned()));
    }
    let url = self.documents_url(&[collection, id])?;
    let resp = self.request(Method::DELETE, url).send().await?;

    // Deleting a missing document normally answers 200; treat 404 the same.
    if resp.status() == StatusCode::NOT_FOUND {
      debug!(collection, id, "document already absent");
      return Ok(());
    }
    check(resp).await?;
    debug!(collection, id, "deleted document");
    Ok(())
  }
}
