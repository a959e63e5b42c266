//! Connection settings for a Firestore database.

use serde::Deserialize;

/// Deserialised from the `[firestore]` table of a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreConfig {
  pub project_id:   String,
  #[serde(default = "default_database")]
  pub database:     String,
  /// `https://firestore.googleapis.com`, or the emulator's address.
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  /// Sent as the `key` query parameter.
  #[serde(default)]
  pub api_key:      Option<String>,
  /// Sent as `Authorization: Bearer <token>`.
  #[serde(default)]
  pub bearer_token: Option<String>,
  #[serde(default = "default_page_size")]
  pub page_size:    u32,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl FirestoreConfig {
  /// Settings for `project_id` with every optional field at its default.
  pub fn new(project_id: impl Into<String>) -> Self {
    Self {
      project_id:   project_id.into(),
      database:     default_database(),
      base_url:     default_base_url(),
      api_key:      None,
      bearer_token: None,
      page_size:    default_page_size(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

fn default_database() -> String { "(default)".to_string() }

fn default_base_url() -> String { "https://firestore.googleapis.com".to_string() }

fn default_page_size() -> u32 { 300 }

fn default_timeout_secs() -> u64 { 30 }
