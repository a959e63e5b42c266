//! Submissions (one guest's RSVP response each) and the raw documents they are
//! decoded from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing::warn;

use crate::{Error, Result};

// ─── Store boundary ──────────────────────────────────────────────────────────

/// A raw document as returned by a store: its assigned identifier plus a plain
/// JSON field payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id:         String,
  pub fields:     Map<String, Value>,
  /// Creation time reported by the store, if it tracks one.
  pub created_at: Option<DateTime<Utc>>,
}

impl Document {
  pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
    Self {
      id: id.into(),
      fields,
      created_at: None,
    }
  }
}

// ─── Attendance ──────────────────────────────────────────────────────────────

/// A guest's answer. Parsed from the literals the RSVP form writes (`буду` /
/// `не смогу`); the English spellings are accepted as aliases.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Attendance {
  #[strum(to_string = "буду", serialize = "attending")]
  Attending,
  #[strum(to_string = "не смогу", serialize = "not attending")]
  NotAttending,
}

impl Attendance {
  /// Human-readable status line for a card.
  pub fn label(self) -> &'static str {
    match self {
      Self::Attending => "Attending",
      Self::NotAttending => "Not attending",
    }
  }
}

/// What to do with a document whose attendance is missing or is neither of
/// the two recognized literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownAttendance {
  /// Keep the submission with no attendance. It counts towards the total only.
  #[default]
  Keep,
  /// Reject the document at the boundary; it never enters the collection.
  Reject,
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// One guest's RSVP record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
  pub id:           String,
  pub name:         String,
  /// `None` when the stored value was not recognized.
  pub attendance:   Option<Attendance>,
  pub drinks:       Vec<String>,
  pub submitted_at: Option<DateTime<Utc>>,
}

impl Submission {
  /// Combine a document's identifier with its field payload.
  ///
  /// Every document becomes a submission, whatever its field types. Only an
  /// unrecognized attendance under [`UnknownAttendance::Reject`] is refused.
  pub fn from_document(doc: Document, policy: UnknownAttendance) -> Result<Self> {
    let Document {
      id,
      fields,
      created_at,
    } = doc;

    let raw_attendance = fields.get("attendance");
    let attendance = raw_attendance
      .and_then(Value::as_str)
      .and_then(|raw| raw.parse::<Attendance>().ok());

    if attendance.is_none() && policy == UnknownAttendance::Reject {
      return Err(Error::UnrecognizedAttendance {
        id,
        value: raw_attendance.map(text_of).unwrap_or_default(),
      });
    }

    Ok(Self {
      name: fields.get("name").map(text_of).unwrap_or_default(),
      drinks: drinks_of(&id, fields.get("drinks")),
      id,
      attendance,
      submitted_at: created_at,
    })
  }

  pub fn is_attending(&self) -> bool {
    self.attendance == Some(Attendance::Attending)
  }

  /// Status line for a card; unrecognized answers get their own label.
  pub fn status_label(&self) -> &'static str {
    self
      .attendance
      .map(Attendance::label)
      .unwrap_or("Unrecognized response")
  }
}

/// Strings as-is, `null` as empty, anything else as its JSON text.
fn text_of(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Null => String::new(),
    other => other.to_string(),
  }
}

/// The string entries of `drinks`. A lone string counts as one drink.
fn drinks_of(id: &str, value: Option<&Value>) -> Vec<String> {
  match value {
    None | Some(Value::Null) => Vec::new(),
    Some(Value::String(s)) => vec![s.clone()],
    Some(Value::Array(items)) => {
      let drinks: Vec<String> = items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_owned))
        .collect();
      if drinks.len() < items.len() {
        warn!(%id, dropped = items.len() - drinks.len(), "ignoring non-string drinks");
      }
      drinks
    }
    Some(other) => {
      warn!(%id, value = %other, "ignoring drinks that are not a list");
      Vec::new()
    }
  }
}
