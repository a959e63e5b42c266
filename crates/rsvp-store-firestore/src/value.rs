//! Decoding of Firestore REST documents and typed values.
//!
//! Firestore wraps every field in a single-key object naming its type
//! (`{"stringValue": "Alice"}`, `{"arrayValue": {"values": [...]}}`). These
//! helpers flatten that into ordinary JSON.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rsvp_core::submission::Document;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum FirestoreValue {
  NullValue(Value),
  BooleanValue(bool),
  /// int64 is transmitted as a decimal string.
  IntegerValue(String),
  /// A number, or one of the strings `"NaN"`, `"Infinity"`, `"-Infinity"`.
  DoubleValue(Value),
  TimestampValue(String),
  StringValue(String),
  /// Base64 text.
  BytesValue(String),
  ReferenceValue(String),
  GeoPointValue(LatLng),
  ArrayValue(ArrayValue),
  MapValue(MapValue),
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
  #[serde(default)]
  latitude:  f64,
  #[serde(default)]
  longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArrayValue {
  #[serde(default)]
  values: Vec<FirestoreValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MapValue {
  #[serde(default)]
  fields: HashMap<String, FirestoreValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDocument {
  /// `projects/{p}/databases/{d}/documents/{collection}/{id}`
  pub name:        String,
  #[serde(default)]
  pub fields:      HashMap<String, FirestoreValue>,
  #[serde(default)]
  pub create_time: Option<DateTime<Utc>>,
}

/// One page of `GET .../documents/{collection}`. An empty collection comes
/// back as `{}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
  #[serde(default)]
  pub documents:       Vec<RawDocument>,
  #[serde(default)]
  pub next_page_token: Option<String>,
}

/// Google's error body: `{"error": {"code": 403, "message": "...", ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
  pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
  pub message: String,
}

// ─── Decoding ────────────────────────────────────────────────────────────────

impl FirestoreValue {
  pub(crate) fn into_json(self) -> Result<Value> {
    Ok(match self {
      Self::NullValue(_) => Value::Null,
      Self::BooleanValue(b) => Value::Bool(b),
      Self::IntegerValue(s) => {
        let n: i64 = s.parse().map_err(|_| Error::InvalidInteger(s.clone()))?;
        Value::from(n)
      }
      Self::DoubleValue(v) => v,
      Self::TimestampValue(s)
      | Self::StringValue(s)
      | Self::BytesValue(s)
      | Self::ReferenceValue(s) => Value::String(s),
      Self::GeoPointValue(LatLng {
        latitude,
        longitude,
      }) => serde_json::json!({ "latitude": latitude, "longitude": longitude }),
      Self::ArrayValue(ArrayValue { values }) => Value::Array(
        values
          .into_iter()
          .map(Self::into_json)
          .collect::<Result<_>>()?,
      ),
      Self::MapValue(MapValue { fields }) => Value::Object(decode_fields(fields)?),
    })
  }
}

fn decode_fields(fields: HashMap<String, FirestoreValue>) -> Result<Map<String, Value>> {
  fields
    .into_iter()
    .map(|(k, v)| Ok((k, v.into_json()?)))
    .collect()
}

impl RawDocument {
  /// The document id is the last segment of its resource name.
  pub(crate) fn into_document(self) -> Result<Document> {
    let id = match self.name.rsplit_once('/') {
      Some((_, id)) if !id.is_empty() => id.to_owned(),
      _ => return Err(Error::InvalidDocumentName(self.name)),
    };
    Ok(Document {
      id,
      fields: decode_fields(self.fields)?,
      created_at: self.create_time,
    })
  }
}
