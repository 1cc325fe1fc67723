//! Policy records and request bodies.
//!
//! DESIGN
//! ======
//! Field names mirror the backend table columns so serde needs no renames.
//! Timestamps arrive as strings holding float epoch milliseconds (for example
//! `"1690000000000.0"`); they are parsed leniently so one odd row never fails
//! a whole list response.

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::DocumentError;

/// A named, described JSON access-policy document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Opaque identifier assigned by the backend.
    pub id: String,
    /// User-editable policy name; half of the backend's composite key.
    pub policy_name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub policy_description: Option<String>,
    /// The access-policy document. Absent in list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_document: Option<Value>,
    /// Backend-assigned creation time.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub creation_date: Option<Timestamp>,
    /// Backend-assigned time of the last update.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_modified: Option<Timestamp>,
}

impl Policy {
    /// Composite key used by get and delete.
    #[must_use]
    pub fn key(&self) -> PolicyKey {
        PolicyKey::new(&self.id, &self.policy_name)
    }

    /// Description text, empty when the backend stored none.
    #[must_use]
    pub fn description(&self) -> &str {
        self.policy_description.as_deref().unwrap_or_default()
    }

    /// Document pretty-printed with 4-space indentation, empty when absent.
    #[must_use]
    pub fn document_text(&self) -> String {
        self.policy_document.as_ref().map(pretty_document).unwrap_or_default()
    }
}

/// The `(id, policy_name)` pair the backend needs to address one policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyKey {
    pub id: String,
    pub policy_name: String,
}

impl PolicyKey {
    #[must_use]
    pub fn new(id: &str, policy_name: &str) -> Self {
        Self { id: id.to_owned(), policy_name: policy_name.to_owned() }
    }

    /// Query parameters in the order the backend documents them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [("id", self.id.as_str()), ("policy_name", self.policy_name.as_str())]
    }
}

/// `POST /policy` body.
///
/// `policy_document` is the raw editor text; the backend parses it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePolicy {
    pub policy_name: String,
    pub policy_description: String,
    pub policy_document: String,
}

/// `PUT /policy` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePolicy {
    pub id: String,
    pub policy_name: String,
    pub policy_description: String,
    pub policy_document: String,
}

/// Decoded acknowledgement of a create, update or delete.
#[derive(Clone, Debug, PartialEq)]
pub struct Ack {
    /// The decoded `message` payload.
    pub message: Value,
    /// Backend request id, when present.
    pub request_id: Option<String>,
}

impl Ack {
    /// The created policy carried by a create acknowledgement.
    #[must_use]
    pub fn created_policy(&self) -> Option<Policy> {
        let attributes = self.message.get("Attributes")?;
        serde_json::from_value(attributes.clone()).ok()
    }
}

/// Epoch milliseconds as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    #[must_use]
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub fn millis(self) -> f64 {
        self.0
    }

    /// Convert to a UTC date-time, `None` when out of range or not finite.
    #[must_use]
    pub fn to_datetime(self) -> Option<OffsetDateTime> {
        if !self.0.is_finite() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let nanos = (self.0 * 1_000_000.0) as i128;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }

    /// Long US-style rendering, e.g. `July 21, 2023, 14:05` (UTC, 24h).
    #[must_use]
    pub fn display_long(self) -> Option<String> {
        let format = format_description!("[month repr:long] [day padding:none], [year], [hour]:[minute]");
        self.to_datetime()?.format(&format).ok()
    }
}

/// Table rendering of an optional timestamp; `-` when missing or invalid.
#[must_use]
pub fn format_timestamp(ts: Option<Timestamp>) -> String {
    ts.and_then(Timestamp::display_long).unwrap_or_else(|| "-".to_owned())
}

/// Pretty-print a document with 4-space indentation, keeping key order.
#[must_use]
pub fn pretty_document(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

/// Check that document text is syntactically valid JSON.
///
/// Policy semantics are the backend's concern; this only guards against
/// submitting text that can never parse.
///
/// # Errors
///
/// Returns the parser position and reason when the text is not JSON.
pub fn check_document(text: &str) -> Result<Value, DocumentError> {
    serde_json::from_str(text).map_err(DocumentError::from)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(millis)) => Some(Timestamp::from_millis(millis)),
        Some(Raw::Text(text)) => text.trim().parse::<f64>().ok().map(Timestamp::from_millis),
        Some(Raw::Other(_)) | None => None,
    })
}
