//! Response envelope decoding for the `/policy` resource.
//!
//! The backend answers every call with
//! `{"message": "<JSON-encoded payload>", "requestId": "..."}`. Success
//! payloads are decoded twice; error payloads yield the human-readable text
//! the user should see.

#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{Ack, Policy};

/// Path of the policy resource beneath an API stage.
pub const POLICY_RESOURCE: &str = "/policy";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: Option<Value>,
    #[serde(rename = "requestId", default)]
    request_id: Option<String>,
}

/// Decode a `GET /policy` list response.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the envelope or payload is malformed.
pub fn decode_policies(body: &str) -> Result<Vec<Policy>, ApiError> {
    let (message, _) = open_envelope(body)?;
    decode_payload(message)
}

/// Decode a `GET /policy?id&policy_name` response.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the envelope or payload is malformed.
pub fn decode_policy(body: &str) -> Result<Policy, ApiError> {
    let (message, _) = open_envelope(body)?;
    decode_payload(message)
}

/// Decode the acknowledgement of a create, update or delete.
///
/// A `message` string that is not itself JSON is kept as a plain string.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not a JSON envelope.
pub fn decode_ack(body: &str) -> Result<Ack, ApiError> {
    if body.trim().is_empty() {
        return Ok(Ack { message: Value::Null, request_id: None });
    }
    let (message, request_id) = open_envelope(body)?;
    let message = match message {
        Value::String(encoded) => serde_json::from_str(&encoded).unwrap_or(Value::String(encoded)),
        other => other,
    };
    Ok(Ack { message, request_id })
}

/// Decode a response body with `decode` when `status` is 2xx, otherwise
/// classify it as an error.
///
/// # Errors
///
/// Returns the classified status error or the decoder's error.
pub fn read_response<T>(status: u16, body: &str, decode: fn(&str) -> Result<T, ApiError>) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        decode(body)
    } else {
        Err(error_from_response(status, body))
    }
}

/// Classify a non-2xx response.
///
/// HTTP 400 becomes [`ApiError::Rejected`] carrying the server's message
/// (falling back to the raw body); every other status becomes
/// [`ApiError::Status`].
#[must_use]
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    let message = server_message(body);
    if status == 400 {
        let message = message.unwrap_or_else(|| body.trim().to_owned());
        ApiError::Rejected { message }
    } else {
        ApiError::Status { status, message }
    }
}

/// Human-readable `message` text of an error body, if any.
///
/// The backend double-encodes messages (`"\"Missing policy name\""`); the
/// gateway itself sends plain ones (`"Unauthorized"`). Both decode to the
/// bare text.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let envelope: Envelope = serde_json::from_str(body).ok()?;
    match envelope.message? {
        Value::String(text) => Some(serde_json::from_str::<String>(&text).unwrap_or(text)),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn open_envelope(body: &str) -> Result<(Value, Option<String>), ApiError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("response envelope: {e}")))?;
    let message = envelope
        .message
        .ok_or_else(|| ApiError::Decode("response has no message".to_owned()))?;
    Ok((message, envelope.request_id))
}

fn decode_payload<T: DeserializeOwned>(message: Value) -> Result<T, ApiError> {
    let decoded = match message {
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => serde_json::from_value(other),
    };
    decoded.map_err(|e| ApiError::Decode(format!("response message: {e}")))
}
