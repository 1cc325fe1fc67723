//! Shared policy model and wire codec for the IAM-X policy backend.
//!
//! This crate owns the representation used by both the browser `client` and
//! the `cli`. The backend wraps every payload in a `{ "message": ... }`
//! envelope whose `message` is itself a JSON-encoded string; [`wire`] hides
//! that double encoding from callers.
//!
//! ERROR HANDLING
//! ==============
//! Every adapter reports failures as [`ApiError`]. Only backend rejections
//! (HTTP 400 with a message) are meant to reach the user; everything else is
//! logged by the caller. [`ApiError::is_surfaced`] is the single place that
//! draws that line.

pub mod api;
pub mod error;
pub mod model;
pub mod wire;

pub use api::PolicyApi;
pub use error::{ApiError, DocumentError};
pub use model::{
    Ack, CreatePolicy, Policy, PolicyKey, Timestamp, UpdatePolicy, check_document, format_timestamp, pretty_document,
};
