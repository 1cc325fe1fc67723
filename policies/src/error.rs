//! Error types shared by every policy API adapter.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Failure of a single policy API round trip.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the request with HTTP 400 and a message.
    #[error("{message}")]
    Rejected { message: String },
    /// Any other non-2xx status.
    #[error("backend returned HTTP {status}")]
    Status { status: u16, message: Option<String> },
    /// The request never produced a response (network, CORS, DNS).
    #[error("request failed: {0}")]
    Transport(String),
    /// A 2xx response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The adapter cannot run in this environment (e.g. during SSR).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Whether this failure is shown to the user.
    ///
    /// Backend validation errors (HTTP 400) carry a message written for
    /// humans and are surfaced as notifications. Every other class is only
    /// logged.
    #[must_use]
    pub fn is_surfaced(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Policy document text that is not syntactically valid JSON.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Policy document is not valid JSON (Ln {line}, Col {column}): {reason}")]
pub struct DocumentError {
    pub line: usize,
    pub column: usize,
    pub reason: String,
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        let full = err.to_string();
        let reason = full.split(" at line ").next().unwrap_or(&full).to_owned();
        Self { line: err.line(), column: err.column(), reason }
    }
}
