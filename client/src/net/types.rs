//! Session DTOs exchanged with the host.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// `POST /api/auth/logout` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Where the browser goes next; absent means reload the current page.
    #[serde(default)]
    pub redirect: Option<String>,
}
