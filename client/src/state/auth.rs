//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Filled once by the app shell from `/api/auth/me`; the top navigation reads
//! it for the user menu. Authentication itself happens in front of the host.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// User menu button text; empty while unknown.
    pub fn username(&self) -> String {
        self.user.as_ref().map(|user| user.username.clone()).unwrap_or_default()
    }

    /// Secondary line in the user menu, when the identity carries an email.
    pub fn email(&self) -> Option<String> {
        self.user.as_ref().and_then(|user| user.email.clone()).filter(|email| !email.is_empty())
    }
}
