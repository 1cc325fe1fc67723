//! Session endpoints for the console chrome.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in happens upstream: an authenticating proxy in front of the host
//! injects `x-auth-request-user` / `x-auth-request-email`. Without one, a
//! configured development identity stands in. The host keeps no sessions of
//! its own, so sign-out only reports where the browser should go next.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::{FromRef, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use client::net::types::{LogoutResponse, User};

use crate::config::DevUser;
use crate::state::AppState;

const USER_HEADER: &str = "x-auth-request-user";
const EMAIL_HEADER: &str = "x-auth-request-email";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Caller identity from proxy headers, else the development user.
/// Use as a handler parameter to require authentication.
pub struct UpstreamUser(pub User);

impl<S> axum::extract::FromRequestParts<S> for UpstreamUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        identity_from_headers(&parts.headers, app_state.config.dev_user.as_ref())
            .map(Self)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

pub(crate) fn identity_from_headers(headers: &HeaderMap, dev_user: Option<&DevUser>) -> Option<User> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };
    match header(USER_HEADER) {
        Some(username) => Some(User { username, email: header(EMAIL_HEADER) }),
        None => dev_user.map(|dev| User { username: dev.username.clone(), email: dev.email.clone() }),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: the signed-in user.
pub async fn me(UpstreamUser(user): UpstreamUser) -> Json<User> {
    Json(user)
}

/// `POST /api/auth/logout`: where to send the browser after sign-out.
pub async fn logout(State(state): State<AppState>) -> Json<LogoutResponse> {
    tracing::info!(redirect = state.config.sign_out_url.is_some(), "sign-out requested");
    Json(LogoutResponse { redirect: state.config.sign_out_url.clone() })
}
