//! REST API helpers for communicating with the host.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/[`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Policy calls classify every response through
//! [`policies::wire::read_response`], so pages only ever see [`ApiError`].
//! Session calls degrade to `None` instead of failing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use policies::{Ack, ApiError, CreatePolicy, Policy, PolicyApi, PolicyKey, UpdatePolicy};

use super::types::User;
#[cfg(any(test, feature = "hydrate"))]
use super::types::LogoutResponse;

/// Host route that proxies the policy backend.
pub const POLICY_ENDPOINT: &str = "/api/policy";

/// Where the browser goes after signing out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignOutTarget {
    Redirect(String),
    Reload,
}

#[cfg(any(test, feature = "hydrate"))]
fn sign_out_target(response: Option<LogoutResponse>) -> SignOutTarget {
    match response.and_then(|r| r.redirect).filter(|url| !url.trim().is_empty()) {
        Some(url) => SignOutTarget::Redirect(url),
        None => SignOutTarget::Reload,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// [`PolicyApi`] over the host's `/api/policy` proxy.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpPolicyApi;

#[cfg(feature = "hydrate")]
async fn exchange<T>(
    request: Result<gloo_net::http::Request, gloo_net::Error>,
    decode: fn(&str) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let response = request.map_err(transport_error)?.send().await.map_err(transport_error)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    policies::wire::read_response(status, &body, decode)
}

impl PolicyApi for HttpPolicyApi {
    async fn list(&self) -> Result<Vec<Policy>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(POLICY_ENDPOINT).build();
            exchange(request, policies::wire::decode_policies).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn get(&self, key: &PolicyKey) -> Result<Policy, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(POLICY_ENDPOINT).query(key.query_pairs()).build();
            exchange(request, policies::wire::decode_policy).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(ApiError::Unavailable)
        }
    }

    async fn create(&self, request: &CreatePolicy) -> Result<Ack, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(POLICY_ENDPOINT).json(request);
            exchange(request, policies::wire::decode_ack).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn update(&self, request: &UpdatePolicy) -> Result<Ack, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::put(POLICY_ENDPOINT).json(request);
            exchange(request, policies::wire::decode_ack).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn delete(&self, key: &PolicyKey) -> Result<Ack, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::delete(POLICY_ENDPOINT).query(key.query_pairs()).build();
            exchange(request, policies::wire::decode_ack).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(ApiError::Unavailable)
        }
    }
}

/// The signed-in session as seen by the console chrome.
#[allow(async_fn_in_trait)]
pub trait SessionContext {
    /// The current user, `None` when unknown or signed out.
    async fn current_user(&self) -> Option<User>;

    /// End the session and report where the browser should go.
    async fn sign_out(&self) -> SignOutTarget;
}

/// [`SessionContext`] backed by the host's `/api/auth/*` routes.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostedSession;

impl SessionContext for HostedSession {
    async fn current_user(&self) -> Option<User> {
        fetch_current_user().await
    }

    async fn sign_out(&self) -> SignOutTarget {
        logout().await
    }
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign out via `POST /api/auth/logout` and report where to go next.
pub async fn logout() -> SignOutTarget {
    #[cfg(feature = "hydrate")]
    {
        let response = match gloo_net::http::Request::post("/api/auth/logout").send().await {
            Ok(resp) if resp.ok() => resp.json::<LogoutResponse>().await.ok(),
            Ok(resp) => {
                log::warn!("logout failed: {}", resp.status());
                None
            }
            Err(e) => {
                log::warn!("logout failed: {}", transport_error(e));
                None
            }
        };
        sign_out_target(response)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        SignOutTarget::Reload
    }
}
