//! `/api/policy` proxy to the backend gateway stage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser never talks to the gateway directly. Each call is forwarded
//! once, with its query string, body and content type intact, and the
//! gateway's status and body come back unchanged so the client can classify
//! them. Only a transport failure is answered by the host itself (502).

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// Headers an authenticating proxy may use to hand over the caller's token.
const UPSTREAM_TOKEN_HEADERS: [&str; 2] = ["x-auth-request-access-token", "x-forwarded-access-token"];

/// `GET|POST|PUT|DELETE /api/policy`: forward to `{api}/{stage}/policy`.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = upstream_url(&state.config.policy_url(), query.as_deref());
    let mut request = state.http.request(method.clone(), &url);
    for name in [CONTENT_TYPE, ACCEPT] {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }
    if let Some(token) = upstream_authorization(&headers) {
        request = request.header(AUTHORIZATION, token);
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, %method, "policy backend unreachable");
            return unreachable_response();
        }
    };

    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, %method, %status, "policy backend response truncated");
            return unreachable_response();
        }
    };
    if status == StatusCode::BAD_REQUEST {
        tracing::info!(%method, %status, "policy backend rejected request");
    } else if !status.is_success() {
        tracing::warn!(%method, %status, "policy backend error");
    }

    match content_type {
        Some(content_type) => (status, [(CONTENT_TYPE, content_type)], bytes).into_response(),
        None => (status, bytes).into_response(),
    }
}

/// Join the backend resource URL and the caller's raw query string.
pub(crate) fn upstream_url(resource: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{resource}?{query}"),
        None => resource.to_owned(),
    }
}

/// The caller's `Authorization` header, else a token injected by the
/// authenticating proxy.
pub(crate) fn upstream_authorization(headers: &HeaderMap) -> Option<HeaderValue> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        return Some(value.clone());
    }
    UPSTREAM_TOKEN_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))
        .filter(|value| !value.is_empty())
        .cloned()
}

fn unreachable_response() -> Response {
    let body = serde_json::json!({ "message": "policy backend unreachable" });
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}
