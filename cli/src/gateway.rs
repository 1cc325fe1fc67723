//! [`PolicyApi`] straight against the backend gateway.
//!
//! Responses go through the same envelope decoding as the browser client, so
//! a rejection prints the same message the console would show.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::time::Duration;

use policies::wire::{self, POLICY_RESOURCE};
use policies::{Ack, ApiError, CreatePolicy, Policy, PolicyApi, PolicyKey, UpdatePolicy};
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GatewayClient {
    http: reqwest::Client,
    resource: String,
    token: Option<String>,
}

impl GatewayClient {
    /// Client for `{api_url}/{stage}/policy`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(api_url: &str, stage: &str, token: Option<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, resource: resource_url(api_url, stage), token })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    async fn exchange<T>(&self, request: RequestBuilder, decode: fn(&str) -> Result<T, ApiError>) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        };
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        wire::read_response(status, &body, decode)
    }
}

impl PolicyApi for GatewayClient {
    async fn list(&self) -> Result<Vec<Policy>, ApiError> {
        self.exchange(self.http.get(&self.resource), wire::decode_policies).await
    }

    async fn get(&self, key: &PolicyKey) -> Result<Policy, ApiError> {
        let request = self.http.get(&self.resource).query(&key.query_pairs());
        self.exchange(request, wire::decode_policy).await
    }

    async fn create(&self, request: &CreatePolicy) -> Result<Ack, ApiError> {
        self.exchange(self.http.post(&self.resource).json(request), wire::decode_ack).await
    }

    async fn update(&self, request: &UpdatePolicy) -> Result<Ack, ApiError> {
        self.exchange(self.http.put(&self.resource).json(request), wire::decode_ack).await
    }

    async fn delete(&self, key: &PolicyKey) -> Result<Ack, ApiError> {
        let request = self.http.delete(&self.resource).query(&key.query_pairs());
        self.exchange(request, wire::decode_ack).await
    }
}

pub(crate) fn resource_url(api_url: &str, stage: &str) -> String {
    let base = api_url.trim_end_matches('/');
    match stage.trim_matches('/') {
        "" => format!("{base}{POLICY_RESOURCE}"),
        stage => format!("{base}/{stage}{POLICY_RESOURCE}"),
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
