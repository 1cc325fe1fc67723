//! The policy API adapter contract.

use crate::error::ApiError;
use crate::model::{Ack, CreatePolicy, Policy, PolicyKey, UpdatePolicy};

/// One request/response round trip per call against the `/policy` resource.
///
/// No retries, batching or caching happen behind this trait; the backend is
/// authoritative for validation. Implementations classify failures with
/// [`crate::wire::error_from_response`] so callers can rely on
/// [`ApiError::is_surfaced`].
#[allow(async_fn_in_trait)]
pub trait PolicyApi {
    /// `GET /policy`
    async fn list(&self) -> Result<Vec<Policy>, ApiError>;

    /// `GET /policy?id&policy_name`
    async fn get(&self, key: &PolicyKey) -> Result<Policy, ApiError>;

    /// `POST /policy`
    async fn create(&self, request: &CreatePolicy) -> Result<Ack, ApiError>;

    /// `PUT /policy`
    async fn update(&self, request: &UpdatePolicy) -> Result<Ack, ApiError>;

    /// `DELETE /policy?id&policy_name`
    async fn delete(&self, key: &PolicyKey) -> Result<Ack, ApiError>;
}
