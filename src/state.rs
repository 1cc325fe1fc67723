//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the immutable host configuration and one pooled HTTP client for the
//! backend gateway; nothing else is shared between requests.

use std::sync::Arc;
use std::time::Duration;

use crate::config::HostConfig;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HostConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state with an HTTP client honoring the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: HostConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}
