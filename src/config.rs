//! Host configuration parsed from environment variables.

use policies::wire::POLICY_RESOURCE;

pub const DEFAULT_API_STAGE: &str = "dev";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Identity reported by `/api/auth/me` when no authenticating proxy sits in
/// front of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevUser {
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Backend gateway base URL without a trailing slash.
    pub api_url: String,
    pub api_stage: String,
    pub port: u16,
    pub sign_out_url: Option<String>,
    pub dev_user: Option<DevUser>,
    pub timeouts: Timeouts,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Required:
    /// - `IAMX_API_URL`: backend gateway base URL
    ///
    /// Optional:
    /// - `IAMX_API_STAGE`: default `dev`
    /// - `PORT`: default 3000
    /// - `IAMX_SIGN_OUT_URL`: where the browser goes after sign-out
    /// - `IAMX_DEV_USER`, `IAMX_DEV_EMAIL`: fallback identity
    /// - `IAMX_REQUEST_TIMEOUT_SECS`: default 30
    /// - `IAMX_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `IAMX_API_URL` is missing or `PORT` is not
    /// a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env_non_empty("IAMX_API_URL")
            .ok_or(ConfigError::Missing { var: "IAMX_API_URL" })?
            .trim_end_matches('/')
            .to_owned();
        let api_stage = env_non_empty("IAMX_API_STAGE")
            .map(|stage| stage.trim_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_API_STAGE.to_owned());
        let port = match env_non_empty("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
        };
        let dev_user = env_non_empty("IAMX_DEV_USER")
            .map(|username| DevUser { username, email: env_non_empty("IAMX_DEV_EMAIL") });
        let timeouts = Timeouts {
            request_secs: env_parse_u64("IAMX_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("IAMX_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_url, api_stage, port, sign_out_url: env_non_empty("IAMX_SIGN_OUT_URL"), dev_user, timeouts })
    }

    /// Full URL of the backend policy resource for the configured stage.
    #[must_use]
    pub fn policy_url(&self) -> String {
        format!("{}/{}{POLICY_RESOURCE}", self.api_url, self.api_stage)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
