#![recursion_limit = "256"]

mod config;
mod routes;
mod state;

use config::{ConfigError, HostConfig};

/// Reasons the host refuses to start.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Leptos(String),
    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = HostConfig::from_env()?;
    let port = config.port;
    tracing::info!(policy_url = %config.policy_url(), "policy backend configured");
    if config.dev_user.is_some() {
        tracing::warn!("IAMX_DEV_USER set; anonymous requests use the development identity");
    }

    let state = state::AppState::new(config)?;
    let app = routes::app(state).map_err(StartupError::Leptos)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "iamx console listening");
    axum::serve(listener, app).await?;
    Ok(())
}
