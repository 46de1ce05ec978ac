//! Application wiring: configuration to concrete services to a running server.

use crate::ai::{GeminiImageClient, GeminiTextClient};
use crate::drive::{DriveClient, OAuthCredentials};
use crate::models::Config;
use crate::moderation::KeywordModerator;
use crate::server::{self, AppState};
use crate::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Owns the service graph for the lifetime of the process.
///
/// The Drive credential is created here, shared with the Drive client, and
/// dropped when the `App` is.
pub struct App {
    state: AppState,
    port: u16,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(state: AppState, port: u16) -> Self {
        Self { state, port }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Text provider: Gemini (model: {})", config.text_model);
        let text = GeminiTextClient::new_with_client(
            config.google_api_key.clone(),
            config.text_model.clone(),
            config.text_timeout,
            http_client.clone(),
        );

        info!("Image provider: Gemini (model: {})", config.image_model);
        let image = GeminiImageClient::new_with_client(
            config.google_api_key.clone(),
            config.image_model.clone(),
            config.image_timeout,
            http_client.clone(),
        );

        let credentials = Arc::new(OAuthCredentials::new(
            config.google_client_id.clone(),
            config.google_client_secret.clone(),
            config.google_redirect_uri.clone(),
            config.google_refresh_token.clone(),
            config.drive_timeout,
            http_client.clone(),
        ));
        info!(
            "Drive credential configured for client {} (redirect URI: {})",
            credentials.client_id(),
            credentials.redirect_uri()
        );
        let drive = DriveClient::new(credentials, config.drive_timeout, http_client);

        let state = AppState {
            text: Arc::new(text),
            image: Arc::new(image),
            drive: Arc::new(drive),
            moderation: Arc::new(KeywordModerator::new()),
        };

        Self::with_services(state, config.port)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self, host: &str, port: Option<u16>) -> Result<()> {
        let port = port.unwrap_or(self.port);
        let listener = tokio::net::TcpListener::bind((host, port)).await?;
        let addr: SocketAddr = listener.local_addr()?;
        info!("Backend running on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
