use crate::{Error, Result};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh a cached access token this long before it actually expires.
const EXPIRY_SKEW_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Long-lived OAuth2 credential for the storage provider.
///
/// Built once at startup from a refresh token and shared by reference
/// (`Arc`) with whatever needs authenticated Drive access. Access tokens
/// are minted lazily and refreshed when they are about to expire; callers
/// only ever see [`OAuthCredentials::access_token`].
pub struct OAuthCredentials {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    refresh_token: String,
    token_url: String,
    timeout: Duration,
    cached: Mutex<Option<AccessToken>>,
}

impl OAuthCredentials {
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        refresh_token: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            redirect_uri,
            refresh_token,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout,
            cached: Mutex::new(None),
        }
    }

    pub fn with_token_url(mut self, token_url: String) -> Self {
        self.token_url = token_url;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// A currently valid access token, refreshing it if needed.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.token.clone());
            }
            tracing::debug!("Drive access token expired, refreshing");
        }

        let fresh = self.refresh().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    async fn refresh(&self) -> Result<AccessToken> {
        let response = self
            .client
            .post(&self.token_url)
            .timeout(self.timeout)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach OAuth token endpoint: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Token refresh rejected (status {}): {}", status, error_text);
            return Err(Error::Auth(format!(
                "token refresh failed (status {}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let body: TokenResponse = response.json().await?;
        let lifetime = body.expires_in.unwrap_or(3600) - EXPIRY_SKEW_SECS;

        tracing::info!("Refreshed Drive access token");
        Ok(AccessToken {
            token: body.access_token,
            expires_at: Utc::now() + ChronoDuration::seconds(lifetime.max(0)),
        })
    }
}
