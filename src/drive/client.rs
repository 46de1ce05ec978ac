use super::{DriveService, OAuthCredentials};
use crate::models::FileDescriptor;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Images only, excluding anything in the trash.
pub const IMAGE_QUERY: &str = "mimeType contains 'image/' and trashed = false";
pub const FILE_FIELDS: &str =
    "files(id, name, mimeType, thumbnailLink, webViewLink, webContentLink)";

/// Single page per listing. No continuation token is followed, so anything
/// past this many results is dropped.
pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileDescriptor>,
}

pub struct DriveClient {
    client: Client,
    credentials: Arc<OAuthCredentials>,
    base_url: String,
    timeout: Duration,
}

impl DriveClient {
    pub fn new(credentials: Arc<OAuthCredentials>, timeout: Duration, client: Client) -> Self {
        Self {
            client,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl DriveService for DriveClient {
    async fn list_images(&self) -> Result<Vec<FileDescriptor>> {
        let token = self.credentials.access_token().await?;
        let page_size = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(format!("{}/drive/v3/files", self.base_url))
            .timeout(self.timeout)
            .bearer_auth(token)
            .query(&[
                ("q", IMAGE_QUERY),
                ("fields", FILE_FIELDS),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Drive: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Drive API error (status {}): {}", status, error_text);
            return Err(Error::Drive(format!(
                "status {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let list: FileList = response.json().await?;
        tracing::debug!("Drive listing returned {} images", list.files.len());
        Ok(list.files)
    }
}
