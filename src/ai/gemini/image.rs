use super::client::GeminiHttpClient;
use super::types::{GenerateImageRequest, GeneratedImage};
use crate::ai::{ImageGenerationService, ImageResult};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(
            api_key,
            model,
            Duration::from_secs(120),
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    fn extract_image(body: &str) -> ImageResult {
        let response: serde_json::Value = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Unreadable image reply ({}): {}", e, body);
                return None;
            }
        };

        let image = GeneratedImage::first_in(&response)?.to_locator();
        if image.is_none() {
            tracing::debug!("First image entry had neither url nor inline data");
        }
        image
    }
}

super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImageResult> {
        tracing::debug!("Sending image generation request to Gemini ({})", self.http.model());

        let body = self.http.generate(&GenerateImageRequest { prompt }).await?;

        Ok(Self::extract_image(&body))
    }
}
