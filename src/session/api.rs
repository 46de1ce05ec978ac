use crate::models::{
    api_base_url_from_env, ChatReply, ChatRequest, ErrorBody, FileDescriptor, ImageRequest,
    ImageResponse, ModerationCheckRequest, ModerationVerdict, PostResponse, SocialPostRequest,
    SubscribeResponse, SubscriptionRecord, TeaserRequest, TeaserResponse,
};
use crate::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed client for the backend's REST surface.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Uses `REACT_APP_API_URL`, falling back to `http://localhost:3000/api`.
    pub fn from_env() -> Self {
        Self::new(api_base_url_from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn decode<Resp: DeserializeOwned>(response: Response) -> Result<Resp> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn list_images(&self) -> Result<Vec<FileDescriptor>> {
        self.get("/drive/images").await
    }

    pub async fn check_moderation(&self, image_url: Option<&str>) -> Result<ModerationVerdict> {
        let body = ModerationCheckRequest {
            image_url: image_url.map(str::to_string),
        };
        self.post("/moderation/check", &body).await
    }

    pub async fn generate_post(&self, image_desc: &str, platform: &str) -> Result<String> {
        let body = SocialPostRequest {
            image_desc: image_desc.to_string(),
            platform: platform.to_string(),
        };
        let response: PostResponse = self.post("/social/generate", &body).await?;
        Ok(response.post)
    }

    pub async fn generate_teaser(&self, image_desc: &str) -> Result<String> {
        let body = TeaserRequest {
            image_desc: image_desc.to_string(),
        };
        let response: TeaserResponse = self.post("/teaser/generate", &body).await?;
        Ok(response.teaser)
    }

    pub async fn send_chat(&self, message: &str) -> Result<String> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        let response: ChatReply = self.post("/chat/send", &body).await?;
        Ok(response.reply)
    }

    pub async fn subscribe(&self, email: &str) -> Result<SubscribeResponse> {
        let body = SubscriptionRecord {
            email: email.to_string(),
        };
        self.post("/subscription/subscribe", &body).await
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<String> {
        let body = ImageRequest {
            prompt: prompt.to_string(),
        };
        let response: ImageResponse = self.post("/image/generate", &body).await?;
        Ok(response.image)
    }
}
