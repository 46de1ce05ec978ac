//! Data models and structures
//!
//! Defines the request-scoped records exchanged with the frontend, the
//! per-endpoint request bodies and response envelopes, and the process
//! configuration.

use crate::prompts;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metadata for one stored file returned by a Drive listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_content_link: Option<String>,
}

impl FileDescriptor {
    /// Best link for a preview, in the order the UI prefers them.
    pub fn preview_link(&self) -> Option<&str> {
        self.thumbnail_link
            .as_deref()
            .or(self.web_content_link.as_deref())
            .or(self.web_view_link.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModerationVerdict {
    pub approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ModerationVerdict {
    pub fn approved() -> Self {
        Self {
            approved: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            approved: false,
            reason: Some(reason.into()),
        }
    }
}

// Request bodies

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationCheckRequest {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostRequest {
    pub image_desc: String,
    pub platform: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaserRequest {
    pub image_desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

/// Accepted and acknowledged only; nothing is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub email: String,
}

/// Every generation call the router can make, one variant per provider call shape.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    SocialPost { platform: String, image_desc: String },
    Teaser { image_desc: String },
    Chat { message: String },
    Image { prompt: String },
}

impl GenerationRequest {
    /// Text sent to the provider for this request.
    pub fn prompt(&self) -> String {
        match self {
            GenerationRequest::SocialPost {
                platform,
                image_desc,
            } => prompts::render(
                prompts::SOCIAL_POST,
                &[("platform", platform), ("imageDesc", image_desc)],
            ),
            GenerationRequest::Teaser { image_desc } => {
                prompts::render(prompts::TEASER, &[("imageDesc", image_desc)])
            }
            GenerationRequest::Chat { message } => {
                prompts::render(prompts::CHAT, &[("message", message)])
            }
            GenerationRequest::Image { prompt } => prompt.clone(),
        }
    }
}

impl From<SocialPostRequest> for GenerationRequest {
    fn from(req: SocialPostRequest) -> Self {
        GenerationRequest::SocialPost {
            platform: req.platform,
            image_desc: req.image_desc,
        }
    }
}

impl From<TeaserRequest> for GenerationRequest {
    fn from(req: TeaserRequest) -> Self {
        GenerationRequest::Teaser {
            image_desc: req.image_desc,
        }
    }
}

impl From<ChatRequest> for GenerationRequest {
    fn from(req: ChatRequest) -> Self {
        GenerationRequest::Chat {
            message: req.message,
        }
    }
}

impl From<ImageRequest> for GenerationRequest {
    fn from(req: ImageRequest) -> Self {
        GenerationRequest::Image { prompt: req.prompt }
    }
}

// Response envelopes

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostResponse {
    pub post: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeaserResponse {
    pub teaser: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageResponse {
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

// Configuration

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-pro";
pub const DEFAULT_IMAGE_MODEL: &str = "imagegeneration";

#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_refresh_token: String,
    pub port: u16,
    pub text_model: String,
    pub image_model: String,
    pub text_timeout: Duration,
    pub image_timeout: Duration,
    pub drive_timeout: Duration,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| crate::Error::Config(format!("{} not set", key)))
        };
        let secs = |key: &str, default: u64| -> crate::Result<Duration> {
            match get(key) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| crate::Error::Config(format!("{} must be whole seconds", key))),
                None => Ok(Duration::from_secs(default)),
            }
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| crate::Error::Config(format!("Invalid PORT '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            google_api_key: required("GOOGLE_API_KEY")?,
            google_client_id: get("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: get("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            google_redirect_uri: get("GOOGLE_REDIRECT_URI").unwrap_or_default(),
            google_refresh_token: required("GOOGLE_REFRESH_TOKEN")?,
            port,
            text_model: get("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: get("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            text_timeout: secs("TEXT_TIMEOUT_SECS", 30)?,
            image_timeout: secs("IMAGE_TIMEOUT_SECS", 120)?,
            drive_timeout: secs("DRIVE_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Base URL the frontend client talks to.
pub fn api_base_url_from_env() -> String {
    std::env::var("REACT_APP_API_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
