//! AI provider integration for text and image generation
//!
//! Text and image generation deliberately model "nothing usable came back"
//! differently: text falls back to [`NO_RESULT`], images return `None`.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageClient, MockTextClient};

use crate::Result;
use async_trait::async_trait;

/// Text returned to callers when the provider reply has no usable candidate.
pub const NO_RESULT: &str = "(No result)";

/// Always populated; falls back to [`NO_RESULT`].
pub type TextResult = String;

/// A direct URL or a `data:image/png;base64,…` URI; `None` when no image was produced.
pub type ImageResult = Option<String>;

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<TextResult>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<ImageResult>;
}
