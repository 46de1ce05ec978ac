//! Gemini payload types for the text and image endpoints.
//!
//! Replies are read by navigating to the first candidate or image entry,
//! so a reply missing any level, or carrying oddly shaped siblings, is
//! normalized instead of failing to decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content container used in `generateContent` requests and responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Only `text` is read; other part kinds decode with `text = None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// First candidate's first part, if it carries non-empty text.
///
/// Only that one path is inspected, so other candidates or parts of any
/// shape do not affect the result.
pub fn first_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}

#[derive(Debug, Serialize)]
pub struct GenerateImageRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Default, PartialEq)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub base64_data: Option<String>,
}

impl GeneratedImage {
    /// Read the first entry of an image reply's `images` array.
    pub fn first_in(body: &Value) -> Option<Self> {
        let entry = body.pointer("/images/0")?;
        let field = |name: &str| entry.get(name).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            url: field("url"),
            base64_data: field("base64Data"),
        })
    }

    /// Direct URL if present, else a PNG data URI built from the inline payload.
    pub fn to_locator(&self) -> Option<String> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_string());
        }
        self.base64_data
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|data| format!("data:image/png;base64,{}", data))
    }
}
