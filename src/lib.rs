//! Backend for an AI social-content tool.
//!
//! Lists images from Google Drive, runs an advisory moderation check, and
//! forwards post, teaser, chat, and image generation requests to Gemini,
//! reshaping each provider reply into a small JSON envelope.

pub mod ai;
pub mod app;
pub mod drive;
pub mod error;
pub mod models;
pub mod moderation;
pub mod prompts;
pub mod server;
pub mod session;

pub use error::{Error, Result};
