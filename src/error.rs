//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror,
//! plus the mapping from errors onto the `{error}` JSON envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    AiProvider(String),

    #[error("Drive API error: {0}")]
    Drive(String),

    #[error("OAuth error: {0}")]
    Auth(String),

    /// The image provider answered successfully but produced nothing usable.
    #[error("No image generated")]
    NoImageGenerated,

    #[error("{0}")]
    BadRequest(String),

    /// Returned by [`crate::session::ApiClient`] when the backend answers non-2xx.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Moderation approval required before generating content")]
    ModerationRequired,

    #[error("No image selected")]
    NoSelection,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::BadRequest(_) => tracing::debug!("Client error: {}", self),
            Error::NoImageGenerated => tracing::warn!("Image provider returned no image"),
            _ => tracing::error!("Upstream failure: {}", self),
        }

        // Upstream messages are passed through verbatim.
        let body = json!({ "error": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
