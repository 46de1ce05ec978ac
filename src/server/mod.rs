//! REST surface: routes, shared handler state, and HTTP middleware.

pub mod extract;
pub mod handlers;

use crate::ai::{ImageGenerationService, TextGenerationService};
use crate::drive::DriveService;
use crate::moderation::ModerationService;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Services shared by every handler. Holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub text: Arc<dyn TextGenerationService>,
    pub image: Arc<dyn ImageGenerationService>,
    pub drive: Arc<dyn DriveService>,
    pub moderation: Arc<dyn ModerationService>,
}

pub fn router(state: AppState) -> Router {
    // Any origin may call the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::banner))
        .route("/api/drive/images", get(handlers::list_drive_images))
        .route("/api/moderation/check", post(handlers::check_moderation))
        .route("/api/social/generate", post(handlers::generate_social_post))
        .route("/api/teaser/generate", post(handlers::generate_teaser))
        .route("/api/chat/send", post(handlers::send_chat))
        .route("/api/image/generate", post(handlers::generate_image))
        .route("/api/subscription/subscribe", post(handlers::subscribe))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
