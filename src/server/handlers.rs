use super::extract::ValidJson;
use super::AppState;
use crate::models::{
    ChatReply, ChatRequest, FileDescriptor, GenerationRequest, ImageRequest, ImageResponse,
    ModerationCheckRequest, ModerationVerdict, PostResponse, SocialPostRequest, SubscribeResponse,
    TeaserRequest, TeaserResponse,
};
use crate::{Error, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

pub const BANNER: &str = "AI Social Gemini Backend with Google Drive!";

pub async fn banner() -> &'static str {
    BANNER
}

pub async fn list_drive_images(State(state): State<AppState>) -> Result<Json<Vec<FileDescriptor>>> {
    let files = state.drive.list_images().await?;
    info!("Listed {} Drive images", files.len());
    Ok(Json(files))
}

/// Never fails: an absent or unreadable body counts as "no locator".
pub async fn check_moderation(
    State(state): State<AppState>,
    body: std::result::Result<Json<ModerationCheckRequest>, JsonRejection>,
) -> Json<ModerationVerdict> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Moderation body unreadable, treating as empty: {}", rejection);
            ModerationCheckRequest::default()
        }
    };

    let verdict = state.moderation.check(request.image_url.as_deref());
    if !verdict.approved {
        info!("Moderation rejected locator: {:?}", verdict.reason);
    }
    Json(verdict)
}

async fn generate_text(state: &AppState, request: GenerationRequest) -> Result<String> {
    state.text.generate_text(&request.prompt()).await
}

pub async fn generate_social_post(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<SocialPostRequest>,
) -> Result<Json<PostResponse>> {
    let post = generate_text(&state, request.into()).await?;
    Ok(Json(PostResponse { post }))
}

pub async fn generate_teaser(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<TeaserRequest>,
) -> Result<Json<TeaserResponse>> {
    let teaser = generate_text(&state, request.into()).await?;
    Ok(Json(TeaserResponse { teaser }))
}

pub async fn send_chat(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let reply = generate_text(&state, request.into()).await?;
    Ok(Json(ChatReply { reply }))
}

pub async fn generate_image(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ImageRequest>,
) -> Result<Json<ImageResponse>> {
    let request = GenerationRequest::from(request);
    let image = state
        .image
        .generate_image(&request.prompt())
        .await?
        .ok_or(Error::NoImageGenerated)?;
    Ok(Json(ImageResponse { image }))
}

/// Rendering of the submitted `email` used in the acknowledgement.
///
/// A string is echoed as-is, any other JSON value by its JSON text, and an
/// absent field or unreadable body as `undefined`.
fn email_label(body: Option<&Value>) -> String {
    match body.and_then(|b| b.get("email")) {
        Some(Value::String(email)) => email.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}

/// Acknowledges the address without checking or storing it. Never fails.
pub async fn subscribe(
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Json<SubscribeResponse> {
    let body = match body {
        Ok(Json(body)) => Some(body),
        Err(rejection) => {
            debug!("Subscription body unreadable: {}", rejection);
            None
        }
    };

    info!("Subscription request acknowledged");
    Json(SubscribeResponse {
        success: true,
        message: format!("Subscribed {}", email_label(body.as_ref())),
    })
}
