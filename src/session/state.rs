use super::api::ApiClient;
use crate::models::{FileDescriptor, ModerationVerdict};
use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    #[default]
    Twitter,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Instagram, Platform::Facebook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub from: Speaker,
    pub text: String,
}

/// A generated image: either a remote URL or an inline data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage(String);

impl GeneratedImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Remote images are linked; anything else is embedded as-is.
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http")
    }
}

/// Transient UI state. Lives only as long as the page does.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub images: Vec<FileDescriptor>,
    pub selected: Option<FileDescriptor>,
    pub moderation: Option<ModerationVerdict>,
    pub platform: Platform,
    pub post: Option<String>,
    pub teaser: Option<String>,
    pub chat: Vec<ChatEntry>,
    pub chat_input: String,
    pub subscription_message: Option<String>,
    pub generated_image: Option<GeneratedImage>,
    pub last_error: Option<String>,
}

impl SessionState {
    /// Post/teaser controls are only offered once the selection is approved.
    pub fn can_generate(&self) -> bool {
        self.selected.is_some() && self.moderation.as_ref().is_some_and(|v| v.approved)
    }
}

/// Drives [`SessionState`] through the backend.
///
/// Slots only change after a call completes successfully; a failed call
/// leaves them as they were and records the error in `last_error`.
pub struct Session {
    api: ApiClient,
    state: SessionState,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.state.platform = platform;
    }

    pub fn set_chat_input(&mut self, input: impl Into<String>) {
        self.state.chat_input = input.into();
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.state.last_error = None,
            Err(e) => {
                tracing::warn!("Session call failed: {}", e);
                self.state.last_error = Some(e.to_string());
            }
        }
        result
    }

    pub async fn load_images(&mut self) -> Result<()> {
        let result = self.api.list_images().await;
        let images = self.record(result)?;
        self.state.images = images;
        Ok(())
    }

    /// Select `file` and ask the backend to moderate its view link.
    pub async fn select_and_moderate(&mut self, file: FileDescriptor) -> Result<()> {
        let locator = file.web_view_link.clone();
        self.state.selected = Some(file);
        self.state.moderation = None;
        self.state.post = None;
        self.state.teaser = None;

        let result = self.api.check_moderation(locator.as_deref()).await;
        let verdict = self.record(result)?;
        self.state.moderation = Some(verdict);
        Ok(())
    }

    /// Description used for generation: the selected file's name.
    fn approved_description(&mut self) -> Result<String> {
        let outcome = match &self.state.selected {
            None => Err(Error::NoSelection),
            Some(_) if !self.state.can_generate() => Err(Error::ModerationRequired),
            Some(file) => Ok(file.name.clone()),
        };
        self.record(outcome)
    }

    pub async fn generate_post(&mut self) -> Result<()> {
        let image_desc = self.approved_description()?;
        let platform = self.state.platform;

        let result = self.api.generate_post(&image_desc, platform.as_str()).await;
        let post = self.record(result)?;
        self.state.post = Some(post);
        Ok(())
    }

    pub async fn generate_teaser(&mut self) -> Result<()> {
        let image_desc = self.approved_description()?;

        let result = self.api.generate_teaser(&image_desc).await;
        let teaser = self.record(result)?;
        self.state.teaser = Some(teaser);
        Ok(())
    }

    /// Appends the user's line immediately and the reply once it arrives.
    /// The input box is cleared only when the reply arrives.
    pub async fn send_chat(&mut self) -> Result<()> {
        let message = self.state.chat_input.clone();
        self.state.chat.push(ChatEntry {
            from: Speaker::User,
            text: message.clone(),
        });

        let result = self.api.send_chat(&message).await;
        let reply = self.record(result)?;
        self.state.chat.push(ChatEntry {
            from: Speaker::Ai,
            text: reply,
        });
        self.state.chat_input.clear();
        Ok(())
    }

    pub async fn subscribe(&mut self, email: &str) -> Result<()> {
        let result = self.api.subscribe(email).await;
        let response = self.record(result)?;
        self.state.subscription_message = Some(response.message);
        Ok(())
    }

    pub async fn generate_image(&mut self, prompt: &str) -> Result<()> {
        self.state.generated_image = None;

        let result = self.api.generate_image(prompt).await;
        let image = self.record(result)?;
        self.state.generated_image = Some(GeneratedImage(image));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn file(name: &str, link: &str) -> FileDescriptor {
        FileDescriptor {
            id: name.to_string(),
            name: name.to_string(),
            mime_type: "image/png".to_string(),
            thumbnail_link: None,
            web_view_link: Some(link.to_string()),
            web_content_link: None,
        }
    }

    fn session(server: &MockServer) -> Session {
        Session::new(ApiClient::new(format!("{}/api", server.uri())))
    }

    async fn mount_verdict(server: &MockServer, verdict: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/api/moderation/check"))
            .respond_with(ResponseTemplate::new(200).set_body_json(verdict))
            .mount(server)
            .await;
    }

    #[test]
    fn test_generated_image_kind() {
        assert!(GeneratedImage("https://img/1.png".to_string()).is_remote());
        assert!(!GeneratedImage("data:image/png;base64,AAAA".to_string()).is_remote());
    }

    #[test]
    fn test_platform_default_and_names() {
        assert_eq!(Platform::default(), Platform::Twitter);
        let names: Vec<&str> = Platform::ALL.iter().map(Platform::as_str).collect();
        assert_eq!(names, vec!["Twitter", "Instagram", "Facebook"]);
    }

    #[tokio::test]
    async fn test_generation_requires_approved_verdict() {
        let server = MockServer::start().await;
        mount_verdict(&server, serde_json::json!({ "approved": false, "reason": "NSFW detected" }))
            .await;
        Mock::given(method("POST"))
            .and(path("/api/social/generate"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server);

        let err = session.generate_post().await.unwrap_err();
        assert!(matches!(err, Error::NoSelection));

        session
            .select_and_moderate(file("nsfw.png", "http://x/nsfw.png"))
            .await
            .unwrap();
        assert!(!session.state().can_generate());

        let err = session.generate_teaser().await.unwrap_err();
        assert!(matches!(err, Error::ModerationRequired));
        assert!(session.state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_post_uses_selected_name_and_platform() {
        let server = MockServer::start().await;
        mount_verdict(&server, serde_json::json!({ "approved": true })).await;
        Mock::given(method("POST"))
            .and(path("/api/social/generate"))
            .and(body_json(serde_json::json!({
                "imageDesc": "sunset.png",
                "platform": "Facebook"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "post": "Wow" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server);
        session
            .select_and_moderate(file("sunset.png", "http://x/sunset.png"))
            .await
            .unwrap();
        session.set_platform(Platform::Facebook);
        session.generate_post().await.unwrap();

        assert_eq!(session.state().post.as_deref(), Some("Wow"));
        assert_eq!(session.state().last_error, None);
    }

    #[tokio::test]
    async fn test_reselecting_clears_previous_results() {
        let server = MockServer::start().await;
        mount_verdict(&server, serde_json::json!({ "approved": true })).await;
        Mock::given(method("POST"))
            .and(path("/api/teaser/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "teaser": "Hmm" })),
            )
            .mount(&server)
            .await;

        let mut session = session(&server);
        session.select_and_moderate(file("a.png", "http://x/a")).await.unwrap();
        session.generate_teaser().await.unwrap();
        assert_eq!(session.state().teaser.as_deref(), Some("Hmm"));

        session.select_and_moderate(file("b.png", "http://x/b")).await.unwrap();
        assert_eq!(session.state().teaser, None);
        assert_eq!(session.state().selected.as_ref().map(|f| f.name.as_str()), Some("b.png"));
    }

    #[tokio::test]
    async fn test_chat_transcript_and_failure_handling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/send"))
            .and(body_json(serde_json::json!({ "message": "hello" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": "hi!" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat/send"))
            .and(body_json(serde_json::json!({ "message": "again" })))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "boom" })),
            )
            .mount(&server)
            .await;

        let mut session = session(&server);
        session.set_chat_input("hello");
        session.send_chat().await.unwrap();

        assert_eq!(
            session.state().chat,
            vec![
                ChatEntry { from: Speaker::User, text: "hello".to_string() },
                ChatEntry { from: Speaker::Ai, text: "hi!".to_string() },
            ]
        );
        assert_eq!(session.state().chat_input, "");

        session.set_chat_input("again");
        assert!(session.send_chat().await.is_err());
        assert_eq!(session.state().chat.len(), 3);
        assert_eq!(session.state().chat_input, "again");
        assert!(session.state().last_error.as_deref().unwrap().contains("boom"));
    }

    #[tokio::test]
    async fn test_failed_listing_keeps_previous_images() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/drive/images"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "1", "name": "one.png", "mimeType": "image/png" }
            ])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/drive/images"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "down" })),
            )
            .mount(&server)
            .await;

        let mut session = session(&server);
        session.load_images().await.unwrap();
        assert_eq!(session.state().images.len(), 1);

        assert!(session.load_images().await.is_err());
        assert_eq!(session.state().images.len(), 1);
        assert!(session.state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_image_and_subscription_slots() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/image/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "image": "data:image/png;base64,AAAA"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/subscription/subscribe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Subscribed a@b.com"
            })))
            .mount(&server)
            .await;

        let mut session = session(&server);
        session.generate_image("a fox").await.unwrap();
        let image = session.state().generated_image.clone().unwrap();
        assert!(!image.is_remote());
        assert_eq!(image.as_str(), "data:image/png;base64,AAAA");

        session.subscribe("a@b.com").await.unwrap();
        assert_eq!(
            session.state().subscription_message.as_deref(),
            Some("Subscribed a@b.com")
        );
    }
}
