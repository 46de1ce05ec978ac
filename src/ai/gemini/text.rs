use super::client::GeminiHttpClient;
use super::types::{first_text, GenerateContentRequest};
use crate::ai::{TextGenerationService, TextResult, NO_RESULT};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Duration::from_secs(30), reqwest::Client::new())
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

    /// Pull the first candidate's first text part out of a 2xx body.
    fn extract_text(body: &str) -> TextResult {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(response) => match first_text(&response) {
                Some(text) => text.to_string(),
                None => {
                    tracing::warn!("Gemini reply carried no text candidate");
                    NO_RESULT.to_string()
                }
            },
            Err(e) => {
                tracing::warn!("Unreadable Gemini reply ({}): {}", e, body);
                NO_RESULT.to_string()
            }
        }
    }
}

super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_text(&self, prompt: &str) -> Result<TextResult> {
        tracing::debug!("Sending text generation request to Gemini ({})", self.http.model());

        let request = GenerateContentRequest::from_prompt(prompt);
        let body = self.http.generate_content(&request).await?;

        Ok(Self::extract_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::Error;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-pro";

    fn make_client(server: &MockServer, model: &str) -> GeminiTextClient {
        GeminiTextClient::new("test-key".to_string(), model.to_string())
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_text_parses_response() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "Write something" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "Golden hour never looked this good" }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);

        let text = client.generate_text("Write something").await.unwrap();
        assert_eq!(text, "Golden hour never looked this good");
    }

    #[tokio::test]
    async fn test_malformed_replies_fall_back_to_no_result() {
        let bodies = [
            ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "candidates": [{ "content": {} }] })),
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [] } }]
            })),
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": "nope" })),
            ResponseTemplate::new(200).set_body_string("not json at all"),
        ];

        for template in bodies {
            let server = MockServer::start().await;
            test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
                .respond_with(template)
                .mount(&server)
                .await;

            let client = make_client(&server, DEFAULT_MODEL);
            let text = client.generate_text("prompt").await.unwrap();
            assert_eq!(text, NO_RESULT);
        }
    }

    #[tokio::test]
    async fn test_malformed_later_candidate_keeps_first_text() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "first candidate" }] } },
                    "x"
                ]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        let text = client.generate_text("prompt").await.unwrap();
        assert_eq!(text, "first candidate");
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);

        let err = client.generate_text("prompt").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("forbidden"));
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_http_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = GeminiTextClient::new_with_client(
            "test-key".to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_millis(100),
            reqwest::Client::new(),
        )
        .with_base_url(server.uri());

        let err = client.generate_text("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_generate_text_strips_models_prefix_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "models/gemini-pro");

        client.generate_text("prompt").await.unwrap();
    }
}
