use super::{ImageGenerationService, ImageResult, TextGenerationService, TextResult};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Text provider stand-in. Echoes the prompt unless canned replies are set.
#[derive(Clone)]
pub struct MockTextClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Every call fails with `Error::AiProvider(message)`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_text(&self, prompt: &str) -> Result<TextResult> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(Error::AiProvider(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(prompt.to_string())
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Image provider stand-in returning a fixed outcome.
#[derive(Clone)]
pub struct MockImageClient {
    result: ImageResult,
    failure: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    /// Defaults to producing no image.
    pub fn new() -> Self {
        Self {
            result: None,
            failure: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image(mut self, image: String) -> Self {
        self.result = Some(image);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, _prompt: &str) -> Result<ImageResult> {
        *self.call_count.lock().unwrap() += 1;

        match &self.failure {
            Some(message) => Err(Error::AiProvider(message.clone())),
            None => Ok(self.result.clone()),
        }
    }
}
