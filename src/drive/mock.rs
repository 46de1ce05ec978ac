use super::DriveService;
use crate::models::FileDescriptor;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockDriveClient {
    files: Vec<FileDescriptor>,
    failure: Option<String>,
    list_count: Arc<Mutex<usize>>,
}

impl MockDriveClient {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            failure: None,
            list_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_file(mut self, file: FileDescriptor) -> Self {
        self.files.push(file);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn get_list_count(&self) -> usize {
        *self.list_count.lock().unwrap()
    }
}

impl Default for MockDriveClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriveService for MockDriveClient {
    async fn list_images(&self) -> Result<Vec<FileDescriptor>> {
        *self.list_count.lock().unwrap() += 1;

        match &self.failure {
            Some(message) => Err(Error::Drive(message.clone())),
            None => Ok(self.files.clone()),
        }
    }
}
