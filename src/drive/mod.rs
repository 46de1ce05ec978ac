//! Google Drive integration for listing the user's images
//!
//! The storage credential is an explicitly constructed [`OAuthCredentials`]
//! that the caller owns and hands to [`DriveClient`].

pub mod auth;
pub mod client;
pub mod mock;

pub use auth::OAuthCredentials;
pub use client::DriveClient;
pub use mock::MockDriveClient;

use crate::models::FileDescriptor;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DriveService: Send + Sync {
    /// Non-trashed images, at most [`client::PAGE_SIZE`] of them.
    async fn list_images(&self) -> Result<Vec<FileDescriptor>>;
}
