//! Image Fetcher Port
//!
//! Downloads emote images from their CDN URL.

use async_trait::async_trait;

use crate::domain::errors::FetchError;

/// Service interface for downloading emote images
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the bytes behind `url`, failing on a non-success status
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
