//! HTTP image fetcher backed by reqwest

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::domain::errors::FetchError;
use crate::ports::ImageFetcher;
use crate::services::uploader::MAX_IMAGE_BYTES;

/// Default timeout for a whole image download
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Downloads emote images over HTTP
///
/// Bodies are read chunk by chunk and the download is abandoned as soon as
/// it passes `max_bytes`, so an oversized image is never held in memory.
#[derive(Clone)]
pub struct HttpImageFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Request(err.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Use an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            max_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Largest body accepted before the download is abandoned
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn too_large(&self, size: usize) -> FetchError {
        FetchError::TooLarge {
            size,
            limit: self.max_bytes,
        }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(declared) = response.content_length() {
            let declared = usize::try_from(declared).unwrap_or(usize::MAX);
            if declared > self.max_bytes {
                debug!(url = %url, size = declared, "Declared image size over the limit");
                return Err(self.too_large(declared));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| FetchError::Request(err.to_string()))?
        {
            body.extend_from_slice(&chunk);
            if body.len() > self.max_bytes {
                debug!(url = %url, read = body.len(), "Image body over the limit, abandoning");
                return Err(self.too_large(body.len()));
            }
        }
        Ok(body)
    }
}
