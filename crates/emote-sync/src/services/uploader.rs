//! Uploader
//!
//! One bounded upload attempt against one guild: download the image,
//! enforce the size limit, then create the emoji under a timeout.

use std::time::Duration;
use tracing::debug;

use crate::domain::entities::{GuildSnapshot, RemoteEmote};
use crate::domain::value_objects::UploadFailure;
use crate::ports::{EmotePlatform, ImageFetcher};

/// Largest image accepted for upload, in bytes
pub const MAX_IMAGE_BYTES: usize = 256_000;
/// Time allowed for the create-emoji call
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(15);
/// Audit-log reason attached to created emojis
pub const UPLOAD_REASON: &str = "Synced from emote file";

/// Limits applied to every upload attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_image_bytes: usize,
    pub timeout: Duration,
    pub reason: String,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_IMAGE_BYTES,
            timeout: UPLOAD_TIMEOUT,
            reason: UPLOAD_REASON.to_string(),
        }
    }
}

/// Performs single-guild upload attempts
pub struct Uploader<'a> {
    platform: &'a dyn EmotePlatform,
    fetcher: &'a dyn ImageFetcher,
    limits: UploadLimits,
}

impl<'a> Uploader<'a> {
    pub fn new(platform: &'a dyn EmotePlatform, fetcher: &'a dyn ImageFetcher) -> Self {
        Self {
            platform,
            fetcher,
            limits: UploadLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// Upload `name` from `url` to `guild`
    pub async fn upload(
        &self,
        guild: &GuildSnapshot,
        name: &str,
        url: &str,
    ) -> Result<RemoteEmote, UploadFailure> {
        let image = self.fetcher.fetch(url).await?;
        debug!(name = %name, url = %url, size = image.len(), "Downloaded emote image");

        if image.len() > self.limits.max_image_bytes {
            return Err(UploadFailure::TooLarge {
                size: image.len(),
                limit: self.limits.max_image_bytes,
            });
        }

        let create = self
            .platform
            .create_emote(guild.id, name, &image, &self.limits.reason);

        match tokio::time::timeout(self.limits.timeout, create).await {
            Ok(Ok(emote)) => Ok(emote),
            Ok(Err(e)) => Err(UploadFailure::PlatformRejected(e.to_string())),
            Err(_) => Err(UploadFailure::Timeout(self.limits.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::FetchError;
    use crate::testing::{guild, png, FakeFetcher, FakePlatform};

    const URL: &str = "https://cdn.discordapp.com/emojis/1.png";

    #[tokio::test]
    async fn test_upload_success() {
        let platform = FakePlatform::new(vec![]);
        let fetcher = FakeFetcher::serving(png(1_000));
        let uploader = Uploader::new(&platform, &fetcher);

        let emote = uploader.upload(&guild(5, 50, &[]), "wave", URL).await.unwrap();

        assert_eq!(emote.name, "wave");
        assert_eq!(emote.guild_id, 5);
        assert_eq!(fetcher.requested(), vec![URL.to_string()]);
    }

    #[tokio::test]
    async fn test_oversized_image_never_reaches_create() {
        let platform = FakePlatform::new(vec![]);
        let fetcher = FakeFetcher::serving(png(MAX_IMAGE_BYTES + 1));
        let uploader = Uploader::new(&platform, &fetcher);

        let err = uploader.upload(&guild(5, 50, &[]), "big", URL).await.unwrap_err();

        assert_eq!(
            err,
            UploadFailure::TooLarge {
                size: MAX_IMAGE_BYTES + 1,
                limit: MAX_IMAGE_BYTES
            }
        );
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_image_at_limit_is_accepted() {
        let platform = FakePlatform::new(vec![]);
        let fetcher = FakeFetcher::serving(png(MAX_IMAGE_BYTES));
        let uploader = Uploader::new(&platform, &fetcher);

        assert!(uploader.upload(&guild(5, 50, &[]), "edge", URL).await.is_ok());
    }

    #[tokio::test]
    async fn test_download_status_is_classified() {
        let platform = FakePlatform::new(vec![]);
        let fetcher = FakeFetcher::failing(404);
        let uploader = Uploader::new(&platform, &fetcher);

        let err = uploader.upload(&guild(5, 50, &[]), "gone", URL).await.unwrap_err();
        assert_eq!(err, UploadFailure::DownloadFailed(404));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_classified() {
        let platform = FakePlatform::new(vec![]);
        let fetcher = FakeFetcher::serving(vec![])
            .then(Err(FetchError::Request("connection reset".into())));
        let uploader = Uploader::new(&platform, &fetcher);

        let err = uploader.upload(&guild(5, 50, &[]), "x", URL).await.unwrap_err();
        assert_eq!(err, UploadFailure::DownloadError("connection reset".into()));
    }

    #[tokio::test]
    async fn test_platform_rejection() {
        let platform = FakePlatform::new(vec![]).rejecting(5);
        let fetcher = FakeFetcher::serving(png(10));
        let uploader = Uploader::new(&platform, &fetcher);

        let err = uploader.upload(&guild(5, 50, &[]), "x", URL).await.unwrap_err();
        assert!(matches!(err, UploadFailure::PlatformRejected(_)));
    }

    #[tokio::test]
    async fn test_slow_create_times_out() {
        let platform = FakePlatform::new(vec![]).with_delay(Duration::from_secs(5));
        let fetcher = FakeFetcher::serving(png(10));
        let limits = UploadLimits {
            timeout: Duration::from_millis(50),
            ..UploadLimits::default()
        };
        let uploader = Uploader::new(&platform, &fetcher).with_limits(limits);

        let err = uploader.upload(&guild(5, 50, &[]), "slow", URL).await.unwrap_err();
        assert_eq!(err, UploadFailure::Timeout(Duration::from_millis(50)));
    }
}
