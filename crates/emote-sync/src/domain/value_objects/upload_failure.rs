//! UploadFailure - Why a single upload attempt on one guild did not succeed

use std::time::Duration;
use thiserror::Error;

use crate::domain::errors::FetchError;

/// Failure of one upload attempt. Never fatal: the resolver moves on to the
/// next guild.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFailure {
    #[error("download failed with status {0}")]
    DownloadFailed(u16),

    #[error("download error: {0}")]
    DownloadError(String),

    #[error("image too large ({size} bytes, limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("upload timed out after {0:?}")]
    Timeout(Duration),

    #[error("platform rejected upload: {0}")]
    PlatformRejected(String),
}

impl From<FetchError> for UploadFailure {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status(status) => Self::DownloadFailed(status),
            FetchError::Request(cause) => Self::DownloadError(cause),
            FetchError::TooLarge { size, limit } => Self::TooLarge { size, limit },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_download_maps_to_too_large() {
        let failure = UploadFailure::from(FetchError::TooLarge {
            size: 300_000,
            limit: 256_000,
        });
        assert_eq!(
            failure,
            UploadFailure::TooLarge {
                size: 300_000,
                limit: 256_000
            }
        );
        assert_eq!(
            UploadFailure::from(FetchError::Status(404)),
            UploadFailure::DownloadFailed(404)
        );
    }
}
