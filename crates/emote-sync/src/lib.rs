//! Emote Sync Library
//!
//! Reconciles emote reference tokens (`<a:name:id>`) declared in a text file
//! against the live emote inventory of one or more Discord guilds.
//!
//! # Architecture
//!
//! Same layering as the rest of the workspace:
//!
//! - **Domain Layer** (`domain/`): tokens, remote emotes, guild snapshots,
//!   resolution outcomes and error types
//! - **Ports** (`ports/`): the platform and image-download interfaces the
//!   engine talks to
//! - **Services** (`services/`): parser, inventory index, resolver,
//!   uploader, rewriter and the [`SyncEngine`] that drives them
//!
//! # Usage
//!
//! ```rust,ignore
//! use emote_sync::{HttpImageFetcher, SyncEngine};
//!
//! let fetcher = HttpImageFetcher::new(Duration::from_secs(300))?;
//! let engine = SyncEngine::new(&platform, &fetcher);
//! let report = engine.sync("src/utils/emote.py", &[1234, 5678]).await?;
//! println!("{} resolved, {} failed", report.resolved_count(), report.failed_count());
//! ```

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use domain::{
    FailureReason, FetchError, GuildAttempt, GuildSnapshot, PlatformError, ReferenceToken,
    RemoteEmote, Resolution, ResolutionKind, SyncError, UploadFailure,
};
pub use ports::{EmotePlatform, ImageFetcher};
pub use services::{
    parse_tokens, Artifact, CancelFlag, EmoteCatalog, HttpImageFetcher, InventoryIndex, Resolver,
    Rewriter, SyncEngine, SyncReport, UploadLimits, Uploader, DEFAULT_FETCH_TIMEOUT,
};
