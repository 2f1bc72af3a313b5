//! Services
//!
//! The sync pipeline: parser -> resolver (inventory index, uploader) ->
//! rewriter, driven by [`SyncEngine`].

pub mod artifact;
pub mod fetcher;
pub mod inventory;
pub mod parser;
pub mod resolver;
pub mod rewriter;
pub mod sync;
pub mod uploader;

// Re-exports
pub use artifact::Artifact;
pub use fetcher::{HttpImageFetcher, DEFAULT_FETCH_TIMEOUT};
pub use inventory::InventoryIndex;
pub use parser::{parse_tokens, EmoteCatalog};
pub use resolver::Resolver;
pub use rewriter::{persist, Rewriter};
pub use sync::{CancelFlag, SyncEngine, SyncReport};
pub use uploader::{UploadLimits, Uploader, MAX_IMAGE_BYTES, UPLOAD_REASON, UPLOAD_TIMEOUT};
