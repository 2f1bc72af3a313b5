//! Ports (Interfaces)
//!
//! Abstract interfaces the sync engine uses to reach the outside world.
//! The Discord implementation of [`EmotePlatform`] lives in the
//! `emote-sync-discord` crate.

pub mod fetcher;
pub mod platform;

// Re-exports
pub use fetcher::*;
pub use platform::*;
