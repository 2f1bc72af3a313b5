//! Emote Platform Port
//!
//! Abstract interface to the chat platform that owns the guilds.

use async_trait::async_trait;

use crate::domain::entities::{GuildSnapshot, RemoteEmote};
use crate::domain::errors::PlatformError;

/// Chat platform operations needed by the sync engine
///
/// # Example
///
/// ```rust,ignore
/// use emote_sync::ports::EmotePlatform;
///
/// struct DiscordPlatform { /* ... */ }
///
/// #[async_trait]
/// impl EmotePlatform for DiscordPlatform {
///     async fn fetch_guilds(&self, guild_ids: &[u64]) -> Result<Vec<GuildSnapshot>, PlatformError> {
///         // List each guild's emojis
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait EmotePlatform: Send + Sync {
    /// Snapshot the given guilds, in the order requested
    ///
    /// Guilds that cannot be reached are left out of the result rather than
    /// failing the whole call.
    async fn fetch_guilds(&self, guild_ids: &[u64]) -> Result<Vec<GuildSnapshot>, PlatformError>;

    /// Create a custom emoji on a guild
    async fn create_emote(
        &self,
        guild_id: u64,
        name: &str,
        image: &[u8],
        reason: &str,
    ) -> Result<RemoteEmote, PlatformError>;

    /// Platform name (e.g., "discord")
    fn name(&self) -> &str;
}
