//! EmotePlatform implementation for Discord

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use emote_sync::{EmotePlatform, GuildSnapshot, PlatformError, RemoteEmote};
use serenity::model::guild::{Emoji, PartialGuild, PremiumTier};
use tracing::{debug, warn};

use crate::client::DiscordClient;
use crate::config::DiscordConfig;

/// Guild feature that raises the emoji limit to at least 200
const MORE_EMOJI_FEATURE: &str = "MORE_EMOJI";

/// Discord adapter implementing EmotePlatform
pub struct DiscordPlatform {
    client: DiscordClient,
}

impl DiscordPlatform {
    /// Create a new Discord platform adapter
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            client: DiscordClient::new(config),
        }
    }

    pub fn client(&self) -> &DiscordClient {
        &self.client
    }

    /// Convert a serenity guild into a snapshot with emojis sorted by ID
    fn convert_guild(&self, guild: &PartialGuild) -> GuildSnapshot {
        let guild_id = guild.id.get();
        let mut emotes: Vec<RemoteEmote> = guild
            .emojis
            .values()
            .map(|emoji| convert_emoji(emoji, guild_id))
            .collect();
        emotes.sort_by_key(|e| e.id);

        GuildSnapshot::new(
            guild_id,
            guild.name.clone(),
            emoji_capacity(guild.premium_tier, &guild.features),
        )
        .with_emotes(emotes)
    }
}

fn convert_emoji(emoji: &Emoji, guild_id: u64) -> RemoteEmote {
    RemoteEmote::new(emoji.id.get(), emoji.name.clone(), emoji.animated, guild_id)
}

fn map_error(err: serenity::Error) -> PlatformError {
    if is_auth_failure(http_status(&err)) {
        return PlatformError::Unauthorized(err.to_string());
    }
    match &err {
        serenity::Error::Http(_) => PlatformError::Rejected(err.to_string()),
        _ => PlatformError::Transport(err.to_string()),
    }
}

fn http_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(http_err) => http_err.status_code().map(|s| s.as_u16()),
        _ => None,
    }
}

/// A 401 means the token itself is bad, so every other guild will fail too
fn is_auth_failure(status: Option<u16>) -> bool {
    status == Some(401)
}

/// Custom emoji slots for a guild's boost tier
pub fn emoji_capacity(tier: PremiumTier, features: &[String]) -> usize {
    let by_tier = match tier {
        PremiumTier::Tier1 => 100,
        PremiumTier::Tier2 => 150,
        PremiumTier::Tier3 => 250,
        _ => 50,
    };

    if features.iter().any(|f| f == MORE_EMOJI_FEATURE) {
        by_tier.max(200)
    } else {
        by_tier
    }
}

/// Encode image bytes as the data URI Discord expects for emoji uploads
pub fn image_data_uri(image: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime(image), BASE64.encode(image))
}

fn sniff_mime(image: &[u8]) -> &'static str {
    if image.starts_with(b"GIF87a") || image.starts_with(b"GIF89a") {
        "image/gif"
    } else if image.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if image.len() >= 12 && &image[0..4] == b"RIFF" && &image[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

#[async_trait]
impl EmotePlatform for DiscordPlatform {
    async fn fetch_guilds(&self, guild_ids: &[u64]) -> Result<Vec<GuildSnapshot>, PlatformError> {
        let mut guilds = Vec::with_capacity(guild_ids.len());

        for &guild_id in guild_ids {
            match self.client.get_guild(guild_id).await {
                Ok(guild) => {
                    let snapshot = self.convert_guild(&guild);
                    debug!(
                        guild_id = %guild_id,
                        guild = %snapshot.name,
                        emotes = snapshot.emote_count(),
                        capacity = snapshot.capacity,
                        "Fetched guild emojis"
                    );
                    guilds.push(snapshot);
                }
                Err(e) if is_auth_failure(http_status(&e)) => {
                    return Err(map_error(e));
                }
                Err(e) => {
                    warn!(guild_id = %guild_id, error = %e, "Guild unavailable, leaving it out");
                }
            }
        }

        Ok(guilds)
    }

    async fn create_emote(
        &self,
        guild_id: u64,
        name: &str,
        image: &[u8],
        reason: &str,
    ) -> Result<RemoteEmote, PlatformError> {
        let emoji = self
            .client
            .create_emoji(guild_id, name, &image_data_uri(image), reason)
            .await
            .map_err(map_error)?;

        Ok(convert_emoji(&emoji, guild_id))
    }

    fn name(&self) -> &str {
        "discord"
    }
}
