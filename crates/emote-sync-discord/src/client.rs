//! Discord API client wrapper

use serenity::http::Http;
use serenity::model::guild::{Emoji, PartialGuild};
use serenity::model::id::GuildId;
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::DiscordConfig;

/// Discord API client
pub struct DiscordClient {
    http: Arc<Http>,
}

impl DiscordClient {
    /// Create a new Discord client
    pub fn new(config: DiscordConfig) -> Self {
        let http = Arc::new(Http::new(&config.token));
        Self { http }
    }

    /// Fetch a guild, including its custom emojis
    pub async fn get_guild(&self, guild_id: u64) -> Result<PartialGuild, serenity::Error> {
        debug!(guild_id = %guild_id, "Fetching guild from Discord");
        self.http.get_guild(GuildId::new(guild_id)).await
    }

    /// Create a custom emoji from a base64 data URI
    pub async fn create_emoji(
        &self,
        guild_id: u64,
        name: &str,
        image_data_uri: &str,
        reason: &str,
    ) -> Result<Emoji, serenity::Error> {
        debug!(guild_id = %guild_id, name = %name, "Creating emoji on Discord");

        let map = serde_json::json!({
            "name": name,
            "image": image_data_uri,
        });

        self.http
            .create_emoji(GuildId::new(guild_id), &map, Some(reason))
            .await
            .inspect_err(|e| error!(error = %e, guild_id = %guild_id, "Failed to create Discord emoji"))
    }

    /// Get the underlying HTTP client for advanced operations
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}
