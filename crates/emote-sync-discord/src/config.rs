//! Discord configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Discord adapter
///
/// Guild order is owned by the sync engine and passed to each
/// `fetch_guilds` call, so only the credentials live here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token
    pub token: String,
}

impl DiscordConfig {
    /// Create a new Discord configuration with just a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}
