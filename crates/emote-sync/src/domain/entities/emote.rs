//! Remote Emote Entity
//!
//! A custom emoji that currently exists on a guild.

use serde::{Deserialize, Serialize};

use super::ReferenceToken;

/// A live emote as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEmote {
    pub id: u64,
    pub name: String,
    pub animated: bool,
    /// Guild the emote belongs to (used for capacity bookkeeping only)
    pub guild_id: u64,
}

impl RemoteEmote {
    pub fn new(id: u64, name: impl Into<String>, animated: bool, guild_id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            animated,
            guild_id,
        }
    }

    /// Token that references this emote under its current name
    pub fn to_token(&self) -> ReferenceToken {
        ReferenceToken::from(self)
    }
}
