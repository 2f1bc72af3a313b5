//! Guild Snapshot Entity
//!
//! A guild's emoji capacity and emote list, captured once at the start of a
//! run. The engine only mutates its copy to append emotes it created itself.

use serde::{Deserialize, Serialize};

use super::RemoteEmote;

/// Point-in-time view of a guild's emote inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    /// Maximum number of custom emojis the guild accepts
    pub capacity: usize,
    pub emotes: Vec<RemoteEmote>,
}

impl GuildSnapshot {
    /// Create an empty snapshot
    pub fn new(id: u64, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            emotes: Vec::new(),
        }
    }

    /// Replace the emote list
    pub fn with_emotes(mut self, emotes: Vec<RemoteEmote>) -> Self {
        self.emotes = emotes;
        self
    }

    /// Number of emotes tracked for this guild, including ones created this run
    pub fn emote_count(&self) -> usize {
        self.emotes.len()
    }

    /// Whether the guild has no free emoji slot left
    pub fn is_full(&self) -> bool {
        self.emote_count() >= self.capacity
    }

    /// First emote with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&RemoteEmote> {
        self.emotes.iter().find(|e| e.name == name)
    }

    /// Track an emote created on this guild during the run
    pub fn record(&mut self, emote: RemoteEmote) {
        self.emotes.push(emote);
    }
}
