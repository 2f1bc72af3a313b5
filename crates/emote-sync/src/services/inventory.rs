//! Inventory Index
//!
//! Lookup of live emotes by ID and by name across all configured guilds.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::{GuildSnapshot, RemoteEmote};

/// ID and name index over the guild snapshots of one run
#[derive(Debug, Clone, Default)]
pub struct InventoryIndex {
    by_id: HashMap<u64, RemoteEmote>,
    names: HashSet<String>,
}

impl InventoryIndex {
    /// Index every emote of every guild
    pub fn build(guilds: &[GuildSnapshot]) -> Self {
        let mut index = Self::default();
        for emote in guilds.iter().flat_map(|g| g.emotes.iter()) {
            index.record(emote);
        }
        index
    }

    /// Live emote with the given ID
    pub fn get(&self, id: u64) -> Option<&RemoteEmote> {
        self.by_id.get(&id)
    }

    /// Whether any live emote carries the given name
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Add an emote created during the run
    pub fn record(&mut self, emote: &RemoteEmote) {
        self.names.insert(emote.name.clone());
        self.by_id.insert(emote.id, emote.clone());
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_spans_guilds() {
        let guilds = vec![
            GuildSnapshot::new(1, "one", 50).with_emotes(vec![RemoteEmote::new(10, "a", false, 1)]),
            GuildSnapshot::new(2, "two", 50).with_emotes(vec![RemoteEmote::new(20, "b", true, 2)]),
        ];
        let index = InventoryIndex::build(&guilds);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(20).map(|e| e.guild_id), Some(2));
        assert!(index.contains_name("a"));
        assert!(!index.contains_name("c"));
    }

    #[test]
    fn test_record_updates_both_indices() {
        let mut index = InventoryIndex::default();
        index.record(&RemoteEmote::new(30, "fresh", false, 1));

        assert!(index.get(30).is_some());
        assert!(index.contains_name("fresh"));
    }
}
