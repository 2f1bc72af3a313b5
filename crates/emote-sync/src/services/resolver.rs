//! Resolver
//!
//! Decides, for each declared token, whether live inventory already
//! satisfies it or an upload is needed, and performs guild selection with
//! fallback when it is.
//!
//! Order of checks for one token:
//! 1. the declared ID is live: reuse the live emote (it may have been renamed)
//! 2. the declared name is live under another ID: reuse that emote
//! 3. otherwise upload to the first guild with room, falling back through
//!    the remaining guilds on any failure

use tracing::{debug, info, warn};

use super::inventory::InventoryIndex;
use super::uploader::Uploader;
use crate::domain::entities::{GuildSnapshot, ReferenceToken, RemoteEmote};
use crate::domain::value_objects::{FailureReason, GuildAttempt, Resolution};

/// Resolves tokens one at a time against the guilds of a single run
pub struct Resolver<'a> {
    uploader: Uploader<'a>,
    index: InventoryIndex,
    guilds: Vec<GuildSnapshot>,
}

impl<'a> Resolver<'a> {
    /// `guilds` must be in the configured fallback order
    pub fn new(guilds: Vec<GuildSnapshot>, uploader: Uploader<'a>) -> Self {
        let index = InventoryIndex::build(&guilds);
        debug!(
            guilds = guilds.len(),
            emotes = index.len(),
            "Built emote inventory index"
        );
        Self {
            uploader,
            index,
            guilds,
        }
    }

    /// Guild snapshots including emotes created so far
    pub fn guilds(&self) -> &[GuildSnapshot] {
        &self.guilds
    }

    pub fn index(&self) -> &InventoryIndex {
        &self.index
    }

    /// Resolve one declared token
    pub async fn resolve(&mut self, token: &ReferenceToken) -> Resolution {
        if let Some(existing) = self.index.get(token.id) {
            info!(
                name = %token.name,
                id = token.id,
                live_name = %existing.name,
                "Emote ID already exists"
            );
            return Resolution::AlreadyPresent(existing.to_token());
        }

        if self.index.contains_name(&token.name) {
            if let Some(existing) = self.find_by_name(&token.name) {
                info!(
                    name = %token.name,
                    declared_id = token.id,
                    live_id = existing.id,
                    "Emote name already exists, reusing it"
                );
                return Resolution::Matched(existing.to_token());
            }
        }

        self.upload(token).await
    }

    fn find_by_name(&self, name: &str) -> Option<&RemoteEmote> {
        self.guilds.iter().find_map(|g| g.find_by_name(name))
    }

    async fn upload(&mut self, token: &ReferenceToken) -> Resolution {
        let url = token.download_url();
        let mut attempts = Vec::new();

        for position in 0..self.guilds.len() {
            let guild = &self.guilds[position];
            let guild_id = guild.id;

            if guild.is_full() {
                warn!(
                    guild_id,
                    guild = %guild.name,
                    capacity = guild.capacity,
                    "Guild full, skipping"
                );
                attempts.push(GuildAttempt::Full { guild_id });
                continue;
            }

            let result = self.uploader.upload(guild, &token.name, &url).await;
            match result {
                Ok(emote) => {
                    info!(
                        name = %token.name,
                        guild_id,
                        id = emote.id,
                        "Uploaded emote"
                    );
                    let created = self.record(position, emote);
                    return Resolution::Uploaded {
                        token: created.to_token(),
                        guild_id,
                    };
                }
                Err(failure) => {
                    warn!(
                        name = %token.name,
                        guild_id,
                        error = %failure,
                        "Upload attempt failed, trying next guild"
                    );
                    attempts.push(GuildAttempt::Failed { guild_id, failure });
                }
            }
        }

        warn!(name = %token.name, "Could not upload emote to any guild");
        Resolution::Failed(FailureReason::Exhausted { attempts })
    }

    /// Track a created emote in the index and on the guild it landed on
    fn record(&mut self, position: usize, mut emote: RemoteEmote) -> RemoteEmote {
        emote.guild_id = self.guilds[position].id;
        self.index.record(&emote);
        self.guilds[position].record(emote.clone());
        emote
    }
}
