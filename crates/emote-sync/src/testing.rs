//! In-memory fakes of the platform and fetcher ports for unit tests

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::entities::{GuildSnapshot, RemoteEmote};
use crate::domain::errors::{FetchError, PlatformError};
use crate::ports::{EmotePlatform, ImageFetcher};

/// A create_emote call as seen by the fake platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub guild_id: u64,
    pub name: String,
    pub image_len: usize,
}

pub struct FakePlatform {
    guilds: Vec<GuildSnapshot>,
    next_id: AtomicU64,
    rejecting: HashSet<u64>,
    delay: Option<Duration>,
    calls: Mutex<Vec<CreateCall>>,
    guild_fetches: AtomicUsize,
}

impl FakePlatform {
    pub fn new(guilds: Vec<GuildSnapshot>) -> Self {
        Self {
            guilds,
            next_id: AtomicU64::new(9_000),
            rejecting: HashSet::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
            guild_fetches: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(mut self, guild_id: u64) -> Self {
        self.rejecting.insert(guild_id);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<CreateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn guild_fetches(&self) -> usize {
        self.guild_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmotePlatform for FakePlatform {
    async fn fetch_guilds(&self, guild_ids: &[u64]) -> Result<Vec<GuildSnapshot>, PlatformError> {
        self.guild_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(guild_ids
            .iter()
            .filter_map(|id| self.guilds.iter().find(|g| g.id == *id).cloned())
            .collect())
    }

    async fn create_emote(
        &self,
        guild_id: u64,
        name: &str,
        image: &[u8],
        _reason: &str,
    ) -> Result<RemoteEmote, PlatformError> {
        self.calls.lock().unwrap().push(CreateCall {
            guild_id,
            name: name.to_string(),
            image_len: image.len(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.rejecting.contains(&guild_id) {
            return Err(PlatformError::Rejected("Maximum number of emojis reached".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(RemoteEmote::new(id, name, image.starts_with(b"GIF"), guild_id))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Serves queued responses first, then the default response
pub struct FakeFetcher {
    queued: Mutex<VecDeque<Result<Vec<u8>, FetchError>>>,
    default: Result<Vec<u8>, FetchError>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn serving(bytes: Vec<u8>) -> Self {
        Self::with_default(Ok(bytes))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_default(Err(FetchError::Status(status)))
    }

    fn with_default(default: Result<Vec<u8>, FetchError>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            default,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, response: Result<Vec<u8>, FetchError>) -> Self {
        self.queued.lock().unwrap().push_back(response);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return response;
        }
        self.default.clone()
    }
}

pub fn png(len: usize) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.resize(len.max(bytes.len()), 0);
    bytes
}

pub fn guild(id: u64, capacity: usize, emotes: &[(u64, &str, bool)]) -> GuildSnapshot {
    GuildSnapshot::new(id, format!("guild-{}", id), capacity).with_emotes(
        emotes
            .iter()
            .map(|(emote_id, name, animated)| RemoteEmote::new(*emote_id, *name, *animated, id))
            .collect(),
    )
}
