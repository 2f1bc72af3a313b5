//! Discord Platform Adapter for Emote Sync
//!
//! Implements [`emote_sync::EmotePlatform`] on top of serenity's REST client.
//! No gateway connection is opened: guild emoji lists are read with
//! `GET /guilds/{id}` and emojis are created with `POST /guilds/{id}/emojis`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use emote_sync_discord::{DiscordConfig, DiscordPlatform};
//!
//! let config = DiscordConfig::new("your-bot-token");
//! let platform = DiscordPlatform::new(config);
//! let guilds = platform.fetch_guilds(&[1234, 5678]).await?;
//! ```

mod client;
mod config;
mod platform;

pub use client::DiscordClient;
pub use config::DiscordConfig;
pub use platform::{emoji_capacity, image_data_uri, DiscordPlatform};
