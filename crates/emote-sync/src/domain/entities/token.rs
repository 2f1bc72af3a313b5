//! Reference Token Entity
//!
//! An emote reference as written in the emote file: `<:name:id>` for a
//! static emote, `<a:name:id>` for an animated one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RemoteEmote;

/// Discord CDN path for custom emoji images
pub const EMOJI_CDN_BASE: &str = "https://cdn.discordapp.com/emojis";

/// A parsed emote reference token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceToken {
    /// Emote name (word characters only)
    pub name: String,
    /// Discord emoji ID
    pub id: u64,
    /// Whether the emote is animated (`a` flag)
    pub animated: bool,
}

impl ReferenceToken {
    /// Create a new reference token
    pub fn new(name: impl Into<String>, id: u64, animated: bool) -> Self {
        Self {
            name: name.into(),
            id,
            animated,
        }
    }

    /// CDN URL the emote image can be downloaded from
    pub fn download_url(&self) -> String {
        let extension = if self.animated { "gif" } else { "png" };
        format!("{}/{}.{}", EMOJI_CDN_BASE, self.id, extension)
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.animated { "a" } else { "" };
        write!(f, "<{}:{}:{}>", flag, self.name, self.id)
    }
}

impl From<&RemoteEmote> for ReferenceToken {
    fn from(emote: &RemoteEmote) -> Self {
        Self::new(emote.name.clone(), emote.id, emote.animated)
    }
}
