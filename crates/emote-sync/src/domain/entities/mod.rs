//! Domain Entities
//!
//! - ReferenceToken: an emote reference declared in the emote file
//! - RemoteEmote: a live emote owned by a guild
//! - GuildSnapshot: a guild's capacity and emote list, taken once per run

mod emote;
mod guild;
mod token;

pub use emote::*;
pub use guild::*;
pub use token::*;
