//! Token Parser
//!
//! Extracts `<a?:name:id>` tokens from the emote file into an ordered
//! name-keyed catalog.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::domain::entities::ReferenceToken;

const TOKEN_PATTERN: &str = r"<(a?):(\w+):(\d+)>";

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Declared emotes keyed by name, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmoteCatalog {
    tokens: IndexMap<String, ReferenceToken>,
}

impl EmoteCatalog {
    /// Insert a token. A later token with an existing name replaces the
    /// earlier descriptor but keeps the name's original position.
    pub fn insert(&mut self, token: ReferenceToken) {
        if let Some(previous) = self.tokens.get(&token.name) {
            if previous.id != token.id {
                // Last occurrence wins; the earlier ID is dropped
                warn!(
                    name = %token.name,
                    previous_id = previous.id,
                    id = token.id,
                    "Emote name declared with different IDs, keeping the last one"
                );
            }
        }
        self.tokens.insert(token.name.clone(), token);
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceToken> {
        self.tokens.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceToken> {
        self.tokens.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parse every reference token in `text`
pub fn parse_tokens(text: &str) -> EmoteCatalog {
    let mut catalog = EmoteCatalog::default();
    let mut matched = 0usize;

    for caps in token_regex().captures_iter(text) {
        matched += 1;
        let animated = !caps[1].is_empty();
        let name = &caps[2];

        let raw_id = &caps[3];
        let Ok(id) = raw_id.parse::<u64>() else {
            warn!(name = %name, id = %raw_id, "Emote ID does not fit in 64 bits, skipping");
            continue;
        };

        catalog.insert(ReferenceToken::new(name, id, animated));
    }

    debug!(matched, distinct = catalog.len(), "Parsed emote tokens");
    catalog
}
