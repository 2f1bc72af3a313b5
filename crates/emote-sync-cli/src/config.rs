//! Configuration management for the emote-sync CLI
//!
//! Settings are layered: config file (~/.config/emote-sync/config.toml),
//! then environment variables, then command-line flags.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "emote-sync";
const CONFIG_FILE: &str = "config.toml";

const DEFAULT_EMOTE_FILE: &str = "src/utils/emote.py";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;

pub const ENV_TOKEN: &str = "DISCORD_TOKEN";
pub const ENV_GUILDS: &str = "EMOJIS_SERVER";
pub const ENV_EMOTE_FILE: &str = "EMOTE_FILE";

/// Raw configuration, every field optional until resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub token: Option<String>,
    /// Upload targets in fallback order
    #[serde(default)]
    pub guild_ids: Vec<u64>,
    pub emote_file: Option<PathBuf>,
    pub fetch_timeout_secs: Option<u64>,
}

/// Fully resolved settings for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub guild_ids: Vec<u64>,
    pub emote_file: PathBuf,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from `path`, or from the default location
    ///
    /// A missing default file yields an empty config; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay environment variables read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(raw) = lookup(ENV_GUILDS).filter(|g| !g.trim().is_empty()) {
            self.guild_ids =
                parse_guild_list(&raw).with_context(|| format!("Invalid {} value", ENV_GUILDS))?;
        }
        if let Some(file) = lookup(ENV_EMOTE_FILE).filter(|f| !f.trim().is_empty()) {
            self.emote_file = Some(PathBuf::from(file));
        }
        Ok(())
    }

    /// Overlay command-line flags
    pub fn apply_overrides(
        &mut self,
        token: Option<String>,
        guild_ids: Vec<u64>,
        emote_file: Option<PathBuf>,
    ) {
        if token.is_some() {
            self.token = token;
        }
        if !guild_ids.is_empty() {
            self.guild_ids = guild_ids;
        }
        if emote_file.is_some() {
            self.emote_file = emote_file;
        }
    }

    /// Emote file path, falling back to the default location
    pub fn emote_file(&self) -> PathBuf {
        self.emote_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EMOTE_FILE))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Validate into settings usable for a sync run
    pub fn resolve(self) -> Result<Settings> {
        let emote_file = self.emote_file();
        let fetch_timeout = self.fetch_timeout();

        let Some(token) = self.token.filter(|t| !t.is_empty()) else {
            bail!("No Discord token configured (set {} or pass --token)", ENV_TOKEN);
        };
        if self.guild_ids.is_empty() {
            bail!("No emoji guilds configured (set {} or pass --guild)", ENV_GUILDS);
        }
        if self.guild_ids.contains(&0) {
            bail!("Guild ID 0 is not a valid Discord ID");
        }

        Ok(Settings {
            token,
            guild_ids: self.guild_ids,
            emote_file,
            fetch_timeout,
        })
    }
}

/// Parse a comma-separated list of guild IDs, keeping order
pub fn parse_guild_list(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .with_context(|| format!("'{}' is not a guild ID", part))
        })
        .collect()
}

/// Hide all but the last four characters of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_guild_list_keeps_order() {
        assert_eq!(parse_guild_list("3, 1,2,").unwrap(), vec![3, 1, 2]);
        assert!(parse_guild_list("1,abc").is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
token = "abc"
guild_ids = [10, 20]
emote_file = "emotes.py"
fetch_timeout_secs = 30
"#,
        )
        .unwrap();

        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.guild_ids, vec![10, 20]);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_precedence_file_env_flags() {
        let mut config = Config::from_toml("token = \"file\"\nguild_ids = [1]\n").unwrap();

        config
            .apply_env(env(&[("DISCORD_TOKEN", "env"), ("EMOJIS_SERVER", "2,3")]))
            .unwrap();
        assert_eq!(config.token.as_deref(), Some("env"));
        assert_eq!(config.guild_ids, vec![2, 3]);

        config.apply_overrides(Some("flag".into()), vec![], Some("x.py".into()));
        let settings = config.resolve().unwrap();
        assert_eq!(settings.token, "flag");
        assert_eq!(settings.guild_ids, vec![2, 3]);
        assert_eq!(settings.emote_file, PathBuf::from("x.py"));
    }

    #[test]
    fn test_invalid_env_guilds_is_error() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[("EMOJIS_SERVER", "one,two")])).is_err());
    }

    #[test]
    fn test_resolve_requires_token_and_guilds() {
        assert!(Config::default().resolve().is_err());

        let mut config = Config::default();
        config.apply_overrides(Some("t".into()), vec![], None);
        assert!(config.clone().resolve().is_err());

        config.apply_overrides(None, vec![1, 0], None);
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_defaults() {
        let mut config = Config::default();
        config.apply_overrides(Some("t".into()), vec![1], None);
        let settings = config.resolve().unwrap();

        assert_eq!(settings.emote_file, PathBuf::from("src/utils/emote.py"));
        assert_eq!(settings.fetch_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "guild_ids = [5]\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.guild_ids, vec![5]);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefgh"), "****efgh");
        assert_eq!(mask_token("abc"), "****");
    }
}
