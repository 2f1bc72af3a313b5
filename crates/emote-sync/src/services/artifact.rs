//! Emote file loaded into memory

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::parser::{parse_tokens, EmoteCatalog};
use crate::domain::errors::SyncError;

/// The emote file's text and the tokens declared in it
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    text: String,
    catalog: EmoteCatalog,
}

impl Artifact {
    /// Read and parse the file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading emote file");

        let text = fs::read_to_string(path).map_err(|e| SyncError::read(path, e))?;
        Ok(Self::from_text(path, text))
    }

    /// Build from text already in memory
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let catalog = parse_tokens(&text);
        Self {
            path: path.into(),
            text,
            catalog,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn catalog(&self) -> &EmoteCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_parses_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emote.py");
        fs::write(&path, "A = '<:a:1>'\nB = '<a:b:2>'\n").unwrap();

        let artifact = Artifact::load(&path).unwrap();

        assert_eq!(artifact.catalog().len(), 2);
        assert_eq!(artifact.path(), path.as_path());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Artifact::load(dir.path().join("nope.py")).unwrap_err();
        assert!(matches!(err, SyncError::Read { .. }));
    }
}
