//! Rewriter
//!
//! Applies resolved tokens back onto the working copy of the emote file and
//! persists the final buffer in one atomic replace.

use regex::{NoExpand, Regex};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::entities::ReferenceToken;
use crate::domain::errors::SyncError;

/// In-memory working buffer for one run
#[derive(Debug, Clone)]
pub struct Rewriter {
    original: String,
    buffer: String,
    replaced: usize,
}

impl Rewriter {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            buffer: original.clone(),
            original,
            replaced: 0,
        }
    }

    /// Replace every token declared under `name`, whatever its flag or ID,
    /// with `replacement`. Returns the number of spans replaced.
    pub fn apply(&mut self, name: &str, replacement: &ReferenceToken) -> usize {
        let pattern = match Regex::new(&format!(r"<a?:{}:\d+>", regex::escape(name))) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!(name = %name, error = %e, "Could not build token pattern, leaving name untouched");
                return 0;
            }
        };

        let count = pattern.find_iter(&self.buffer).count();
        if count == 0 {
            return 0;
        }

        let new_token = replacement.to_string();
        let updated = pattern
            .replace_all(&self.buffer, NoExpand(&new_token))
            .into_owned();
        self.buffer = updated;
        self.replaced += count;

        debug!(name = %name, token = %new_token, count, "Rewrote emote token");
        count
    }

    /// Whether the buffer differs from the original text
    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    /// Total spans replaced so far (including ones replaced by an identical token)
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn into_text(self) -> String {
        self.buffer
    }
}

/// Atomically replace `path` with `contents`
///
/// Writes to a temporary file next to `path` and renames it over the
/// target, so readers see either the old or the new file. The target's
/// permissions are carried over.
pub fn persist(path: &Path, contents: &str) -> Result<(), SyncError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SyncError::write(path, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| SyncError::write(path, e))?;

    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| SyncError::write(path, e))?;
    }

    tmp.persist(path)
        .map_err(|e| SyncError::write(path, e.error))?;
    Ok(())
}
