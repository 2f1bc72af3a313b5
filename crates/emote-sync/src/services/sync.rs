//! Sync Engine
//!
//! Drives one run: load the emote file, snapshot the guilds, resolve every
//! declared token in order, rewrite the working buffer as each one
//! resolves, and persist the buffer once at the end.
//!
//! Names are processed strictly one at a time so guild capacity
//! bookkeeping needs no locking and uploads never overlap.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use super::artifact::Artifact;
use super::parser::EmoteCatalog;
use super::resolver::Resolver;
use super::rewriter::{persist, Rewriter};
use super::uploader::{UploadLimits, Uploader};
use crate::domain::entities::GuildSnapshot;
use crate::domain::errors::{PlatformError, SyncError};
use crate::domain::value_objects::{FailureReason, Resolution, ResolutionKind};
use crate::ports::{EmotePlatform, ImageFetcher};

/// Shared shutdown flag, checked between names
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop after the name currently being processed
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Rewritten text and per-name outcomes, before anything is persisted
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub text: String,
    pub resolutions: Vec<(String, Resolution)>,
}

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub path: PathBuf,
    /// One entry per declared name, in file order
    pub resolutions: Vec<(String, Resolution)>,
    /// Whether the emote file was rewritten
    pub written: bool,
}

impl SyncReport {
    pub fn count(&self, kind: ResolutionKind) -> usize {
        self.resolutions
            .iter()
            .filter(|(_, r)| r.kind() == kind)
            .count()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolutions.iter().filter(|(_, r)| r.is_resolved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.count(ResolutionKind::Failed)
    }

    pub fn uploaded_count(&self) -> usize {
        self.count(ResolutionKind::Uploaded)
    }

    /// Unresolved names with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FailureReason)> {
        self.resolutions.iter().filter_map(|(name, r)| match r {
            Resolution::Failed(reason) => Some((name.as_str(), reason)),
            _ => None,
        })
    }

    pub fn was_cancelled(&self) -> bool {
        self.failures()
            .any(|(_, reason)| *reason == FailureReason::Cancelled)
    }
}

/// Runs emote synchronization against a platform
pub struct SyncEngine<'a> {
    platform: &'a dyn EmotePlatform,
    fetcher: &'a dyn ImageFetcher,
    limits: UploadLimits,
    cancel: CancelFlag,
}

impl<'a> SyncEngine<'a> {
    pub fn new(platform: &'a dyn EmotePlatform, fetcher: &'a dyn ImageFetcher) -> Self {
        Self {
            platform,
            fetcher,
            limits: UploadLimits::default(),
            cancel: CancelFlag::default(),
        }
    }

    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Full run against the emote file at `path`
    ///
    /// The file is read before any platform call, so an unreadable file
    /// aborts the run without touching the guilds.
    pub async fn sync(
        &self,
        path: impl AsRef<Path>,
        guild_ids: &[u64],
    ) -> Result<SyncReport, SyncError> {
        let artifact = Artifact::load(path)?;
        info!(
            emotes = artifact.catalog().len(),
            platform = %self.platform.name(),
            "Found emotes to check"
        );

        if artifact.catalog().is_empty() {
            return Ok(SyncReport {
                path: artifact.path().to_path_buf(),
                resolutions: Vec::new(),
                written: false,
            });
        }

        let guilds = self.platform.fetch_guilds(guild_ids).await?;
        if guilds.is_empty() && !guild_ids.is_empty() {
            return Err(PlatformError::NoGuildsReachable {
                requested: guild_ids.len(),
            }
            .into());
        }
        if guilds.len() < guild_ids.len() {
            warn!(
                requested = guild_ids.len(),
                available = guilds.len(),
                "Some configured guilds are unavailable"
            );
        }

        self.run(&artifact, guilds).await
    }

    /// Reconcile a loaded file against guild snapshots and persist the result
    pub async fn run(
        &self,
        artifact: &Artifact,
        guilds: Vec<GuildSnapshot>,
    ) -> Result<SyncReport, SyncError> {
        let reconciliation = self
            .reconcile(artifact.text(), artifact.catalog(), guilds)
            .await;

        let written = reconciliation.text != artifact.text();
        if written {
            persist(artifact.path(), &reconciliation.text)?;
        }

        let report = SyncReport {
            path: artifact.path().to_path_buf(),
            resolutions: reconciliation.resolutions,
            written,
        };

        info!(
            path = %report.path.display(),
            resolved = report.resolved_count(),
            uploaded = report.uploaded_count(),
            failed = report.failed_count(),
            written,
            "Emote sync finished"
        );
        Ok(report)
    }

    /// Resolve every token in `catalog` and rewrite `text` in memory
    pub async fn reconcile(
        &self,
        text: &str,
        catalog: &EmoteCatalog,
        guilds: Vec<GuildSnapshot>,
    ) -> Reconciliation {
        let uploader = Uploader::new(self.platform, self.fetcher).with_limits(self.limits.clone());
        let mut resolver = Resolver::new(guilds, uploader);
        let mut rewriter = Rewriter::new(text);
        let mut resolutions = Vec::with_capacity(catalog.len());

        for token in catalog.iter() {
            if self.cancel.is_cancelled() {
                resolutions.push((
                    token.name.clone(),
                    Resolution::Failed(FailureReason::Cancelled),
                ));
                continue;
            }

            let resolution = resolver.resolve(token).await;
            if let Some(replacement) = resolution.token() {
                rewriter.apply(&token.name, replacement);
            }
            resolutions.push((token.name.clone(), resolution));
        }

        if self.cancel.is_cancelled() {
            warn!("Shutdown requested, remaining emotes were skipped");
        }

        Reconciliation {
            text: rewriter.into_text(),
            resolutions,
        }
    }
}
