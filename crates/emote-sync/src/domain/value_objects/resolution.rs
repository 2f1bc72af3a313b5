//! Resolution - Outcome of reconciling one declared emote

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UploadFailure;
use crate::domain::entities::ReferenceToken;

/// What happened to a declared token during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The declared ID still exists; token rebuilt from the live emote
    AlreadyPresent(ReferenceToken),
    /// The ID is gone but an emote with the same name exists
    Matched(ReferenceToken),
    /// A new emote was created on `guild_id`
    Uploaded {
        token: ReferenceToken,
        guild_id: u64,
    },
    /// Left untouched in the output text
    Failed(FailureReason),
}

impl Resolution {
    /// Replacement token, if the name was resolved
    pub fn token(&self) -> Option<&ReferenceToken> {
        match self {
            Self::AlreadyPresent(token) | Self::Matched(token) => Some(token),
            Self::Uploaded { token, .. } => Some(token),
            Self::Failed(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.is_failed()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn kind(&self) -> ResolutionKind {
        match self {
            Self::AlreadyPresent(_) => ResolutionKind::AlreadyPresent,
            Self::Matched(_) => ResolutionKind::Matched,
            Self::Uploaded { .. } => ResolutionKind::Uploaded,
            Self::Failed(_) => ResolutionKind::Failed,
        }
    }
}

/// Resolution variant without its payload, for counting and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    AlreadyPresent,
    Matched,
    Uploaded,
    Failed,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionKind::AlreadyPresent => write!(f, "already_present"),
            ResolutionKind::Matched => write!(f, "matched"),
            ResolutionKind::Uploaded => write!(f, "uploaded"),
            ResolutionKind::Failed => write!(f, "failed"),
        }
    }
}

/// Why a name was left unresolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Every guild was full or failed
    Exhausted { attempts: Vec<GuildAttempt> },
    /// Shutdown was requested before this name was processed
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Cancelled => write!(f, "cancelled before processing"),
            FailureReason::Exhausted { attempts } if attempts.is_empty() => {
                write!(f, "no guilds configured")
            }
            FailureReason::Exhausted { attempts } => {
                let parts: Vec<String> = attempts.iter().map(|a| a.to_string()).collect();
                write!(f, "{}", parts.join("; "))
            }
        }
    }
}

/// One guild's part in an exhausted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuildAttempt {
    /// Skipped because its tracked count was at capacity
    Full { guild_id: u64 },
    /// Tried and failed
    Failed { guild_id: u64, failure: UploadFailure },
}

impl GuildAttempt {
    pub fn guild_id(&self) -> u64 {
        match self {
            Self::Full { guild_id } | Self::Failed { guild_id, .. } => *guild_id,
        }
    }
}

impl fmt::Display for GuildAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuildAttempt::Full { guild_id } => write!(f, "guild {} full", guild_id),
            GuildAttempt::Failed { guild_id, failure } => {
                write!(f, "guild {}: {}", guild_id, failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_failed_has_no_token() {
        let failed = Resolution::Failed(FailureReason::Cancelled);
        assert!(failed.token().is_none());
        assert!(failed.is_failed());
        assert_eq!(failed.kind(), ResolutionKind::Failed);
    }

    #[test]
    fn test_uploaded_exposes_token() {
        let token = ReferenceToken::new("wave", 9, false);
        let uploaded = Resolution::Uploaded {
            token: token.clone(),
            guild_id: 3,
        };
        assert_eq!(uploaded.token(), Some(&token));
        assert!(uploaded.is_resolved());
    }

    #[test]
    fn test_exhausted_reason_lists_each_guild() {
        let reason = FailureReason::Exhausted {
            attempts: vec![
                GuildAttempt::Full { guild_id: 1 },
                GuildAttempt::Failed {
                    guild_id: 2,
                    failure: UploadFailure::Timeout(Duration::from_secs(15)),
                },
            ],
        };
        assert_eq!(
            reason.to_string(),
            "guild 1 full; guild 2: upload timed out after 15s"
        );
    }
}
