//! Session persistence and the resume protocol.
//!
//! A run is **Active** while its session file exists and **Clear** once the
//! file is gone. The session is written before any network I/O and removed
//! only when a run finishes with nothing left to do or completes fully;
//! errors and declined confirmations deliberately leave it in place so the
//! next launch can offer to resume.
//!
//! The startup prompt itself belongs to the embedding application: call
//! [`SessionStore::load`], ask the user, then either run in resumed mode
//! with the stored values or call [`SessionStore::clear`] and collect fresh
//! input.

use std::path::PathBuf;

use crate::error::Result;
use crate::types::SessionState;

/// Confirmation capability for the resume protocol.
///
/// The resume confirmation is a second checkpoint distinct from the startup
/// prompt: after the work list has been re-synced against the server, the
/// operator is asked once more whether to proceed, because the list may
/// differ from what was interrupted. Implementations must be safe to share
/// across tasks; the pipeline calls this at most once per run.
pub trait Operator: Send + Sync {
    /// Whether to proceed with `pending` re-synced work items.
    ///
    /// Returning `false` keeps the session file in place and ends the run
    /// with [`RunOutcome::Declined`](crate::types::RunOutcome::Declined).
    fn confirm_proceed(&self, pending: usize) -> bool;
}

/// Operator that always proceeds; the default for non-interactive embeddings.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysProceed;

impl Operator for AlwaysProceed {
    fn confirm_proceed(&self, _pending: usize) -> bool {
        true
    }
}

/// Loads, saves, and clears the session file.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store for the given session file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The session file path this store reads and writes
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load a pending session, if one exists.
    ///
    /// Returns `None` when the file is absent. A file that exists but fails
    /// to parse is logged and treated as absent; a mangled session is not
    /// worth aborting startup over, it only loses the resume offer.
    pub async fn load(&self) -> Option<SessionState> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Session file could not be read, ignoring it"
                );
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Session file is corrupt, ignoring it"
                );
                None
            }
        }
    }

    /// Write the session file, marking the run Active.
    pub async fn save(&self, session: &SessionState) -> Result<()> {
        let json = serde_json::to_string(session)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(
            path = %self.path.display(),
            tags = %session.tags,
            "Session saved"
        );
        Ok(())
    }

    /// Remove the session file, transitioning the run to Clear.
    ///
    /// Idempotent: a file that is already absent is not an error.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
