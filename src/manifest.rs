//! Manifest persistence: the authoritative record of what is already on disk.
//!
//! The manifest maps post id to [`ManifestRecord`] and lives as
//! `manifest.json` inside the output directory. During a run it is shared
//! between all workers behind one coarse mutex; every save serializes a
//! consistent snapshot taken under that lock, so a save racing concurrent
//! upserts still produces a structurally valid (if slightly stale) file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::types::{ManifestRecord, PostId};

/// In-memory manifest contents
pub type ManifestMap = HashMap<PostId, ManifestRecord>;

/// Manifest shared across the pipeline workers and the checkpointer.
///
/// Contention is low (one insert per completed item), so a single coarse
/// lock is sufficient; each item is owned by exactly one worker, which makes
/// every mutation an independent keyed upsert.
pub type SharedManifest = Arc<Mutex<ManifestMap>>;

/// Loads and persists the manifest file with full-rewrite semantics.
#[derive(Clone, Debug)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    /// Create a store for the given manifest file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The manifest file path this store reads and writes
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the manifest from disk.
    ///
    /// A missing file yields an empty manifest. A file that exists but fails
    /// to read or parse is logged as a warning and also yields an empty
    /// manifest: corruption forfeits dedup history but never aborts a run.
    pub async fn load(&self) -> SharedManifest {
        let map = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => match serde_json::from_str::<ManifestMap>(&json) {
                Ok(map) => {
                    tracing::debug!(
                        path = %self.path.display(),
                        entries = map.len(),
                        "Loaded manifest"
                    );
                    map
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Manifest file is corrupt, starting with an empty manifest"
                    );
                    ManifestMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ManifestMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Manifest file could not be read, starting with an empty manifest"
                );
                ManifestMap::new()
            }
        };

        Arc::new(Mutex::new(map))
    }

    /// Persist the manifest, overwriting the manifest file.
    ///
    /// Takes a snapshot under the lock and releases it before serializing,
    /// so workers are never blocked on file I/O. Safe to call repeatedly and
    /// concurrently with upserts.
    pub async fn save(&self, manifest: &SharedManifest) -> Result<()> {
        let snapshot = {
            let guard = manifest.lock().await;
            guard.clone()
        };

        let json = serde_json::to_string(&snapshot)?;
        tokio::fs::write(&self.path, json).await?;

        tracing::debug!(
            path = %self.path.display(),
            entries = snapshot.len(),
            "Saved manifest"
        );
        Ok(())
    }
}
