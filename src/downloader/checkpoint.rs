//! Periodic manifest checkpointing while the pipeline runs.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::manifest::{ManifestStore, SharedManifest};

/// Spawn the background checkpoint task.
///
/// Every `interval` the current manifest is persisted, bounding how much
/// completed work a crash can lose. The task stops when `cancel_token` is
/// cancelled; the shutdown sequence is join workers, cancel this token,
/// await the returned handle, then run the final save, so no checkpoint
/// tick can race past the final save. A tick that overlaps worker upserts
/// still writes a structurally valid snapshot, because every save
/// serializes a clone taken under the manifest lock.
pub(crate) fn spawn_checkpointer(
    store: ManifestStore,
    manifest: SharedManifest,
    interval: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("Checkpointer received stop signal, exiting");
                    break;
                }
                _ = tokio::time::sleep(interval) => {
                    if let Err(e) = store.save(&manifest).await {
                        tracing::warn!(error = %e, "Periodic manifest save failed");
                    }
                }
            }
        }
    })
}
