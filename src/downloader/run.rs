//! Top-level run lifecycle and the session protocol.

use crate::error::Result;
use crate::filter::filter_posts;
use crate::types::{RunOutcome, SessionState};

use super::BooruDownloader;

impl BooruDownloader {
    /// Execute one full run: session write, metadata fetch, manifest diff,
    /// pipeline, final save, session clear.
    ///
    /// `resumed` marks a run restored from a session file. A resumed run
    /// with remaining work asks the operator for a second confirmation
    /// (the server-synced work list may differ from what was interrupted);
    /// declining leaves the session in place and returns
    /// [`RunOutcome::Declined`].
    ///
    /// # Errors
    ///
    /// Per-page and per-item failures are contained and never surface here.
    /// Errors outside those boundaries (directory creation, session write,
    /// manifest save, a panicked worker) propagate and deliberately leave
    /// the session file Active so the next launch can resume.
    pub async fn run(&self, resumed: bool) -> Result<RunOutcome> {
        tokio::fs::create_dir_all(&self.config.download.output_dir).await?;

        // Mark the run Active before any network I/O
        let session = SessionState {
            tags: self.search_tags.clone(),
            output_dir: self.config.download.output_dir.clone(),
        };
        self.session_store.save(&session).await?;

        tracing::info!(
            tags = %self.search_tags,
            output_dir = %self.config.download.output_dir.display(),
            resumed,
            "Run started"
        );

        let manifest = self.manifest_store.load().await;

        let all_posts = self.metadata.fetch_all(&self.search_tags).await;
        let work = {
            let map = manifest.lock().await;
            filter_posts(&all_posts, &map)
        };
        tracing::info!(
            listed = all_posts.len(),
            pending = work.len(),
            "Filtered listing against manifest"
        );

        if resumed && !work.is_empty() && !self.operator.confirm_proceed(work.len()) {
            // Session stays Active so the next launch can resume
            tracing::info!("Operator declined the resumed run, keeping session");
            return Ok(RunOutcome::Declined);
        }

        if work.is_empty() {
            tracing::info!("Everything is up to date, nothing to download");
            self.session_store.clear().await?;
            return Ok(RunOutcome::UpToDate);
        }

        let stats = self.run_pipeline(work, manifest.clone()).await?;

        tracing::info!("Saving final manifest");
        self.manifest_store.save(&manifest).await?;
        self.session_store.clear().await?;

        tracing::info!(
            downloaded = stats.downloaded,
            failed = stats.failed,
            "Run complete"
        );
        Ok(RunOutcome::Completed {
            downloaded: stats.downloaded,
            failed: stats.failed,
        })
    }
}
