//! Bounded worker pool consuming the shared work queue.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::manifest::SharedManifest;
use crate::types::{ManifestRecord, Post};
use crate::utils::{canonical_post_url, format_bytes};

use super::BooruDownloader;
use super::checkpoint::spawn_checkpointer;

/// Success/failure counts for one pipeline run.
pub(crate) struct PipelineStats {
    pub(crate) downloaded: usize,
    pub(crate) failed: usize,
}

impl BooruDownloader {
    /// Download every work item under the configured concurrency bound.
    ///
    /// All items are placed on a single shared FIFO queue before any worker
    /// starts; `N` workers pull from it until it is empty, so each item is
    /// consumed by exactly one worker and completion order is whatever the
    /// network makes of it. The checkpointer runs alongside the workers and
    /// is cancelled and awaited only after every worker has exited, so the
    /// caller's final save can never race a checkpoint tick.
    pub(crate) async fn run_pipeline(
        &self,
        work: Vec<Post>,
        manifest: SharedManifest,
    ) -> Result<PipelineStats> {
        let queue: Arc<Mutex<VecDeque<Post>>> = Arc::new(Mutex::new(work.into()));

        let cancel_token = CancellationToken::new();
        let checkpointer = spawn_checkpointer(
            self.manifest_store.clone(),
            manifest.clone(),
            self.config.download.checkpoint_interval,
            cancel_token.clone(),
        );

        let downloaded = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));

        let worker_count = self.config.download.max_concurrent_downloads.max(1);
        let mut handles = Vec::with_capacity(worker_count);
        for slot in 0..worker_count {
            let downloader = self.clone();
            let queue = Arc::clone(&queue);
            let manifest = Arc::clone(&manifest);
            let downloaded = Arc::clone(&downloaded);
            let failed = Arc::clone(&failed);

            handles.push(tokio::spawn(async move {
                downloader
                    .worker_loop(slot, queue, manifest, downloaded, failed)
                    .await;
            }));
        }

        // Workers terminate naturally once the queue is empty; in-flight
        // downloads are never preempted.
        let mut join_error = None;
        for handle in handles {
            if let Err(e) = handle.await {
                join_error.get_or_insert_with(|| Error::WorkerJoin(e.to_string()));
            }
        }

        tracing::info!("All workers finished, stopping checkpointer");
        cancel_token.cancel();
        if let Err(e) = checkpointer.await {
            join_error.get_or_insert_with(|| Error::WorkerJoin(e.to_string()));
        }

        if let Some(e) = join_error {
            return Err(e);
        }

        Ok(PipelineStats {
            downloaded: downloaded.load(Ordering::SeqCst),
            failed: failed.load(Ordering::SeqCst),
        })
    }

    /// One worker: pull items off the queue until it is empty.
    ///
    /// A failed item is logged, appended to the error list, and skipped;
    /// it is never fatal to the run. Each success upserts the manifest record
    /// under the item's id (last-write-wins).
    async fn worker_loop(
        &self,
        slot: usize,
        queue: Arc<Mutex<VecDeque<Post>>>,
        manifest: SharedManifest,
        downloaded: Arc<AtomicUsize>,
        failed: Arc<AtomicUsize>,
    ) {
        loop {
            let post = { queue.lock().await.pop_front() };
            let Some(post) = post else {
                break;
            };

            self.progress
                .slot_status(slot, &format!("fetching ID {}", post.id));
            self.progress.slot_progress(slot, 0.0);

            match self.fetch_item(slot, &post).await {
                Ok(written) => {
                    let record = ManifestRecord {
                        file_size: written,
                        file_name: format!(
                            "{}.{}",
                            post.id,
                            post.file_ext.as_deref().unwrap_or_default()
                        ),
                        search_tags: self.search_tags.clone(),
                        tags: post.tags.clone(),
                        downloaded_at: Utc::now(),
                    };
                    manifest.lock().await.insert(post.id, record);
                    downloaded.fetch_add(1, Ordering::SeqCst);

                    self.progress.slot_status(
                        slot,
                        &format!("done ID {} ({})", post.id, format_bytes(written)),
                    );
                    self.progress.slot_progress(slot, 1.0);
                }
                Err(e) => {
                    tracing::warn!(post_id = post.id.get(), error = %e, "Download failed");

                    let url = canonical_post_url(&self.config.api.base_url, post.id);
                    if let Err(write_err) = self.error_list.record(&url).await {
                        tracing::error!(
                            post_id = post.id.get(),
                            error = %write_err,
                            "Could not append to the error list"
                        );
                    }
                    failed.fetch_add(1, Ordering::SeqCst);

                    self.progress
                        .slot_status(slot, &format!("failed ID {}", post.id));
                }
            }

            self.progress.increment_total();
        }

        self.progress.slot_status(slot, "idle");
    }
}
