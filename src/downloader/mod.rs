//! Core download orchestration split into focused submodules.
//!
//! The `BooruDownloader` struct and its methods are organized by phase:
//! - [`run`] - Top-level run lifecycle and the session protocol
//! - [`pipeline`] - Bounded worker pool over the shared work queue
//! - [`fetch_item`] - Streaming download of a single item
//! - [`checkpoint`] - Periodic manifest persistence while the pipeline runs

mod checkpoint;
mod fetch_item;
mod pipeline;
mod run;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::manifest::ManifestStore;
use crate::metadata::MetadataClient;
use crate::progress::{NoOpProgressSink, ProgressSink};
use crate::report::ErrorList;
use crate::session::{AlwaysProceed, Operator, SessionStore};

/// Resumable bulk downloader for one (tag filter, output directory) pair
/// (cloneable - shared state is Arc-wrapped)
///
/// Construction wires up the HTTP client and the persistence stores but
/// performs no I/O; everything happens inside
/// [`run`](BooruDownloader::run).
#[derive(Clone)]
pub struct BooruDownloader {
    /// Shared HTTP client used for both listing pages and file downloads
    pub(crate) client: reqwest::Client,
    /// Configuration (wrapped in Arc for sharing across worker tasks)
    pub(crate) config: Arc<Config>,
    /// The tag filter this run downloads
    pub(crate) search_tags: String,
    /// Paginated listing client
    pub(crate) metadata: MetadataClient,
    /// Manifest persistence for the output directory
    pub(crate) manifest_store: ManifestStore,
    /// Session persistence for the resume protocol
    pub(crate) session_store: SessionStore,
    /// Append-only record of failed items
    pub(crate) error_list: ErrorList,
    /// Progress fan-in target, called concurrently by all workers
    pub(crate) progress: Arc<dyn ProgressSink>,
    /// Resume confirmation capability
    pub(crate) operator: Arc<dyn Operator>,
}

impl BooruDownloader {
    /// Create a new downloader for the given tag filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(search_tags: impl Into<String>, config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.api.user_agent)
            .build()?;

        let metadata = MetadataClient::new(client.clone(), &config.api);
        let manifest_store = ManifestStore::new(config.manifest_path());
        let session_store = SessionStore::new(config.persistence.session_path.clone());
        let error_list = ErrorList::new(config.persistence.error_list_path.clone());

        Ok(Self {
            client,
            config: Arc::new(config),
            search_tags: search_tags.into(),
            metadata,
            manifest_store,
            session_store,
            error_list,
            progress: Arc::new(NoOpProgressSink),
            operator: Arc::new(AlwaysProceed),
        })
    }

    /// Replace the progress sink (default: [`NoOpProgressSink`]).
    ///
    /// The sink is called concurrently by all workers and must be
    /// internally synchronized.
    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    /// Replace the resume-confirmation operator (default: [`AlwaysProceed`]).
    pub fn with_operator(mut self, operator: Arc<dyn Operator>) -> Self {
        self.operator = operator;
        self
    }

    /// The tag filter this downloader was created with
    pub fn search_tags(&self) -> &str {
        &self.search_tags
    }

    /// The current configuration (cheap Arc clone)
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }
}
