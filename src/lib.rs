//! # booru-dl
//!
//! Resumable bulk-download engine for booru-style imageboards.
//!
//! ## Design Philosophy
//!
//! booru-dl is designed to be:
//! - **Resumable** - a session file marks every run; an interrupted run can
//!   pick up exactly where it left off after a re-sync with the server
//! - **Incremental** - a manifest of completed downloads makes repeat runs
//!   skip everything already on disk, redownloading only stale items
//! - **Failure-tolerant** - a failed page or file never aborts the run; it
//!   is logged, recorded, and skipped
//! - **Library-first** - no CLI or UI; prompts and progress rendering plug
//!   in through the [`Operator`] and [`ProgressSink`] traits
//!
//! ## Quick Start
//!
//! ```no_run
//! use booru_dl::{BooruDownloader, Config, RunOutcome, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.download.output_dir = "./cats".into();
//!
//!     // Offer to resume an interrupted run, if one is pending
//!     let store = SessionStore::new(config.persistence.session_path.clone());
//!     let resumed = if let Some(session) = store.load().await {
//!         config.download.output_dir = session.output_dir.clone();
//!         true
//!     } else {
//!         false
//!     };
//!
//!     let downloader = BooruDownloader::new("cat rating:safe", config)?;
//!     match downloader.run(resumed).await? {
//!         RunOutcome::Completed { downloaded, failed } => {
//!             println!("{} downloaded, {} failed", downloaded, failed);
//!         }
//!         RunOutcome::UpToDate => println!("nothing to do"),
//!         RunOutcome::Declined => println!("resume declined, session kept"),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Core downloader implementation (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Filter engine diffing listings against the manifest
pub mod filter;
/// Manifest persistence
pub mod manifest;
/// Paginated metadata fetching
pub mod metadata;
/// Progress reporting capability interface
pub mod progress;
/// Error list persistence
pub mod report;
/// Session persistence and the resume protocol
pub mod session;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{ApiConfig, Config, DownloadConfig, PersistenceConfig};
pub use downloader::BooruDownloader;
pub use error::{DownloadError, Error, Result};
pub use filter::filter_posts;
pub use manifest::{ManifestMap, ManifestStore, SharedManifest};
pub use metadata::MetadataClient;
pub use progress::{NoOpProgressSink, ProgressSink};
pub use report::ErrorList;
pub use session::{AlwaysProceed, Operator, SessionStore};
pub use types::{ManifestRecord, Post, PostId, RunOutcome, SessionState};
