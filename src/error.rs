//! Error types for booru-dl
//!
//! Per-item and per-page failures are contained where they occur: the
//! pagination loop keeps partial results and the worker pool records failed
//! items to the error list without aborting the run. Only errors outside
//! those boundaries (setup, manifest/session persistence) surface through
//! [`Error`] and terminate the run.

use crate::types::PostId;
use thiserror::Error;

/// Result type alias for booru-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for booru-dl
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (output directory, manifest, session, or error list file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error from the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error (manifest or session JSON)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Single-item download error
    ///
    /// Contained inside the worker pool during normal operation; surfaced
    /// directly only by [`fetch_item`](crate::BooruDownloader) callers that
    /// bypass the pipeline.
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// A pipeline worker task panicked or was aborted
    #[error("worker task failed: {0}")]
    WorkerJoin(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors for a single item download.
///
/// Every variant carries the post id so the failure can be recorded to the
/// error list and logged without extra bookkeeping at the call site.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The post record carried no file URL
    #[error("post {id} has no file URL")]
    MissingUrl {
        /// The post whose record lacked a URL
        id: PostId,
    },

    /// The post record carried no file extension
    #[error("post {id} has no file extension")]
    MissingExtension {
        /// The post whose record lacked an extension
        id: PostId,
    },

    /// The file URL did not parse as a valid URL
    #[error("post {id} has an invalid file URL: {url}")]
    InvalidUrl {
        /// The post whose URL failed to parse
        id: PostId,
        /// The offending URL string
        url: String,
    },

    /// The GET request failed before a response arrived
    #[error("post {id} request failed: {source}")]
    Request {
        /// The post being fetched
        id: PostId,
        /// Transport-level failure
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("post {id} returned HTTP {status}")]
    HttpStatus {
        /// The post being fetched
        id: PostId,
        /// The status code the server returned
        status: reqwest::StatusCode,
    },

    /// The response body stream broke mid-transfer
    #[error("post {id} stream failed after {written} bytes: {source}")]
    Stream {
        /// The post being fetched
        id: PostId,
        /// Bytes written before the stream broke (the partial file is not
        /// recorded in the manifest)
        written: i64,
        /// Transport-level failure
        source: reqwest::Error,
    },

    /// Writing the local file failed
    #[error("post {id} file write failed: {source}")]
    Io {
        /// The post being fetched
        id: PostId,
        /// Filesystem failure
        source: std::io::Error,
    },
}

impl DownloadError {
    /// The post this failure belongs to
    pub fn post_id(&self) -> PostId {
        match self {
            Self::MissingUrl { id }
            | Self::MissingExtension { id }
            | Self::InvalidUrl { id, .. }
            | Self::Request { id, .. }
            | Self::HttpStatus { id, .. }
            | Self::Stream { id, .. }
            | Self::Io { id, .. } => *id,
        }
    }
}
