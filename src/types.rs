//! Core types for booru-dl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a remote post
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl PostId {
    /// Create a new PostId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<PostId> for i64 {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A single post record returned by the listing endpoint.
///
/// One instance per API record; produced by the metadata fetcher, consumed
/// by the filter engine and the download pipeline, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Remote identifier, unique per imageboard
    pub id: PostId,

    /// Direct URL of the image file (may be absent for deleted posts)
    #[serde(default)]
    pub file_url: Option<String>,

    /// File size in bytes as reported by the server
    #[serde(default)]
    pub file_size: i64,

    /// File extension without the leading dot (e.g. "jpg")
    #[serde(default)]
    pub file_ext: Option<String>,

    /// Space-separated tag string of the post
    #[serde(default)]
    pub tags: String,
}

/// Persistent record of one successfully downloaded post.
///
/// Created or overwritten only on successful download completion. The
/// `file_size` field holds the number of bytes actually written to disk,
/// measured from the output stream rather than taken from the server's
/// reported size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Bytes actually written to disk for this post's file
    pub file_size: i64,

    /// Local file name within the output directory (e.g. "12345.jpg")
    pub file_name: String,

    /// The tag filter that was active when this post was fetched
    pub search_tags: String,

    /// The post's own tag string at download time
    pub tags: String,

    /// When the download completed
    pub downloaded_at: DateTime<Utc>,
}

/// Persisted state of an in-progress run, enabling resume after interruption.
///
/// Written before any network I/O, deleted only when a run finishes with
/// zero remaining work or full success. Its presence on disk marks a
/// resumable session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The tag filter of the interrupted run
    pub tags: String,

    /// The output directory of the interrupted run
    pub output_dir: std::path::PathBuf,
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pipeline ran to completion; counts cover every work item.
    Completed {
        /// Number of posts downloaded and recorded in the manifest
        downloaded: usize,
        /// Number of posts that failed and were recorded to the error list
        failed: usize,
    },
    /// Filtering left nothing to download; local state already matches the server.
    UpToDate,
    /// The operator declined the resume confirmation; the session file was
    /// left in place so the next launch can resume.
    Declined,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_display_and_parse() {
        let id = PostId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<PostId>().unwrap(), id);
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_post_deserializes_from_api_record() {
        let json = r#"{"id": 7, "file_url": "https://files.example/7.png",
                       "file_size": 1024, "file_ext": "png", "tags": "sky cloud"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, PostId(7));
        assert_eq!(post.file_url.as_deref(), Some("https://files.example/7.png"));
        assert_eq!(post.file_size, 1024);
        assert_eq!(post.file_ext.as_deref(), Some("png"));
        assert_eq!(post.tags, "sky cloud");
    }

    #[test]
    fn test_post_tolerates_missing_optional_fields() {
        // Deleted posts come back without file_url/file_ext
        let json = r#"{"id": 9}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, PostId(9));
        assert!(post.file_url.is_none());
        assert!(post.file_ext.is_none());
        assert_eq!(post.file_size, 0);
        assert!(post.tags.is_empty());
    }
}
