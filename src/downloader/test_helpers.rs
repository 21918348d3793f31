//! Shared test helpers for creating BooruDownloader instances in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::Config;
use crate::downloader::BooruDownloader;
use crate::progress::ProgressSink;
use crate::session::Operator;
use crate::types::{Post, PostId};

/// Helper to create a test BooruDownloader pointed at a mock server.
/// Returns the downloader and the tempdir (which must be kept alive).
pub(crate) fn create_test_downloader(server: &MockServer) -> (BooruDownloader, TempDir) {
    create_test_downloader_with_tags(server, "cat")
}

pub(crate) fn create_test_downloader_with_tags(
    server: &MockServer,
    tags: &str,
) -> (BooruDownloader, TempDir) {
    let temp_dir = tempdir().unwrap();

    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.download.output_dir = temp_dir.path().join("downloads");
    config.download.max_concurrent_downloads = 3;
    config.download.checkpoint_interval = Duration::from_millis(100);
    config.persistence.session_path = temp_dir.path().join("session.json");
    config.persistence.error_list_path = temp_dir.path().join("failed.txt");

    // Pipeline-level tests bypass run(), which normally creates this
    std::fs::create_dir_all(&config.download.output_dir).unwrap();

    let downloader = BooruDownloader::new(tags, config).unwrap();
    (downloader, temp_dir)
}

/// A post whose file lives on the mock server at `/files/{id}.jpg`.
pub(crate) fn file_post(server: &MockServer, id: i64, reported_size: i64) -> Post {
    Post {
        id: PostId(id),
        file_url: Some(format!("{}/files/{}.jpg", server.uri(), id)),
        file_size: reported_size,
        file_ext: Some("jpg".to_string()),
        tags: "cat cute".to_string(),
    }
}

/// Mount the listing endpoint: one mock per page, plus the empty page that
/// ends pagination.
pub(crate) async fn mount_listing(server: &MockServer, pages: &[Vec<Post>]) {
    for (index, page) in pages.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", (index + 1).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page))
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/post.json"))
        .and(query_param("page", (pages.len() + 1).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Post>::new()))
        .mount(server)
        .await;
}

/// Mount a file download returning `body`, optionally delayed.
pub(crate) async fn mount_file(server: &MockServer, id: i64, body: Vec<u8>, delay: Option<Duration>) {
    let mut template = ResponseTemplate::new(200).set_body_bytes(body);
    if let Some(delay) = delay {
        template = template.set_delay(delay);
    }
    Mock::given(method("GET"))
        .and(path(format!("/files/{}.jpg", id)))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Progress sink that counts finished items and remembers the highest slot
/// index it ever saw.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) max_slot: AtomicUsize,
    pub(crate) completed: AtomicUsize,
}

impl ProgressSink for RecordingSink {
    fn slot_status(&self, slot: usize, _status: &str) {
        self.max_slot.fetch_max(slot, Ordering::SeqCst);
    }

    fn slot_progress(&self, slot: usize, _fraction: f64) {
        self.max_slot.fetch_max(slot, Ordering::SeqCst);
    }

    fn increment_total(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Operator that records every confirmation request and answers `accept`.
pub(crate) struct RecordingOperator {
    pub(crate) accept: bool,
    pub(crate) calls: std::sync::Mutex<Vec<usize>>,
}

impl RecordingOperator {
    pub(crate) fn new(accept: bool) -> Arc<Self> {
        Arc::new(Self {
            accept,
            calls: std::sync::Mutex::new(Vec::new()),
        })
    }
}

impl Operator for RecordingOperator {
    fn confirm_proceed(&self, pending: usize) -> bool {
        self.calls.lock().unwrap().push(pending);
        self.accept
    }
}
