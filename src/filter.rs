//! Filter engine: diffs fetched metadata against the manifest.

use crate::manifest::ManifestMap;
use crate::types::Post;

/// Select the posts that need downloading.
///
/// Policy per post:
/// - id absent from the manifest: include (new file)
/// - id present with a recorded size equal to the reported size: exclude
/// - id present with a differing size: include (stale; a successful
///   redownload overwrites the record)
///
/// Pure and deterministic; touches no filesystem. Staleness is judged by
/// size alone, matching the manifest's byte-count contract: a corrupt file
/// that happens to keep its recorded size passes as valid. There is no
/// content hash to catch that case.
pub fn filter_posts(posts: &[Post], manifest: &ManifestMap) -> Vec<Post> {
    let mut to_download = Vec::new();

    for post in posts {
        match manifest.get(&post.id) {
            Some(record) if record.file_size == post.file_size => {}
            Some(record) => {
                tracing::info!(
                    post_id = post.id.get(),
                    recorded = record.file_size,
                    reported = post.file_size,
                    "Size mismatch, scheduling redownload"
                );
                to_download.push(post.clone());
            }
            None => to_download.push(post.clone()),
        }
    }

    to_download
}
