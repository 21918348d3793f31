//! Streaming download of a single work item.

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::DownloadError;
use crate::types::Post;
use crate::utils::format_bytes;

use super::BooruDownloader;

impl BooruDownloader {
    /// Download one post's file to `{output_dir}/{id}.{ext}`.
    ///
    /// Validates the record before any network call: a missing URL or
    /// extension is a failure on its own. The body is streamed to disk
    /// chunk by chunk, with a progress report after every chunk. On success
    /// the measured byte count is returned; that number, never the
    /// server-reported size, is what ends up in the manifest. On any error
    /// the partial file on disk is not treated as valid and nothing is
    /// recorded by this method; the caller owns failure bookkeeping.
    pub(crate) async fn fetch_item(
        &self,
        slot: usize,
        post: &Post,
    ) -> Result<i64, DownloadError> {
        let id = post.id;

        let file_url = match post.file_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return Err(DownloadError::MissingUrl { id }),
        };
        let file_ext = match post.file_ext.as_deref() {
            Some(ext) if !ext.is_empty() => ext,
            _ => return Err(DownloadError::MissingExtension { id }),
        };
        if url::Url::parse(file_url).is_err() {
            return Err(DownloadError::InvalidUrl {
                id,
                url: file_url.to_string(),
            });
        }

        let file_name = format!("{}.{}", id, file_ext);
        let file_path = self.config.download.output_dir.join(&file_name);

        let response = self
            .client
            .get(file_url)
            .send()
            .await
            .map_err(|source| DownloadError::Request { id, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus { id, status });
        }

        let reported_size = post.file_size;
        let total_label = if reported_size > 0 {
            format_bytes(reported_size)
        } else {
            "???".to_string()
        };

        let mut file = tokio::fs::File::create(&file_path)
            .await
            .map_err(|source| DownloadError::Io { id, source })?;

        let mut stream = response.bytes_stream();
        let mut written: i64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| DownloadError::Stream {
                id,
                written,
                source,
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|source| DownloadError::Io { id, source })?;
            written += chunk.len() as i64;

            self.progress.slot_status(
                slot,
                &format!("ID {}: {} / {}", id, format_bytes(written), total_label),
            );
            let fraction = if reported_size > 0 {
                written as f64 / reported_size as f64
            } else {
                0.0
            };
            self.progress.slot_progress(slot, fraction);
        }

        file.flush()
            .await
            .map_err(|source| DownloadError::Io { id, source })?;

        Ok(written)
    }
}
