//! Error list persistence: failed items, one canonical URL per line.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::Result;

/// Append-only record of failed downloads.
///
/// Workers append concurrently, so every write is serialized through one
/// mutex; each line is a canonical post URL the operator can open to retry
/// by hand. The file is created on first failure and never truncated.
#[derive(Clone, Debug)]
pub struct ErrorList {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ErrorList {
    /// Create an error list writing to the given path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The error list file path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Append one failed item's canonical URL.
    pub async fn record(&self, url: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", url).as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
