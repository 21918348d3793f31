//! Configuration types for booru-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Imageboard API configuration (endpoint, identity, paging)
///
/// Groups settings for talking to the listing endpoint. Used as a nested
/// sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the imageboard (default: "https://yande.re")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Number of post records requested per listing page (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
        }
    }
}

/// Download behavior configuration (output directory, concurrency, checkpointing)
///
/// Groups settings for how files are fetched and stored. Used as a nested
/// sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Output directory for downloaded files; also holds `manifest.json`
    /// (default: "./downloads")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum concurrent downloads (default: 5)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_downloads: usize,

    /// Interval between periodic manifest checkpoints while the pipeline
    /// runs (default: 2 seconds)
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_concurrent_downloads: default_max_concurrent(),
            checkpoint_interval: default_checkpoint_interval(),
        }
    }
}

/// Persistence paths for run state outside the output directory
///
/// The manifest always lives at `{output_dir}/manifest.json`; these paths
/// cover the session file and the error list, which belong to the process
/// rather than to one output directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Session file marking a resumable run (default: "./session.json")
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,

    /// Append-only list of failed items, one canonical post URL per line
    /// (default: "./failed.txt")
    #[serde(default = "default_error_list_path")]
    pub error_list_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            session_path: default_session_path(),
            error_list_path: default_error_list_path(),
        }
    }
}

/// Top-level configuration for [`BooruDownloader`](crate::BooruDownloader)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Imageboard API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Download behavior settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Persistence paths
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl Config {
    /// Path of the manifest file, derived from the output directory
    pub fn manifest_path(&self) -> PathBuf {
        self.download.output_dir.join("manifest.json")
    }
}

fn default_base_url() -> String {
    "https://yande.re".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_max_concurrent() -> usize {
    5
}

fn default_checkpoint_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./session.json")
}

fn default_error_list_path() -> PathBuf {
    PathBuf::from("./failed.txt")
}
