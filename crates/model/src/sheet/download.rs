use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Message the hosting service reports for a completed download.
pub const SUCCESS_MESSAGE: &str = "SUCCESS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "lowercase")]
pub enum DownloadStatus {
    Success,
    Failure(String),
}

/// Outcome of a sheet download, as handed back by the sheet client.
///
/// The status must be checked before `source_path` is trusted; on failure
/// the directory and file name may point at nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResult {
    pub status: DownloadStatus,
    pub download_directory: PathBuf,
    pub filename: String,
    pub message: String,
    pub downloaded_at: DateTime<Utc>,
}

impl DownloadResult {
    pub fn success(download_directory: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            status: DownloadStatus::Success,
            download_directory: download_directory.into(),
            filename: filename.into(),
            message: SUCCESS_MESSAGE.to_string(),
            downloaded_at: Utc::now(),
        }
    }

    pub fn failure(download_directory: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            status: DownloadStatus::Failure(reason.clone()),
            download_directory: download_directory.into(),
            filename: String::new(),
            message: reason,
            downloaded_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, DownloadStatus::Success)
    }

    pub fn source_path(&self) -> PathBuf {
        self.download_directory.join(&self.filename)
    }
}
