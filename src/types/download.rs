use serde::{Deserialize, Serialize};

/// Number of finished downloads kept by a store.
pub const DOWNLOAD_RETENTION: usize = 100;

/// Lifecycle state of a file download.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    Queued,
    InProgress,
    Completed,
    Interrupted,
    Cancelled,
}

impl DownloadState {
    /// Completed, interrupted and cancelled downloads never change state again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DownloadState::Completed | DownloadState::Interrupted | DownloadState::Cancelled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DownloadState::Queued => "queued",
            DownloadState::InProgress => "in_progress",
            DownloadState::Completed => "completed",
            DownloadState::Interrupted => "interrupted",
            DownloadState::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(DownloadState::Queued),
            "in_progress" => Some(DownloadState::InProgress),
            "completed" => Some(DownloadState::Completed),
            "interrupted" => Some(DownloadState::Interrupted),
            "cancelled" => Some(DownloadState::Cancelled),
            _ => None,
        }
    }
}

/// Represents a file download with its progress and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub save_path: String,
    pub received_bytes: u64,
    pub total_bytes: Option<u64>,
    pub state: DownloadState,
    pub started_at: i64,
    pub finished_at: Option<i64>,
}

impl DownloadItem {
    /// Fraction in `0.0..=1.0`; zero while the total size is unknown.
    pub fn progress(&self) -> f64 {
        if self.state == DownloadState::Completed {
            return 1.0;
        }
        match self.total_bytes {
            Some(total) if total > 0 => (self.received_bytes as f64 / total as f64).min(1.0),
            _ => 0.0,
        }
    }
}
