//! Download Manager for AIBrowser.
//!
//! Tracks the downloads of the current session, newest first. The front end
//! performs the transfer and reports progress; this list only mirrors it.
//! Terminal transitions hand the finished record back to the caller, which
//! records it in the persistence store.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::download::{DownloadItem, DownloadState};
use crate::types::errors::DownloadError;

/// Trait defining download tracking operations.
pub trait DownloadManagerTrait {
    fn enqueue(&mut self, id: &str, url: &str, filename: &str, save_path: &str) -> Result<&DownloadItem, DownloadError>;
    fn start(
        &mut self,
        id: &str,
        url: &str,
        filename: &str,
        save_path: &str,
        total_bytes: Option<u64>,
    ) -> Result<&DownloadItem, DownloadError>;
    fn progress(&mut self, id: &str, received_bytes: u64, total_bytes: Option<u64>) -> Result<&DownloadItem, DownloadError>;
    fn finish(&mut self, id: &str, state: DownloadState) -> Result<DownloadItem, DownloadError>;
    fn remove(&mut self, id: &str) -> bool;
    fn clear(&mut self) -> usize;
    fn list(&self) -> &[DownloadItem];
    fn get(&self, id: &str) -> Option<&DownloadItem>;
    fn active_count(&self) -> usize;
}

/// In-memory session list of downloads.
#[derive(Default)]
pub struct DownloadManager {
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the session list from stored records, keeping only completed
    /// and interrupted downloads. `stored` is expected newest first.
    pub fn with_history(stored: Vec<DownloadItem>) -> Self {
        let downloads = stored
            .into_iter()
            .filter(|d| matches!(d.state, DownloadState::Completed | DownloadState::Interrupted))
            .collect();
        Self { downloads }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn find_index(&self, id: &str) -> Result<usize, DownloadError> {
        self.downloads
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }

    fn insert_new(&mut self, item: DownloadItem) -> &DownloadItem {
        self.downloads.insert(0, item);
        &self.downloads[0]
    }
}

impl DownloadManagerTrait for DownloadManager {
    /// Registers a download the front end has not started transferring yet.
    fn enqueue(&mut self, id: &str, url: &str, filename: &str, save_path: &str) -> Result<&DownloadItem, DownloadError> {
        if self.get(id).is_some() {
            return Err(DownloadError::AlreadyExists(id.to_string()));
        }
        Ok(self.insert_new(DownloadItem {
            id: id.to_string(),
            url: url.to_string(),
            filename: filename.to_string(),
            save_path: save_path.to_string(),
            received_bytes: 0,
            total_bytes: None,
            state: DownloadState::Queued,
            started_at: Self::now(),
            finished_at: None,
        }))
    }

    /// Marks a download as transferring. A queued entry with the same id is
    /// promoted in place; any other existing entry is an error.
    fn start(
        &mut self,
        id: &str,
        url: &str,
        filename: &str,
        save_path: &str,
        total_bytes: Option<u64>,
    ) -> Result<&DownloadItem, DownloadError> {
        if let Some(idx) = self.downloads.iter().position(|d| d.id == id) {
            let item = &mut self.downloads[idx];
            if item.state != DownloadState::Queued {
                return Err(DownloadError::AlreadyExists(id.to_string()));
            }
            item.url = url.to_string();
            item.filename = filename.to_string();
            item.save_path = save_path.to_string();
            item.total_bytes = total_bytes;
            item.state = DownloadState::InProgress;
            return Ok(&self.downloads[idx]);
        }

        Ok(self.insert_new(DownloadItem {
            id: id.to_string(),
            url: url.to_string(),
            filename: filename.to_string(),
            save_path: save_path.to_string(),
            received_bytes: 0,
            total_bytes,
            state: DownloadState::InProgress,
            started_at: Self::now(),
            finished_at: None,
        }))
    }

    fn progress(&mut self, id: &str, received_bytes: u64, total_bytes: Option<u64>) -> Result<&DownloadItem, DownloadError> {
        let idx = self.find_index(id)?;
        let item = &mut self.downloads[idx];
        if item.state.is_terminal() {
            return Err(DownloadError::AlreadyFinished(id.to_string()));
        }
        item.state = DownloadState::InProgress;
        item.received_bytes = received_bytes;
        if total_bytes.is_some() {
            item.total_bytes = total_bytes;
        }
        Ok(&self.downloads[idx])
    }

    /// Moves a download into a terminal state and returns the final record.
    fn finish(&mut self, id: &str, state: DownloadState) -> Result<DownloadItem, DownloadError> {
        let idx = self.find_index(id)?;
        let item = &mut self.downloads[idx];
        if item.state.is_terminal() {
            return Err(DownloadError::AlreadyFinished(id.to_string()));
        }
        if !state.is_terminal() {
            return Err(DownloadError::InvalidTransition {
                id: id.to_string(),
                from: item.state.as_str().to_string(),
                to: state.as_str().to_string(),
            });
        }

        item.state = state;
        item.finished_at = Some(Self::now());
        if state == DownloadState::Completed {
            if let Some(total) = item.total_bytes {
                item.received_bytes = total;
            }
        }
        Ok(item.clone())
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.downloads.len();
        self.downloads.retain(|d| d.id != id);
        self.downloads.len() != before
    }

    /// Drops finished entries from the list; transfers still running stay.
    fn clear(&mut self) -> usize {
        let before = self.downloads.len();
        self.downloads.retain(|d| !d.state.is_terminal());
        before - self.downloads.len()
    }

    fn list(&self) -> &[DownloadItem] {
        &self.downloads
    }

    fn get(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }

    fn active_count(&self) -> usize {
        self.downloads
            .iter()
            .filter(|d| d.state == DownloadState::InProgress)
            .count()
    }
}
