//! Single-document JSON store.
//!
//! All browser data lives in one file. The in-memory copy is authoritative:
//! every mutation is applied in memory first and then written out. A failed
//! write is logged and the mutation stands, so the session keeps working with
//! a read-only or full disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::store::PersistenceStore;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::download::{DownloadItem, DOWNLOAD_RETENTION};
use crate::types::errors::{BookmarkError, StoreError};
use crate::types::history::{
    HistoryEntry, HistoryOutcome, NewHistoryEntry, HISTORY_DEDUP_WINDOW_MS, HISTORY_RETENTION,
};
use crate::types::settings::{BrowserSettings, SettingsPatch};

/// On-disk document layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserData {
    pub bookmarks: Vec<Bookmark>,
    /// Oldest visit first.
    pub history: Vec<HistoryEntry>,
    /// Newest record first.
    pub downloads: Vec<DownloadItem>,
    pub settings: BrowserSettings,
}

impl BrowserData {
    /// Restores the ordering and size limits a hand-edited file may violate.
    fn normalize(&mut self) {
        self.history.sort_by_key(|h| h.visited_at);
        if self.history.len() > HISTORY_RETENTION {
            let excess = self.history.len() - HISTORY_RETENTION;
            self.history.drain(..excess);
        }
        self.downloads.truncate(DOWNLOAD_RETENTION);
    }
}

/// JSON-file backed implementation of [`PersistenceStore`].
pub struct JsonFileStore {
    path: Option<PathBuf>,
    data: BrowserData,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file starts an empty store. An unreadable or malformed file
    /// is logged and also starts empty; it is overwritten on the next change.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match Self::load(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable browser data");
                BrowserData::default()
            }
        };
        Self {
            path: Some(path),
            data,
        }
    }

    /// A store that never touches the disk. Used for private sessions and tests.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: BrowserData::default(),
        }
    }

    /// Reads and parses the document at `path`.
    pub fn load(path: &Path) -> Result<BrowserData, StoreError> {
        if !path.exists() {
            return Ok(BrowserData::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut data: BrowserData = serde_json::from_str(&content).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        data.normalize();
        Ok(data)
    }

    /// Writes the current document to disk. No-op for in-memory stores.
    pub fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("Failed to create data directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| StoreError::Serialization(format!("Failed to serialize data: {}", e)))?;

        fs::write(path, json)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "browser data written");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn data(&self) -> &BrowserData {
        &self.data
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "browser data not saved; keeping in-memory state");
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

impl PersistenceStore for JsonFileStore {
    fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        Ok(self.data.bookmarks.clone())
    }

    fn add_bookmark(&mut self, bookmark: NewBookmark) -> Result<Bookmark, BookmarkError> {
        if self.data.bookmarks.iter().any(|b| b.url == bookmark.url) {
            return Err(BookmarkError::DuplicateUrl(bookmark.url));
        }

        let record = Bookmark {
            id: Uuid::new_v4().to_string(),
            url: bookmark.url,
            title: bookmark.title,
            favicon: bookmark.favicon,
            created_at: Self::now(),
        };
        self.data.bookmarks.push(record.clone());
        self.persist();
        Ok(record)
    }

    fn remove_bookmark(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.data.bookmarks.len();
        self.data.bookmarks.retain(|b| b.id != id);
        let removed = self.data.bookmarks.len() != before;
        if removed {
            self.persist();
        }
        Ok(removed)
    }

    fn get_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.data.history.iter().rev().cloned().collect())
    }

    fn add_history(&mut self, entry: NewHistoryEntry) -> Result<HistoryOutcome, StoreError> {
        if !self.data.settings.save_history {
            return Ok(HistoryOutcome::Disabled);
        }

        let recent = self
            .data
            .history
            .iter()
            .any(|h| h.url == entry.url && entry.visited_at - h.visited_at < HISTORY_DEDUP_WINDOW_MS);
        if recent {
            return Ok(HistoryOutcome::Deduplicated);
        }

        let record = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            url: entry.url,
            title: entry.title,
            favicon: entry.favicon,
            visited_at: entry.visited_at,
        };
        let at = self
            .data
            .history
            .partition_point(|h| h.visited_at <= record.visited_at);
        self.data.history.insert(at, record.clone());
        if self.data.history.len() > HISTORY_RETENTION {
            let excess = self.data.history.len() - HISTORY_RETENTION;
            self.data.history.drain(..excess);
        }
        self.persist();
        Ok(HistoryOutcome::Recorded(record))
    }

    fn clear_history(&mut self) -> Result<(), StoreError> {
        self.data.history.clear();
        self.persist();
        Ok(())
    }

    fn get_downloads(&self) -> Result<Vec<DownloadItem>, StoreError> {
        Ok(self.data.downloads.clone())
    }

    fn record_download(&mut self, item: DownloadItem) -> Result<(), StoreError> {
        self.data.downloads.retain(|d| d.id != item.id);
        self.data.downloads.insert(0, item);
        self.data.downloads.truncate(DOWNLOAD_RETENTION);
        self.persist();
        Ok(())
    }

    fn get_settings(&self) -> Result<BrowserSettings, StoreError> {
        Ok(self.data.settings.clone())
    }

    fn save_settings(&mut self, patch: SettingsPatch) -> Result<BrowserSettings, StoreError> {
        self.data.settings.merge(patch);
        self.persist();
        Ok(self.data.settings.clone())
    }
}
