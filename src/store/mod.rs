//! Persistence store for bookmarks, history, downloads and settings.
//!
//! The shell talks to storage only through [`PersistenceStore`]. Two backends
//! ship with the crate:
//!
//! - [`JsonFileStore`]: everything in one pretty-printed JSON document
//!   (`browser-data.json`), kept in memory and rewritten after each change.
//! - [`SqliteStore`]: one table per record kind, on top of [`crate::database`].
//!
//! Both enforce the same record rules: unique bookmark addresses, the history
//! dedup window and retention limit, and the download retention limit.

pub mod json_store;
pub mod sqlite_store;

pub use json_store::JsonFileStore;
pub use sqlite_store::SqliteStore;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::download::DownloadItem;
use crate::types::errors::{BookmarkError, StoreError};
use crate::types::history::{HistoryEntry, HistoryOutcome, NewHistoryEntry};
use crate::types::settings::{BrowserSettings, SettingsPatch};

/// Request/response interface to the durable browser data.
pub trait PersistenceStore: Send {
    fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError>;
    /// Fails with `BookmarkError::DuplicateUrl` when the address is already bookmarked.
    fn add_bookmark(&mut self, bookmark: NewBookmark) -> Result<Bookmark, BookmarkError>;
    /// Returns whether a bookmark with this id existed.
    fn remove_bookmark(&mut self, id: &str) -> Result<bool, StoreError>;
    /// Entries sorted by descending visit time.
    fn get_history(&self) -> Result<Vec<HistoryEntry>, StoreError>;
    fn add_history(&mut self, entry: NewHistoryEntry) -> Result<HistoryOutcome, StoreError>;
    fn clear_history(&mut self) -> Result<(), StoreError>;
    /// Finished downloads, newest first.
    fn get_downloads(&self) -> Result<Vec<DownloadItem>, StoreError>;
    fn record_download(&mut self, item: DownloadItem) -> Result<(), StoreError>;
    fn get_settings(&self) -> Result<BrowserSettings, StoreError>;
    /// Merges `patch` into the stored settings and returns the result.
    fn save_settings(&mut self, patch: SettingsPatch) -> Result<BrowserSettings, StoreError>;

    fn is_bookmarked(&self, url: &str) -> Result<bool, StoreError> {
        Ok(self.get_bookmarks()?.iter().any(|b| b.url == url))
    }
}

/// Store backends selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Json,
    Sqlite,
}

impl StoreBackend {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(StoreBackend::Json),
            "sqlite" => Some(StoreBackend::Sqlite),
            _ => None,
        }
    }

    /// File name used inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StoreBackend::Json => "browser-data.json",
            StoreBackend::Sqlite => "browser-data.db",
        }
    }
}
