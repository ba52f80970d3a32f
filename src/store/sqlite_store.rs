//! SQLite-backed store.
//!
//! Same record rules as the JSON store, enforced with SQL. Statement failures
//! surface as [`StoreError::Database`] and leave the tables untouched.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::database::Database;
use crate::store::PersistenceStore;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::download::{DownloadItem, DownloadState, DOWNLOAD_RETENTION};
use crate::types::errors::{BookmarkError, StoreError};
use crate::types::history::{
    HistoryEntry, HistoryOutcome, NewHistoryEntry, HISTORY_DEDUP_WINDOW_MS, HISTORY_RETENTION,
};
use crate::types::settings::{BrowserSettings, SettingsPatch};

fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

/// SQLite implementation of [`PersistenceStore`].
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::open(path).map_err(db_err)?;
        Ok(Self { db })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let db = Database::open_in_memory().map_err(db_err)?;
        Ok(Self { db })
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            favicon: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn row_to_history(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            favicon: row.get(3)?,
            visited_at: row.get(4)?,
        })
    }

    fn row_to_download(row: &rusqlite::Row) -> rusqlite::Result<DownloadItem> {
        let state: String = row.get(6)?;
        let received: i64 = row.get(4)?;
        let total: Option<i64> = row.get(5)?;
        Ok(DownloadItem {
            id: row.get(0)?,
            url: row.get(1)?,
            filename: row.get(2)?,
            save_path: row.get(3)?,
            received_bytes: received.max(0) as u64,
            total_bytes: total.map(|t| t.max(0) as u64),
            state: DownloadState::parse(&state).unwrap_or(DownloadState::Interrupted),
            started_at: row.get(7)?,
            finished_at: row.get(8)?,
        })
    }
}

impl PersistenceStore for SqliteStore {
    fn get_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT id, url, title, favicon, created_at FROM bookmarks ORDER BY seq")
            .map_err(db_err)?;
        let rows = stmt.query_map([], Self::row_to_bookmark).map_err(db_err)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(db_err)?);
        }
        Ok(results)
    }

    fn add_bookmark(&mut self, bookmark: NewBookmark) -> Result<Bookmark, BookmarkError> {
        if self
            .is_bookmarked(&bookmark.url)
            .map_err(|e| BookmarkError::Store(e.to_string()))?
        {
            return Err(BookmarkError::DuplicateUrl(bookmark.url));
        }

        let record = Bookmark {
            id: Uuid::new_v4().to_string(),
            url: bookmark.url,
            title: bookmark.title,
            favicon: bookmark.favicon,
            created_at: Self::now(),
        };
        self.db
            .connection()
            .execute(
                "INSERT INTO bookmarks (id, url, title, favicon, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![record.id, record.url, record.title, record.favicon, record.created_at],
            )
            .map_err(|e| BookmarkError::Store(e.to_string()))?;
        Ok(record)
    }

    fn remove_bookmark(&mut self, id: &str) -> Result<bool, StoreError> {
        let affected = self
            .db
            .connection()
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(db_err)?;
        Ok(affected > 0)
    }

    fn is_bookmarked(&self, url: &str) -> Result<bool, StoreError> {
        let count: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM bookmarks WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        Ok(count > 0)
    }

    fn get_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(
                "SELECT id, url, title, favicon, visited_at FROM history \
                 ORDER BY visited_at DESC, seq DESC",
            )
            .map_err(db_err)?;
        let rows = stmt.query_map([], Self::row_to_history).map_err(db_err)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(db_err)?);
        }
        Ok(results)
    }

    fn add_history(&mut self, entry: NewHistoryEntry) -> Result<HistoryOutcome, StoreError> {
        if !self.get_settings()?.save_history {
            return Ok(HistoryOutcome::Disabled);
        }

        let conn = self.db.connection();
        let recent: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM history WHERE url = ?1 AND ?2 - visited_at < ?3",
                params![entry.url, entry.visited_at, HISTORY_DEDUP_WINDOW_MS],
                |row| row.get(0),
            )
            .map_err(db_err)?;
        if recent > 0 {
            return Ok(HistoryOutcome::Deduplicated);
        }

        let record = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            url: entry.url,
            title: entry.title,
            favicon: entry.favicon,
            visited_at: entry.visited_at,
        };
        conn.execute(
            "INSERT INTO history (id, url, title, favicon, visited_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![record.id, record.url, record.title, record.favicon, record.visited_at],
        )
        .map_err(db_err)?;
        conn.execute(
            "DELETE FROM history WHERE seq NOT IN \
             (SELECT seq FROM history ORDER BY visited_at DESC, seq DESC LIMIT ?1)",
            params![HISTORY_RETENTION as i64],
        )
        .map_err(db_err)?;
        Ok(HistoryOutcome::Recorded(record))
    }

    fn clear_history(&mut self) -> Result<(), StoreError> {
        self.db
            .connection()
            .execute("DELETE FROM history", [])
            .map_err(db_err)?;
        Ok(())
    }

    fn get_downloads(&self) -> Result<Vec<DownloadItem>, StoreError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(
                "SELECT id, url, filename, save_path, received_bytes, total_bytes, state, \
                 started_at, finished_at FROM downloads ORDER BY seq DESC",
            )
            .map_err(db_err)?;
        let rows = stmt.query_map([], Self::row_to_download).map_err(db_err)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(db_err)?);
        }
        Ok(results)
    }

    fn record_download(&mut self, item: DownloadItem) -> Result<(), StoreError> {
        let conn = self.db.connection();
        conn.execute("DELETE FROM downloads WHERE id = ?1", params![item.id])
            .map_err(db_err)?;
        conn.execute(
            "INSERT INTO downloads (id, url, filename, save_path, received_bytes, total_bytes, \
             state, started_at, finished_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.url,
                item.filename,
                item.save_path,
                item.received_bytes as i64,
                item.total_bytes.map(|t| t as i64),
                item.state.as_str(),
                item.started_at,
                item.finished_at,
            ],
        )
        .map_err(db_err)?;
        conn.execute(
            "DELETE FROM downloads WHERE seq NOT IN \
             (SELECT seq FROM downloads ORDER BY seq DESC LIMIT ?1)",
            params![DOWNLOAD_RETENTION as i64],
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn get_settings(&self) -> Result<BrowserSettings, StoreError> {
        let data: Option<String> = self
            .db
            .connection()
            .query_row("SELECT data FROM settings WHERE id = 1", [], |row| row.get(0))
            .optional()
            .map_err(db_err)?;

        match data {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StoreError::Serialization(format!("Failed to parse settings: {}", e))),
            None => Ok(BrowserSettings::default()),
        }
    }

    fn save_settings(&mut self, patch: SettingsPatch) -> Result<BrowserSettings, StoreError> {
        let mut settings = self.get_settings()?;
        settings.merge(patch);
        let json = serde_json::to_string(&settings)
            .map_err(|e| StoreError::Serialization(format!("Failed to serialize settings: {}", e)))?;
        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO settings (id, data) VALUES (1, ?1)",
                params![json],
            )
            .map_err(db_err)?;
        Ok(settings)
    }
}
