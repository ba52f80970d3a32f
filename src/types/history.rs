use serde::{Deserialize, Serialize};

/// Visits to the same address closer together than this are recorded once (ms).
pub const HISTORY_DEDUP_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Number of most recent history entries kept by a store.
pub const HISTORY_RETENTION: usize = 1000;

/// Represents a single history entry for a visited page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: Option<String>,
    pub visited_at: i64,
}

/// A visit about to be recorded. `visited_at` is the caller's notion of "now".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHistoryEntry {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: Option<String>,
    pub visited_at: i64,
}

/// Result of `PersistenceStore::add_history`.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    /// A new entry was written.
    Recorded(HistoryEntry),
    /// The address was already visited inside the dedup window; nothing changed.
    Deduplicated,
    /// History recording is switched off in settings.
    Disabled,
}
