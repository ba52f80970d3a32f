use serde::{Deserialize, Serialize};

/// Represents a saved bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: Option<String>,
    pub created_at: i64,
}

/// Input for `PersistenceStore::add_bookmark`; the store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: Option<String>,
}
