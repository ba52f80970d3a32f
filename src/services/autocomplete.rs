//! Autocomplete Index.
//!
//! Address-bar suggestions drawn from bookmarks and history.

use serde::{Deserialize, Serialize};

use crate::types::bookmark::Bookmark;
use crate::types::history::HistoryEntry;

/// Queries shorter than this produce no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Bookmark,
    History,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub url: String,
}

/// Suggestions for `query`: bookmarks first, then history in the given order
/// (most recent first). History entries whose address is already suggested
/// are skipped. Matching is a case-insensitive substring test on title and url.
pub fn suggest(query: &str, bookmarks: &[Bookmark], history: &[HistoryEntry]) -> Vec<Suggestion> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let matches = |title: &str, url: &str| {
        title.to_lowercase().contains(&needle) || url.to_lowercase().contains(&needle)
    };

    let mut results: Vec<Suggestion> = bookmarks
        .iter()
        .filter(|b| matches(&b.title, &b.url))
        .take(MAX_SUGGESTIONS)
        .map(|b| Suggestion {
            kind: SuggestionKind::Bookmark,
            title: b.title.clone(),
            url: b.url.clone(),
        })
        .collect();

    for entry in history {
        if results.len() >= MAX_SUGGESTIONS {
            break;
        }
        if !matches(&entry.title, &entry.url) || results.iter().any(|s| s.url == entry.url) {
            continue;
        }
        results.push(Suggestion {
            kind: SuggestionKind::History,
            title: entry.title.clone(),
            url: entry.url.clone(),
        });
    }

    results
}

/// History entries whose title or url contains `filter` (case-insensitive).
/// An empty filter returns everything.
pub fn filter_history(history: Vec<HistoryEntry>, filter: &str) -> Vec<HistoryEntry> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return history;
    }
    history
        .into_iter()
        .filter(|h| h.title.to_lowercase().contains(&needle) || h.url.to_lowercase().contains(&needle))
        .collect()
}
