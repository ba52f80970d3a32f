use aibrowser::services::autocomplete::{filter_history, suggest, SuggestionKind, MAX_SUGGESTIONS};
use aibrowser::types::bookmark::Bookmark;
use aibrowser::types::history::HistoryEntry;

fn bookmark(title: &str, url: &str) -> Bookmark {
    Bookmark {
        id: url.to_string(),
        url: url.to_string(),
        title: title.to_string(),
        favicon: None,
        created_at: 0,
    }
}

fn entry(title: &str, url: &str, at: i64) -> HistoryEntry {
    HistoryEntry {
        id: format!("{}-{}", url, at),
        url: url.to_string(),
        title: title.to_string(),
        favicon: None,
        visited_at: at,
    }
}

#[test]
fn test_short_query_returns_nothing() {
    let bookmarks = vec![bookmark("Rust", "https://rust-lang.org")];
    assert!(suggest("", &bookmarks, &[]).is_empty());
    assert!(suggest("r", &bookmarks, &[]).is_empty());
    assert!(suggest(" r ", &bookmarks, &[]).is_empty());
}

#[test]
fn test_matches_title_or_url_case_insensitively() {
    let bookmarks = vec![
        bookmark("The Rust Book", "https://doc.rust-lang.org/book/"),
        bookmark("Crates", "https://CRATES.io"),
        bookmark("Go", "https://go.dev"),
    ];
    let results = suggest("RUST", &bookmarks, &[]);
    assert_eq!(results.len(), 1);
    let results = suggest("crates.IO", &bookmarks, &[]);
    assert_eq!(results[0].url, "https://CRATES.io");
}

#[test]
fn test_bookmarks_come_first_and_history_is_deduplicated() {
    let bookmarks = vec![bookmark("Rust", "https://rust-lang.org")];
    let history = vec![
        entry("Rust home", "https://rust-lang.org", 3),
        entry("Rust blog", "https://blog.rust-lang.org", 2),
        entry("Rust blog again", "https://blog.rust-lang.org", 1),
    ];
    let results = suggest("rust", &bookmarks, &history);
    let kinds: Vec<SuggestionKind> = results.iter().map(|s| s.kind).collect();
    let urls: Vec<&str> = results.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(kinds, vec![SuggestionKind::Bookmark, SuggestionKind::History]);
    assert_eq!(urls, vec!["https://rust-lang.org", "https://blog.rust-lang.org"]);
}

#[test]
fn test_results_are_capped() {
    let bookmarks: Vec<Bookmark> = (0..7)
        .map(|i| bookmark("docs", &format!("https://docs{}.example", i)))
        .collect();
    let history: Vec<HistoryEntry> = (0..7)
        .map(|i| entry("docs", &format!("https://hist{}.example", i), i))
        .collect();
    let results = suggest("docs", &bookmarks, &history);
    assert_eq!(results.len(), MAX_SUGGESTIONS);
    assert_eq!(results.iter().filter(|s| s.kind == SuggestionKind::Bookmark).count(), 7);
}

#[test]
fn test_filter_history() {
    let history = vec![
        entry("Rust", "https://rust-lang.org", 2),
        entry("Go", "https://go.dev", 1),
    ];
    assert_eq!(filter_history(history.clone(), "").len(), 2);
    let filtered = filter_history(history, "GO.D");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Go");
}
