use std::fs;

use aibrowser::store::json_store::{BrowserData, JsonFileStore};
use aibrowser::store::PersistenceStore;
use aibrowser::types::bookmark::NewBookmark;
use aibrowser::types::download::{DownloadItem, DownloadState, DOWNLOAD_RETENTION};
use aibrowser::types::errors::BookmarkError;
use aibrowser::types::history::{HistoryOutcome, NewHistoryEntry, HISTORY_DEDUP_WINDOW_MS, HISTORY_RETENTION};
use aibrowser::types::settings::{SettingsPatch, ThemeMode};
use tempfile::TempDir;

fn bookmark(url: &str) -> NewBookmark {
    NewBookmark {
        url: url.to_string(),
        title: format!("Title of {}", url),
        favicon: None,
    }
}

fn visit(url: &str, at: i64) -> NewHistoryEntry {
    NewHistoryEntry {
        url: url.to_string(),
        title: "Page".to_string(),
        favicon: None,
        visited_at: at,
    }
}

fn download(id: &str) -> DownloadItem {
    DownloadItem {
        id: id.to_string(),
        url: format!("https://example.com/{}", id),
        filename: format!("{}.bin", id),
        save_path: format!("/tmp/{}.bin", id),
        received_bytes: 10,
        total_bytes: Some(10),
        state: DownloadState::Completed,
        started_at: 1,
        finished_at: Some(2),
    }
}

#[test]
fn test_missing_file_starts_empty() {
    let tmp = TempDir::new().unwrap();
    let store = JsonFileStore::open(tmp.path().join("browser-data.json"));
    assert!(store.get_bookmarks().unwrap().is_empty());
    assert!(store.get_history().unwrap().is_empty());
    assert!(store.get_settings().unwrap().save_history);
}

#[test]
fn test_malformed_file_starts_empty_and_is_replaced() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("browser-data.json");
    fs::write(&path, "{ this is not json").unwrap();

    assert!(JsonFileStore::load(&path).is_err());
    let mut store = JsonFileStore::open(&path);
    assert!(store.get_bookmarks().unwrap().is_empty());

    store.add_bookmark(bookmark("https://a.com")).unwrap();
    let reloaded = JsonFileStore::load(&path).unwrap();
    assert_eq!(reloaded.bookmarks.len(), 1);
}

#[test]
fn test_data_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("browser-data.json");
    {
        let mut store = JsonFileStore::open(&path);
        store.add_bookmark(bookmark("https://a.com")).unwrap();
        store.add_history(visit("https://a.com", 1_000)).unwrap();
        store.record_download(download("d1")).unwrap();
        store
            .save_settings(SettingsPatch {
                theme: Some(ThemeMode::Light),
                ..SettingsPatch::default()
            })
            .unwrap();
    }

    let store = JsonFileStore::open(&path);
    assert_eq!(store.get_bookmarks().unwrap()[0].url, "https://a.com");
    assert_eq!(store.get_history().unwrap()[0].visited_at, 1_000);
    assert_eq!(store.get_downloads().unwrap()[0].id, "d1");
    assert_eq!(store.get_settings().unwrap().theme, ThemeMode::Light);
}

#[test]
fn test_partial_file_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("browser-data.json");
    fs::write(&path, r#"{"settings": {"search_engine": "yandex"}}"#).unwrap();

    let store = JsonFileStore::open(&path);
    let settings = store.get_settings().unwrap();
    assert_eq!(settings.search_engine, "yandex");
    assert_eq!(settings.theme, ThemeMode::Dark);
    assert!(settings.save_history);
}

#[test]
fn test_unwritable_path_keeps_memory_state() {
    let tmp = TempDir::new().unwrap();
    // A directory where the file should be makes every write fail.
    let path = tmp.path().join("browser-data.json");
    fs::create_dir(&path).unwrap();

    let mut store = JsonFileStore::open(&path);
    let added = store.add_bookmark(bookmark("https://a.com")).unwrap();
    assert_eq!(store.get_bookmarks().unwrap(), vec![added]);
    assert!(store.flush().is_err());
}

#[test]
fn test_duplicate_bookmark_is_rejected() {
    let mut store = JsonFileStore::in_memory();
    store.add_bookmark(bookmark("https://a.com")).unwrap();
    let err = store.add_bookmark(bookmark("https://a.com")).unwrap_err();
    assert_eq!(err, BookmarkError::DuplicateUrl("https://a.com".into()));
    assert_eq!(store.get_bookmarks().unwrap().len(), 1);
}

#[test]
fn test_remove_bookmark() {
    let mut store = JsonFileStore::in_memory();
    let b = store.add_bookmark(bookmark("https://a.com")).unwrap();
    assert!(store.is_bookmarked("https://a.com").unwrap());
    assert!(store.remove_bookmark(&b.id).unwrap());
    assert!(!store.remove_bookmark(&b.id).unwrap());
    assert!(!store.is_bookmarked("https://a.com").unwrap());
}

#[test]
fn test_history_dedup_window() {
    let mut store = JsonFileStore::in_memory();
    assert!(matches!(
        store.add_history(visit("https://a.com", 0)).unwrap(),
        HistoryOutcome::Recorded(_)
    ));
    assert_eq!(
        store.add_history(visit("https://a.com", HISTORY_DEDUP_WINDOW_MS - 1)).unwrap(),
        HistoryOutcome::Deduplicated
    );
    assert!(matches!(
        store.add_history(visit("https://a.com", HISTORY_DEDUP_WINDOW_MS)).unwrap(),
        HistoryOutcome::Recorded(_)
    ));
    assert_eq!(store.get_history().unwrap().len(), 2);
}

#[test]
fn test_history_is_newest_first() {
    let mut store = JsonFileStore::in_memory();
    store.add_history(visit("https://a.com", 10)).unwrap();
    store.add_history(visit("https://c.com", 30)).unwrap();
    store.add_history(visit("https://b.com", 20)).unwrap();
    let urls: Vec<String> = store.get_history().unwrap().into_iter().map(|h| h.url).collect();
    assert_eq!(urls, vec!["https://c.com", "https://b.com", "https://a.com"]);
}

#[test]
fn test_history_retention_evicts_oldest() {
    let mut store = JsonFileStore::in_memory();
    for i in 0..=(HISTORY_RETENTION as i64) {
        store.add_history(visit(&format!("https://site{}.com", i), i)).unwrap();
    }

    let history = store.get_history().unwrap();
    assert_eq!(history.len(), HISTORY_RETENTION);
    assert_eq!(history[0].url, format!("https://site{}.com", HISTORY_RETENTION));
    assert_eq!(history.last().unwrap().url, "https://site1.com");
    assert!(history.iter().all(|h| h.url != "https://site0.com"));
}

#[test]
fn test_history_disabled_by_settings() {
    let mut store = JsonFileStore::in_memory();
    store
        .save_settings(SettingsPatch {
            save_history: Some(false),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert_eq!(
        store.add_history(visit("https://a.com", 0)).unwrap(),
        HistoryOutcome::Disabled
    );
    assert!(store.get_history().unwrap().is_empty());
}

#[test]
fn test_clear_history() {
    let mut store = JsonFileStore::in_memory();
    store.add_history(visit("https://a.com", 0)).unwrap();
    store.clear_history().unwrap();
    assert!(store.get_history().unwrap().is_empty());
}

#[test]
fn test_download_retention_and_replacement() {
    let mut store = JsonFileStore::in_memory();
    for i in 0..(DOWNLOAD_RETENTION + 5) {
        store.record_download(download(&format!("d{}", i))).unwrap();
    }
    let downloads = store.get_downloads().unwrap();
    assert_eq!(downloads.len(), DOWNLOAD_RETENTION);
    assert_eq!(downloads[0].id, format!("d{}", DOWNLOAD_RETENTION + 4));

    store.record_download(download("d50")).unwrap();
    let downloads = store.get_downloads().unwrap();
    assert_eq!(downloads.len(), DOWNLOAD_RETENTION);
    assert_eq!(downloads[0].id, "d50");
    assert_eq!(downloads.iter().filter(|d| d.id == "d50").count(), 1);
}

#[test]
fn test_settings_merge_touches_only_given_fields() {
    let mut store = JsonFileStore::in_memory();
    let before = store.get_settings().unwrap();
    let after = store
        .save_settings(SettingsPatch {
            search_engine: Some("google".into()),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert_eq!(after.search_engine, "google");
    assert_eq!(after.theme, before.theme);
    assert_eq!(after.download_path, before.download_path);
    assert_eq!(after.save_history, before.save_history);
}

#[test]
fn test_in_memory_store_has_no_path() {
    let store = JsonFileStore::in_memory();
    assert!(store.path().is_none());
    assert!(store.flush().is_ok());
    assert_eq!(store.data(), &BrowserData::default());
}
