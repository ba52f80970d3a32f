use aibrowser::types::errors::*;

// === TabError Tests ===

#[test]
fn tab_error_not_found_display() {
    let err = TabError::NotFound("tab-123".to_string());
    assert_eq!(err.to_string(), "Tab not found: tab-123");
}

#[test]
fn tab_error_no_active_display() {
    assert_eq!(TabError::NoActiveTab.to_string(), "No active tab");
}

#[test]
fn tab_error_surface_missing_display() {
    let err = TabError::SurfaceMissing("tab-4".to_string());
    assert_eq!(err.to_string(), "Content surface missing: tab-4");
}

#[test]
fn tab_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(TabError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::NotFound("b1".to_string()).to_string(),
        "Bookmark not found: b1"
    );
    assert_eq!(
        BookmarkError::DuplicateUrl("https://a.com".to_string()).to_string(),
        "Bookmark already exists: https://a.com"
    );
    assert_eq!(
        BookmarkError::InvalidUrl("about:newtab".to_string()).to_string(),
        "Cannot bookmark address: about:newtab"
    );
    assert_eq!(
        BookmarkError::Store("disk full".to_string()).to_string(),
        "Bookmark store error: disk full"
    );
}

// === DownloadError Tests ===

#[test]
fn download_error_display_variants() {
    assert_eq!(
        DownloadError::NotFound("d1".to_string()).to_string(),
        "Download not found: d1"
    );
    assert_eq!(
        DownloadError::AlreadyExists("d1".to_string()).to_string(),
        "Download already exists: d1"
    );
    assert_eq!(
        DownloadError::AlreadyFinished("d1".to_string()).to_string(),
        "Download already finished: d1"
    );
    assert_eq!(
        DownloadError::InvalidTransition {
            id: "d1".to_string(),
            from: "in_progress".to_string(),
            to: "queued".to_string(),
        }
        .to_string(),
        "Invalid download transition for d1: in_progress -> queued"
    );
}

// === StoreError Tests ===

#[test]
fn store_error_display_variants() {
    assert_eq!(StoreError::Io("denied".to_string()).to_string(), "Store I/O error: denied");
    assert_eq!(
        StoreError::Serialization("eof".to_string()).to_string(),
        "Store serialization error: eof"
    );
    assert_eq!(
        StoreError::Database("locked".to_string()).to_string(),
        "Store database error: locked"
    );
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::UnknownBackend("redis".to_string()).to_string(),
        "Unknown store backend: redis"
    );
    assert_eq!(
        ConfigError::InvalidValue {
            key: "AIBROWSER_PRIVATE".to_string(),
            value: "maybe".to_string(),
        }
        .to_string(),
        "Invalid value for AIBROWSER_PRIVATE: maybe"
    );
}

#[test]
fn all_errors_box_into_dyn_error() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(TabError::NoActiveTab),
        Box::new(BookmarkError::NotFound("a".into())),
        Box::new(DownloadError::NotFound("a".into())),
        Box::new(StoreError::Io("a".into())),
        Box::new(ConfigError::UnknownBackend("a".into())),
    ];
    assert!(errors.iter().all(|e| !e.to_string().is_empty()));
}
