use std::fmt;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug, PartialEq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(String),
    /// There is no active tab to run the command against.
    NoActiveTab,
    /// The tab exists but its content surface is gone.
    SurfaceMissing(String),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::NoActiveTab => write!(f, "No active tab"),
            TabError::SurfaceMissing(id) => write!(f, "Content surface missing: {}", id),
        }
    }
}

impl std::error::Error for TabError {}

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug, PartialEq)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// A bookmark with the same URL already exists.
    DuplicateUrl(String),
    /// The address cannot be bookmarked (empty or an internal page).
    InvalidUrl(String),
    /// The underlying store failed.
    Store(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::DuplicateUrl(url) => write!(f, "Bookmark already exists: {}", url),
            BookmarkError::InvalidUrl(url) => write!(f, "Cannot bookmark address: {}", url),
            BookmarkError::Store(msg) => write!(f, "Bookmark store error: {}", msg),
        }
    }
}

impl std::error::Error for BookmarkError {}

// === DownloadError ===

/// Errors related to download tracking.
#[derive(Debug, PartialEq)]
pub enum DownloadError {
    /// Download with the given ID was not found.
    NotFound(String),
    /// A download with the given ID is already tracked.
    AlreadyExists(String),
    /// The download already reached a terminal state.
    AlreadyFinished(String),
    /// The requested state is not a valid target for this operation.
    InvalidTransition { id: String, from: String, to: String },
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::NotFound(id) => write!(f, "Download not found: {}", id),
            DownloadError::AlreadyExists(id) => write!(f, "Download already exists: {}", id),
            DownloadError::AlreadyFinished(id) => write!(f, "Download already finished: {}", id),
            DownloadError::InvalidTransition { id, from, to } => {
                write!(f, "Invalid download transition for {}: {} -> {}", id, from, to)
            }
        }
    }
}

impl std::error::Error for DownloadError {}

// === StoreError ===

/// Errors raised by a persistence store backend.
#[derive(Debug, PartialEq)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io(String),
    /// The stored data could not be (de)serialized.
    Serialization(String),
    /// A database statement failed.
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Store I/O error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Store serialization error: {}", msg),
            StoreError::Database(msg) => write!(f, "Store database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === ConfigError ===

/// Errors raised while reading shell configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The requested store backend is not known.
    UnknownBackend(String),
    /// An environment variable holds a value that cannot be parsed.
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownBackend(name) => write!(f, "Unknown store backend: {}", name),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
