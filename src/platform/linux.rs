// AIBrowser platform paths for Linux
// Data:      ~/.local/share/aibrowser
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the data directory for AIBrowser on Linux.
/// Uses `$XDG_DATA_HOME/aibrowser` if set, otherwise `~/.local/share/aibrowser`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("aibrowser"),
        _ => home_dir().join(".local").join("share").join("aibrowser"),
    }
}

/// Returns the download directory on Linux.
/// Uses `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    match env::var("XDG_DOWNLOAD_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir().join("Downloads"),
    }
}
