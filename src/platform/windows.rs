// AIBrowser platform paths for Windows
// Data:      %APPDATA%/AIBrowser
// Downloads: %USERPROFILE%/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the data directory for AIBrowser on Windows.
/// `%APPDATA%/AIBrowser`
pub fn get_data_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("AIBrowser")
}

/// `%USERPROFILE%/Downloads`
pub fn get_download_dir() -> PathBuf {
    let profile =
        env::var("USERPROFILE").unwrap_or_else(|_| String::from("C:\\Users\\Default"));
    PathBuf::from(profile).join("Downloads")
}
