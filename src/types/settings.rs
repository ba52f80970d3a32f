use serde::{Deserialize, Serialize};

use crate::platform;

/// User settings shared by the shell and the settings panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
    #[serde(default = "default_download_path")]
    pub download_path: String,
    #[serde(default = "default_true")]
    pub save_history: bool,
}

fn default_true() -> bool {
    true
}

fn default_search_engine() -> String {
    SearchEngine::DuckDuckGo.key().to_string()
}

fn default_download_path() -> String {
    platform::get_download_dir().to_string_lossy().to_string()
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            search_engine: default_search_engine(),
            download_path: default_download_path(),
            save_history: true,
        }
    }
}

impl BrowserSettings {
    /// The configured engine; unknown keys fall back to DuckDuckGo.
    pub fn search_engine(&self) -> SearchEngine {
        SearchEngine::from_key(&self.search_engine)
    }

    /// Overwrites only the fields present in `patch`.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(engine) = patch.search_engine {
            self.search_engine = engine;
        }
        if let Some(path) = patch.download_path {
            self.download_path = path;
        }
        if let Some(save) = patch.save_history {
            self.save_history = save;
        }
    }
}

/// Partial settings update, as sent by the settings panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_history: Option<bool>,
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Search engines the address bar can send queries to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    Google,
    Yandex,
    DuckDuckGo,
}

impl SearchEngine {
    pub fn from_key(key: &str) -> Self {
        match key {
            "google" => SearchEngine::Google,
            "yandex" => SearchEngine::Yandex,
            _ => SearchEngine::DuckDuckGo,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::Yandex => "yandex",
            SearchEngine::DuckDuckGo => "duckduckgo",
        }
    }

    /// Query URL prefix; the percent-encoded query is appended verbatim.
    pub fn query_url(self) -> &'static str {
        match self {
            SearchEngine::Google => "https://www.google.com/search?q=",
            SearchEngine::Yandex => "https://yandex.ru/search/?text=",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/?q=",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SearchEngine::Google => "Google",
            SearchEngine::Yandex => "Yandex",
            SearchEngine::DuckDuckGo => "DuckDuckGo",
        }
    }
}
