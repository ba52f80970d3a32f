use std::fmt;

use serde::{Deserialize, Serialize};

/// Address of the built-in new-tab page.
pub const NEW_TAB_URL: &str = "about:newtab";

/// Prefix of the built-in error page that failed loads are redirected to.
pub const ERROR_PAGE_URL: &str = "about:error";

/// Title shown for a freshly created tab.
pub const DEFAULT_TAB_TITLE: &str = "New Tab";

/// Title used when a page reports an empty title.
pub const UNTITLED: &str = "Untitled";

/// Identity of a tab. Allocated from a creation-ordered counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Represents a browser tab with its current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub created_at: i64,
}

impl Tab {
    /// True while the tab shows the built-in new-tab page.
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_url(&self.url)
    }
}

/// Returns true for the new-tab page address (with or without a query/fragment).
pub fn is_placeholder_url(url: &str) -> bool {
    url.starts_with(NEW_TAB_URL)
}

/// Returns true for addresses of the built-in error page.
pub fn is_error_page_url(url: &str) -> bool {
    url.starts_with(ERROR_PAGE_URL)
}

/// Text the address bar shows for `url`: built-in pages show an empty bar.
pub fn address_bar_text(url: &str) -> &str {
    if is_placeholder_url(url) || is_error_page_url(url) {
        ""
    } else {
        url
    }
}

/// Label shown in the tab strip for a page title.
pub fn display_title(title: &str) -> &str {
    if title.is_empty() {
        UNTITLED
    } else {
        title
    }
}
