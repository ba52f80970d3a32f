use serde::{Deserialize, Serialize};

use super::surface::ContextMenu;
use super::tab::TabId;

/// Status line text while the active tab is loading.
pub const STATUS_LOADING: &str = "Loading…";

/// Status line text when nothing is loading or hovered.
pub const STATUS_READY: &str = "Ready";

/// One change to the browser chrome, produced by the projection layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiUpdate {
    TabAdded { tab: TabId, index: usize, title: String },
    TabRemoved { tab: TabId },
    TabMoved { tab: TabId, index: usize },
    TabActivated { tab: TabId },
    TabDeactivated { tab: TabId },
    TabTitle { tab: TabId, title: String },
    TabFavicon { tab: TabId, favicon: String },
    TabLoading { tab: TabId, loading: bool },
    AddressBar { text: String },
    NavigationButtons { can_go_back: bool, can_go_forward: bool },
    BookmarkIndicator { bookmarked: bool },
    LoadingIndicator { visible: bool },
    Status { text: String },
    ContextMenu { tab: TabId, x: i32, y: i32, menu: ContextMenu },
    DownloadBadge { active: usize },
    Notification { message: String },
}
