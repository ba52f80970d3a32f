use std::fmt;

use serde::{Deserialize, Serialize};

/// Error code a surface reports when the user aborted a load.
pub const LOAD_ABORTED: i32 = -3;

/// Identity of a content surface. Allocated together with its tab, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Lifecycle events a content surface emits while it lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SurfaceEvent {
    LoadStart,
    LoadStop,
    TitleUpdated {
        title: String,
    },
    FaviconUpdated {
        #[serde(default)]
        favicons: Vec<String>,
    },
    Navigated {
        url: String,
    },
    NavigatedInPage {
        url: String,
        #[serde(default = "main_frame")]
        is_main_frame: bool,
    },
    TargetUrlUpdated {
        #[serde(default)]
        url: String,
    },
    LoadFailed {
        url: String,
        code: i32,
    },
    NewWindowRequested {
        url: String,
    },
    ContextMenuRequested {
        #[serde(default)]
        params: ContextMenuParams,
    },
}

fn main_frame() -> bool {
    true
}

impl SurfaceEvent {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            SurfaceEvent::LoadStart => "load-start",
            SurfaceEvent::LoadStop => "load-stop",
            SurfaceEvent::TitleUpdated { .. } => "title-updated",
            SurfaceEvent::FaviconUpdated { .. } => "favicon-updated",
            SurfaceEvent::Navigated { .. } => "navigated",
            SurfaceEvent::NavigatedInPage { .. } => "navigated-in-page",
            SurfaceEvent::TargetUrlUpdated { .. } => "target-url-updated",
            SurfaceEvent::LoadFailed { .. } => "load-failed",
            SurfaceEvent::NewWindowRequested { .. } => "new-window-requested",
            SurfaceEvent::ContextMenuRequested { .. } => "context-menu-requested",
        }
    }
}

/// What was under the pointer when a context menu was requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContextMenuParams {
    pub x: i32,
    pub y: i32,
    pub is_editable: bool,
    pub selection_text: String,
    pub src_url: String,
    pub media_type: String,
    pub link_url: String,
    pub link_text: String,
}

/// Classified context menu handed to the menu-construction collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextMenu {
    Editable { has_selection: bool },
    Selection { text: String, search_url: String },
    Image { src_url: String },
    Link { url: String, text: String },
    Page { can_go_back: bool, can_go_forward: bool },
}
