//! Surface Event Reconciler.
//!
//! Applies one content-surface lifecycle event to the tab registry and says
//! what the chrome and the app must do about it. The tab is always found
//! through the binding table; an event from a surface that no longer has a
//! bound tab is dropped without touching anything.
//!
//! Tab-strip updates (title, favicon, loading) come from the registry's own
//! change notifications. The reconciler only reports chrome updates that
//! depend on whether the tab is active, plus follow-up [`Effect`]s.

use tracing::debug;

use crate::managers::tab_registry::TabRegistryTrait;
use crate::services::navigation_resolver;
use crate::surface::ContentSurface;
use crate::types::settings::SearchEngine;
use crate::types::surface::{ContextMenu, ContextMenuParams, SurfaceEvent, SurfaceId, LOAD_ABORTED};
use crate::types::tab::{address_bar_text, is_error_page_url, is_placeholder_url, TabId, UNTITLED};
use crate::types::ui::{UiUpdate, STATUS_LOADING, STATUS_READY};

/// Follow-up work the reconciler cannot do itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Record a history visit; the caller stamps the visit time.
    RecordHistory {
        title: String,
        url: String,
        favicon: Option<String>,
    },
    /// Load `url` into the surface that reported the failure.
    LoadErrorPage { surface: SurfaceId, url: String },
    /// Open `url` in a new active tab.
    OpenTab { url: String },
    /// Refresh the bookmark star for `url` (active tab only).
    RefreshBookmarkIndicator { url: String },
}

/// Result of reconciling one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Tab the event was applied to; `None` when the event was stale.
    pub tab: Option<TabId>,
    pub updates: Vec<UiUpdate>,
    pub effects: Vec<Effect>,
}

impl Reconciliation {
    pub fn is_stale(&self) -> bool {
        self.tab.is_none()
    }
}

/// Reconciles surface events for one browsing session.
pub struct SurfaceReconciler {
    private_mode: bool,
    search_engine: SearchEngine,
}

impl SurfaceReconciler {
    pub fn new(private_mode: bool, search_engine: SearchEngine) -> Self {
        Self {
            private_mode,
            search_engine,
        }
    }

    pub fn private_mode(&self) -> bool {
        self.private_mode
    }

    pub fn set_search_engine(&mut self, engine: SearchEngine) {
        self.search_engine = engine;
    }

    /// Applies `event` from `surface_id` to the registry.
    ///
    /// `surface` is the live surface bound to that id, when there is one; it is
    /// only read, for back/forward capability.
    pub fn reconcile<R>(
        &self,
        registry: &mut R,
        surface_id: SurfaceId,
        surface: Option<&dyn ContentSurface>,
        event: SurfaceEvent,
    ) -> Reconciliation
    where
        R: TabRegistryTrait + ?Sized,
    {
        let tab_id = match registry.tab_for_surface(surface_id) {
            Some(tab_id) if registry.is_bound(tab_id, surface_id) => tab_id,
            _ => {
                debug!(surface = %surface_id, event = event.kind(), "dropping event from unbound surface");
                return Reconciliation::default();
            }
        };

        debug!(surface = %surface_id, tab = %tab_id, event = event.kind(), "surface event");
        let active = registry.active_tab_id() == Some(tab_id);
        let mut out = Reconciliation {
            tab: Some(tab_id),
            ..Reconciliation::default()
        };

        match event {
            SurfaceEvent::LoadStart => {
                registry.set_loading(tab_id, true);
                if active {
                    out.updates.push(UiUpdate::LoadingIndicator { visible: true });
                    out.updates.push(UiUpdate::Status {
                        text: STATUS_LOADING.to_string(),
                    });
                }
            }
            SurfaceEvent::LoadStop => {
                registry.set_loading(tab_id, false);
                let (back, forward) = Self::navigation_state(registry, tab_id, surface);
                registry.set_navigation_state(tab_id, back, forward);
                if active {
                    out.updates.push(UiUpdate::LoadingIndicator { visible: false });
                    out.updates.push(UiUpdate::Status {
                        text: STATUS_READY.to_string(),
                    });
                    out.updates.push(UiUpdate::NavigationButtons {
                        can_go_back: back,
                        can_go_forward: forward,
                    });
                }
                if let Some(tab) = registry.get_tab(tab_id) {
                    if !self.private_mode && !is_placeholder_url(&tab.url) && !is_error_page_url(&tab.url) {
                        let title = if tab.title.is_empty() {
                            UNTITLED.to_string()
                        } else {
                            tab.title.clone()
                        };
                        out.effects.push(Effect::RecordHistory {
                            title,
                            url: tab.url.clone(),
                            favicon: tab.favicon.clone(),
                        });
                    }
                }
            }
            SurfaceEvent::TitleUpdated { title } => {
                registry.set_title(tab_id, &title);
            }
            SurfaceEvent::FaviconUpdated { favicons } => {
                if let Some(first) = favicons.first() {
                    registry.set_favicon(tab_id, first);
                }
            }
            SurfaceEvent::Navigated { url } => {
                registry.set_url(tab_id, &url);
                let (back, forward) = Self::navigation_state(registry, tab_id, surface);
                registry.set_navigation_state(tab_id, back, forward);
                if active {
                    out.updates.push(UiUpdate::AddressBar {
                        text: address_bar_text(&url).to_string(),
                    });
                    out.updates.push(UiUpdate::NavigationButtons {
                        can_go_back: back,
                        can_go_forward: forward,
                    });
                    out.effects.push(Effect::RefreshBookmarkIndicator { url });
                }
            }
            SurfaceEvent::NavigatedInPage { url, is_main_frame } => {
                if is_main_frame {
                    registry.set_url(tab_id, &url);
                    if active {
                        out.updates.push(UiUpdate::AddressBar {
                            text: address_bar_text(&url).to_string(),
                        });
                    }
                }
            }
            SurfaceEvent::TargetUrlUpdated { url } => {
                if active {
                    let text = if url.is_empty() {
                        STATUS_READY.to_string()
                    } else {
                        url
                    };
                    out.updates.push(UiUpdate::Status { text });
                }
            }
            SurfaceEvent::LoadFailed { url, code } => {
                if code == LOAD_ABORTED || is_placeholder_url(&url) || is_error_page_url(&url) {
                    debug!(surface = %surface_id, code, "ignoring load failure");
                } else {
                    out.effects.push(Effect::LoadErrorPage {
                        surface: surface_id,
                        url: navigation_resolver::error_page_url(&url, code),
                    });
                }
            }
            SurfaceEvent::NewWindowRequested { url } => {
                out.effects.push(Effect::OpenTab { url });
            }
            SurfaceEvent::ContextMenuRequested { params } => {
                let (back, forward) = Self::navigation_state(registry, tab_id, surface);
                let menu = self.classify_context_menu(&params, back, forward);
                out.updates.push(UiUpdate::ContextMenu {
                    tab: tab_id,
                    x: params.x,
                    y: params.y,
                    menu,
                });
            }
        }

        out
    }

    /// Picks the menu kind: editable, then selection, image, link, page.
    pub fn classify_context_menu(
        &self,
        params: &ContextMenuParams,
        can_go_back: bool,
        can_go_forward: bool,
    ) -> ContextMenu {
        if params.is_editable {
            ContextMenu::Editable {
                has_selection: !params.selection_text.is_empty(),
            }
        } else if !params.selection_text.is_empty() {
            ContextMenu::Selection {
                text: params.selection_text.clone(),
                search_url: navigation_resolver::search_url(&params.selection_text, self.search_engine),
            }
        } else if !params.src_url.is_empty() && params.media_type == "image" {
            ContextMenu::Image {
                src_url: params.src_url.clone(),
            }
        } else if !params.link_url.is_empty() {
            let text = if params.link_text.is_empty() {
                params.link_url.clone()
            } else {
                params.link_text.clone()
            };
            ContextMenu::Link {
                url: params.link_url.clone(),
                text,
            }
        } else {
            ContextMenu::Page {
                can_go_back,
                can_go_forward,
            }
        }
    }

    /// Back/forward capability: the surface knows best; the tab record is the fallback.
    fn navigation_state<R>(registry: &R, tab_id: TabId, surface: Option<&dyn ContentSurface>) -> (bool, bool)
    where
        R: TabRegistryTrait + ?Sized,
    {
        match surface {
            Some(surface) => (surface.can_go_back(), surface.can_go_forward()),
            None => registry
                .get_tab(tab_id)
                .map(|t| (t.can_go_back, t.can_go_forward))
                .unwrap_or((false, false)),
        }
    }
}
