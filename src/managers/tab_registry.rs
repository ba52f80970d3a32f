//! Tab Registry for AIBrowser.
//!
//! Owns the ordered tab list, the active-tab identity and the binding table
//! between tabs and their content surfaces. The registry is plain data: it never
//! talks to a surface or the UI itself. Every mutation is recorded as a
//! [`RegistryChange`] which the projection layer drains with `take_changes()`.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::surface::SurfaceId;
use crate::types::tab::{Tab, TabId, DEFAULT_TAB_TITLE, NEW_TAB_URL};

/// Which part of a tab record changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabField {
    Url,
    Title,
    Favicon,
    Loading,
    NavigationState,
}

/// Change notification emitted by every registry mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChange {
    TabCreated { tab: TabId, index: usize },
    TabClosed { tab: TabId },
    TabMoved { tab: TabId, index: usize },
    ActiveChanged { previous: Option<TabId>, current: Option<TabId> },
    TabUpdated { tab: TabId, field: TabField },
}

/// What `close_tab` tore down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTab {
    pub tab: TabId,
    /// Surface that was bound to the closed tab; the caller must destroy it.
    pub surface: SurfaceId,
    pub index: usize,
    pub was_active: bool,
    /// Default tab created because the closed tab was the last one.
    pub replacement: Option<TabId>,
}

/// Trait defining the tab registry interface.
pub trait TabRegistryTrait {
    fn create_tab(&mut self, url: Option<&str>, make_active: bool) -> TabId;
    fn switch_active(&mut self, tab_id: TabId) -> bool;
    fn close_tab(&mut self, tab_id: TabId) -> Option<ClosedTab>;
    fn reorder(&mut self, dragged: TabId, target: TabId) -> bool;
    fn get_tab(&self, tab_id: TabId) -> Option<&Tab>;
    fn tabs(&self) -> &[Tab];
    fn active_tab(&self) -> Option<&Tab>;
    fn active_tab_id(&self) -> Option<TabId>;
    fn tab_count(&self) -> usize;
    fn index_of(&self, tab_id: TabId) -> Option<usize>;
    fn surface_for_tab(&self, tab_id: TabId) -> Option<SurfaceId>;
    fn tab_for_surface(&self, surface_id: SurfaceId) -> Option<TabId>;
    fn is_bound(&self, tab_id: TabId, surface_id: SurfaceId) -> bool;
    fn set_url(&mut self, tab_id: TabId, url: &str) -> bool;
    fn set_title(&mut self, tab_id: TabId, title: &str) -> bool;
    fn set_favicon(&mut self, tab_id: TabId, favicon: &str) -> bool;
    fn set_loading(&mut self, tab_id: TabId, loading: bool) -> bool;
    fn set_navigation_state(&mut self, tab_id: TabId, can_go_back: bool, can_go_forward: bool) -> bool;
    fn take_changes(&mut self) -> Vec<RegistryChange>;
}

/// In-memory tab registry.
pub struct TabRegistry {
    tabs: Vec<Tab>,
    bindings: HashMap<TabId, SurfaceId>,
    bound_tabs: HashMap<SurfaceId, TabId>,
    active_tab_id: Option<TabId>,
    next_tab_id: u64,
    next_surface_id: u64,
    changes: Vec<RegistryChange>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            bindings: HashMap::new(),
            bound_tabs: HashMap::new(),
            active_tab_id: None,
            next_tab_id: 1,
            next_surface_id: 1,
            changes: Vec::new(),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn find_tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    fn set_active(&mut self, tab_id: Option<TabId>) {
        let previous = self.active_tab_id;
        if previous == tab_id {
            return;
        }
        self.active_tab_id = tab_id;
        self.changes.push(RegistryChange::ActiveChanged {
            previous,
            current: tab_id,
        });
    }

    /// Applies `update` to the tab and records a change when it reports one.
    fn update_tab<F>(&mut self, tab_id: TabId, field: TabField, update: F) -> bool
    where
        F: FnOnce(&mut Tab) -> bool,
    {
        let changed = match self.find_tab_mut(tab_id) {
            Some(tab) => update(tab),
            None => return false,
        };
        if changed {
            self.changes.push(RegistryChange::TabUpdated { tab: tab_id, field });
        }
        true
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistryTrait for TabRegistry {
    /// Create a new tab bound to a fresh surface id.
    /// The tab becomes active when asked to, or when no tab is active yet.
    fn create_tab(&mut self, url: Option<&str>, make_active: bool) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        let surface = SurfaceId(self.next_surface_id);
        self.next_surface_id += 1;

        self.tabs.push(Tab {
            id,
            url: url.unwrap_or(NEW_TAB_URL).to_string(),
            title: DEFAULT_TAB_TITLE.to_string(),
            favicon: None,
            loading: false,
            can_go_back: false,
            can_go_forward: false,
            created_at: Self::now(),
        });
        self.bindings.insert(id, surface);
        self.bound_tabs.insert(surface, id);
        self.changes.push(RegistryChange::TabCreated {
            tab: id,
            index: self.tabs.len() - 1,
        });

        if make_active || self.active_tab_id.is_none() {
            self.set_active(Some(id));
        }
        id
    }

    /// Make `tab_id` the active tab. Unknown ids and the current tab are no-ops.
    fn switch_active(&mut self, tab_id: TabId) -> bool {
        if self.active_tab_id == Some(tab_id) || self.index_of(tab_id).is_none() {
            return false;
        }
        self.set_active(Some(tab_id));
        true
    }

    /// Close a tab and release its surface binding.
    ///
    /// When the active tab closes, the tab sliding into its slot (or the new
    /// last tab) becomes active. Closing the last tab creates a default one
    /// before returning, so callers never observe an empty registry.
    fn close_tab(&mut self, tab_id: TabId) -> Option<ClosedTab> {
        let index = self.index_of(tab_id)?;
        let surface = self.bindings.remove(&tab_id)?;
        self.bound_tabs.remove(&surface);
        self.tabs.remove(index);
        self.changes.push(RegistryChange::TabClosed { tab: tab_id });

        let was_active = self.active_tab_id == Some(tab_id);
        let mut replacement = None;

        // The closed tab no longer exists, so there is nothing to deactivate.
        if self.tabs.is_empty() {
            self.active_tab_id = None;
            replacement = Some(self.create_tab(None, true));
        } else if was_active {
            self.active_tab_id = None;
            let next = index.min(self.tabs.len() - 1);
            let next_id = self.tabs[next].id;
            self.set_active(Some(next_id));
        }

        Some(ClosedTab {
            tab: tab_id,
            surface,
            index,
            was_active,
            replacement,
        })
    }

    /// Move `dragged` into the slot currently held by `target`.
    fn reorder(&mut self, dragged: TabId, target: TabId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.index_of(dragged), self.index_of(target)) else {
            return false;
        };

        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.changes.push(RegistryChange::TabMoved {
            tab: dragged,
            index: to,
        });
        true
    }

    fn get_tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get_tab(id))
    }

    fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn index_of(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn surface_for_tab(&self, tab_id: TabId) -> Option<SurfaceId> {
        self.bindings.get(&tab_id).copied()
    }

    fn tab_for_surface(&self, surface_id: SurfaceId) -> Option<TabId> {
        self.bound_tabs.get(&surface_id).copied()
    }

    fn is_bound(&self, tab_id: TabId, surface_id: SurfaceId) -> bool {
        self.bindings.get(&tab_id) == Some(&surface_id)
    }

    fn set_url(&mut self, tab_id: TabId, url: &str) -> bool {
        self.update_tab(tab_id, TabField::Url, |tab| {
            if tab.url == url {
                return false;
            }
            tab.url = url.to_string();
            true
        })
    }

    fn set_title(&mut self, tab_id: TabId, title: &str) -> bool {
        self.update_tab(tab_id, TabField::Title, |tab| {
            if tab.title == title {
                return false;
            }
            tab.title = title.to_string();
            true
        })
    }

    fn set_favicon(&mut self, tab_id: TabId, favicon: &str) -> bool {
        self.update_tab(tab_id, TabField::Favicon, |tab| {
            if tab.favicon.as_deref() == Some(favicon) {
                return false;
            }
            tab.favicon = Some(favicon.to_string());
            true
        })
    }

    fn set_loading(&mut self, tab_id: TabId, loading: bool) -> bool {
        self.update_tab(tab_id, TabField::Loading, |tab| {
            if tab.loading == loading {
                return false;
            }
            tab.loading = loading;
            true
        })
    }

    fn set_navigation_state(&mut self, tab_id: TabId, can_go_back: bool, can_go_forward: bool) -> bool {
        self.update_tab(tab_id, TabField::NavigationState, |tab| {
            if tab.can_go_back == can_go_back && tab.can_go_forward == can_go_forward {
                return false;
            }
            tab.can_go_back = can_go_back;
            tab.can_go_forward = can_go_forward;
            true
        })
    }

    fn take_changes(&mut self) -> Vec<RegistryChange> {
        std::mem::take(&mut self.changes)
    }
}
