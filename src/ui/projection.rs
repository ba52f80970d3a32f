//! Projection of tab state onto the browser chrome.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::managers::tab_registry::{RegistryChange, TabField, TabRegistryTrait};
use crate::types::tab::{address_bar_text, display_title};
use crate::types::ui::UiUpdate;

/// Receives chrome updates in the order they must be applied.
pub trait Projection: Send {
    fn apply(&mut self, update: UiUpdate);
}

/// Projection that queues updates for someone else to deliver or inspect.
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct UiQueue {
    inner: Arc<Mutex<Vec<UiUpdate>>>,
}

impl UiQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poisoning is ignored; the queue holds plain data.
    fn lock(&self) -> MutexGuard<'_, Vec<UiUpdate>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Removes and returns the queued updates.
    pub fn drain(&self) -> Vec<UiUpdate> {
        std::mem::take(&mut *self.lock())
    }

    pub fn snapshot(&self) -> Vec<UiUpdate> {
        self.lock().clone()
    }
}

impl Projection for UiQueue {
    fn apply(&mut self, update: UiUpdate) {
        self.lock().push(update);
    }
}

/// Maps drained registry changes to chrome updates.
///
/// Activation refreshes everything that follows the active tab: address bar,
/// navigation buttons, bookmark star and loading indicator. `is_bookmarked`
/// answers the bookmark lookup for the newly active address.
pub fn project_changes<R>(
    registry: &R,
    changes: Vec<RegistryChange>,
    is_bookmarked: &dyn Fn(&str) -> bool,
) -> Vec<UiUpdate>
where
    R: TabRegistryTrait + ?Sized,
{
    let mut updates = Vec::new();
    for change in changes {
        match change {
            RegistryChange::TabCreated { tab, index } => {
                let title = registry
                    .get_tab(tab)
                    .map(|t| display_title(&t.title).to_string())
                    .unwrap_or_default();
                updates.push(UiUpdate::TabAdded { tab, index, title });
            }
            RegistryChange::TabClosed { tab } => {
                updates.push(UiUpdate::TabRemoved { tab });
            }
            RegistryChange::TabMoved { tab, index } => {
                updates.push(UiUpdate::TabMoved { tab, index });
            }
            RegistryChange::ActiveChanged { previous, current } => {
                if let Some(previous) = previous.filter(|id| registry.get_tab(*id).is_some()) {
                    updates.push(UiUpdate::TabDeactivated { tab: previous });
                }
                let Some(tab) = current.and_then(|id| registry.get_tab(id)) else {
                    continue;
                };
                updates.push(UiUpdate::TabActivated { tab: tab.id });
                updates.push(UiUpdate::AddressBar {
                    text: address_bar_text(&tab.url).to_string(),
                });
                updates.push(UiUpdate::NavigationButtons {
                    can_go_back: tab.can_go_back,
                    can_go_forward: tab.can_go_forward,
                });
                updates.push(UiUpdate::BookmarkIndicator {
                    bookmarked: is_bookmarked(&tab.url),
                });
                updates.push(UiUpdate::LoadingIndicator {
                    visible: tab.loading,
                });
            }
            RegistryChange::TabUpdated { tab, field } => {
                let Some(record) = registry.get_tab(tab) else {
                    continue;
                };
                match field {
                    TabField::Title => updates.push(UiUpdate::TabTitle {
                        tab,
                        title: display_title(&record.title).to_string(),
                    }),
                    TabField::Favicon => {
                        if let Some(favicon) = &record.favicon {
                            updates.push(UiUpdate::TabFavicon {
                                tab,
                                favicon: favicon.clone(),
                            });
                        }
                    }
                    TabField::Loading => updates.push(UiUpdate::TabLoading {
                        tab,
                        loading: record.loading,
                    }),
                    // Address bar and buttons follow the active tab only; the
                    // reconciler and navigation commands emit those.
                    TabField::Url | TabField::NavigationState => {}
                }
            }
        }
    }
    updates
}
