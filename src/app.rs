//! App Core for AIBrowser.
//!
//! Composition root: owns the tab registry, the live content surfaces, the
//! persistence store, the download list and the projection sink. Every user
//! command and every surface event is one synchronous method call here.
//!
//! Store failures never abort an operation. They are logged and the
//! in-memory state stays authoritative.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::services::autocomplete::{self, Suggestion};
use crate::services::navigation_resolver;
use crate::services::surface_reconciler::{Effect, SurfaceReconciler};
use crate::store::PersistenceStore;
use crate::surface::{ContentSurface, SurfaceFactory, SurfaceState};
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::download::{DownloadItem, DownloadState};
use crate::types::errors::{BookmarkError, DownloadError, StoreError, TabError};
use crate::types::history::{HistoryEntry, HistoryOutcome, NewHistoryEntry};
use crate::types::settings::{BrowserSettings, SettingsPatch};
use crate::types::surface::{SurfaceEvent, SurfaceId};
use crate::types::tab::{address_bar_text, is_error_page_url, is_placeholder_url, Tab, TabId, NEW_TAB_URL, UNTITLED};
use crate::types::ui::UiUpdate;
use crate::ui::projection::{project_changes, Projection};

/// Zoom step applied by `zoom_in` / `zoom_out`.
pub const ZOOM_STEP: f64 = 1.0;

/// Central application struct.
pub struct App {
    registry: TabRegistry,
    surfaces: HashMap<SurfaceId, Box<dyn ContentSurface>>,
    factory: Box<dyn SurfaceFactory>,
    store: Box<dyn PersistenceStore>,
    downloads: DownloadManager,
    settings: BrowserSettings,
    reconciler: SurfaceReconciler,
    projection: Box<dyn Projection>,
}

impl App {
    /// Creates the app and opens the first tab.
    pub fn new(
        store: Box<dyn PersistenceStore>,
        factory: Box<dyn SurfaceFactory>,
        projection: Box<dyn Projection>,
        private_mode: bool,
    ) -> Self {
        let settings = store.get_settings().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load settings; using defaults");
            BrowserSettings::default()
        });
        let stored_downloads = store.get_downloads().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load downloads");
            Vec::new()
        });

        let mut app = Self {
            registry: TabRegistry::new(),
            surfaces: HashMap::new(),
            factory,
            store,
            downloads: DownloadManager::with_history(stored_downloads),
            reconciler: SurfaceReconciler::new(private_mode, settings.search_engine()),
            settings,
            projection,
        };
        info!(private_mode, engine = app.settings.search_engine().key(), "browser session started");
        app.create_tab(None);
        app
    }

    /// Opens the configured store and creates the app.
    pub fn from_config(
        config: &ShellConfig,
        factory: Box<dyn SurfaceFactory>,
        projection: Box<dyn Projection>,
    ) -> Result<Self, StoreError> {
        let store = config.open_store()?;
        Ok(Self::new(store, factory, projection, config.private_mode))
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    // ─── Projection ───

    fn emit(&mut self, update: UiUpdate) {
        self.projection.apply(update);
    }

    fn is_bookmarked(&self, url: &str) -> bool {
        lookup_bookmark(self.store.as_ref(), url)
    }

    /// Projects pending registry changes onto the chrome.
    fn flush_changes(&mut self) {
        let changes = self.registry.take_changes();
        if changes.is_empty() {
            return;
        }
        let store = self.store.as_ref();
        let updates = project_changes(&self.registry, changes, &|url: &str| lookup_bookmark(store, url));
        for update in updates {
            self.projection.apply(update);
        }
    }

    fn refresh_bookmark_indicator(&mut self) {
        if let Some(url) = self.registry.active_tab().map(|t| t.url.clone()) {
            let bookmarked = self.is_bookmarked(&url);
            self.emit(UiUpdate::BookmarkIndicator { bookmarked });
        }
    }

    // ─── Tabs ───

    /// Opens a new active tab showing `url`, or the new-tab page.
    pub fn create_tab(&mut self, url: Option<&str>) -> TabId {
        let tab_id = self.registry.create_tab(url, true);
        self.attach_surface(tab_id);
        self.flush_changes();
        tab_id
    }

    fn attach_surface(&mut self, tab_id: TabId) {
        let (Some(surface_id), Some(url)) = (
            self.registry.surface_for_tab(tab_id),
            self.registry.get_tab(tab_id).map(|t| t.url.clone()),
        ) else {
            return;
        };
        let surface = self.factory.create_surface(surface_id, &url);
        debug!(tab = %tab_id, surface = %surface_id, url = %url, "surface attached");
        self.surfaces.insert(surface_id, surface);
    }

    pub fn switch_tab(&mut self, tab_id: TabId) -> Result<(), TabError> {
        if self.registry.get_tab(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        self.registry.switch_active(tab_id);
        self.flush_changes();
        Ok(())
    }

    /// Closes a tab and tears down its surface. Closing the last tab opens a
    /// fresh new-tab page in its place.
    pub fn close_tab(&mut self, tab_id: TabId) -> Result<(), TabError> {
        let closed = self
            .registry
            .close_tab(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        if let Some(mut surface) = self.surfaces.remove(&closed.surface) {
            surface.stop();
        }
        debug!(tab = %closed.tab, surface = %closed.surface, "tab closed");

        if let Some(replacement) = closed.replacement {
            self.attach_surface(replacement);
        }
        self.flush_changes();
        Ok(())
    }

    pub fn close_active_tab(&mut self) -> Result<(), TabError> {
        let tab_id = self.registry.active_tab_id().ok_or(TabError::NoActiveTab)?;
        self.close_tab(tab_id)
    }

    /// Drops `dragged` onto `target`'s slot. Returns whether anything moved.
    pub fn reorder_tabs(&mut self, dragged: TabId, target: TabId) -> bool {
        let moved = self.registry.reorder(dragged, target);
        self.flush_changes();
        moved
    }

    pub fn tabs(&self) -> &[Tab] {
        self.registry.tabs()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.registry.active_tab()
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn surface(&self, surface_id: SurfaceId) -> Option<&dyn ContentSurface> {
        self.surfaces.get(&surface_id).map(|s| s.as_ref())
    }

    pub fn private_mode(&self) -> bool {
        self.reconciler.private_mode()
    }

    // ─── Navigation ───

    fn active_surface_mut(&mut self) -> Result<(TabId, &mut Box<dyn ContentSurface>), TabError> {
        let tab_id = self.registry.active_tab_id().ok_or(TabError::NoActiveTab)?;
        let surface_id = self
            .registry
            .surface_for_tab(tab_id)
            .ok_or_else(|| TabError::SurfaceMissing(tab_id.to_string()))?;
        let surface = self
            .surfaces
            .get_mut(&surface_id)
            .ok_or_else(|| TabError::SurfaceMissing(tab_id.to_string()))?;
        Ok((tab_id, surface))
    }

    /// Resolves address-bar input and loads it in the active tab.
    ///
    /// Returns the address loaded, or `None` when the input was blank.
    pub fn navigate(&mut self, input: &str) -> Result<Option<String>, TabError> {
        let Some(url) = navigation_resolver::resolve(input, self.settings.search_engine()) else {
            return Ok(None);
        };
        self.load_in_active(&url)?;
        Ok(Some(url))
    }

    /// Loads the new-tab page in the active tab.
    pub fn go_home(&mut self) -> Result<(), TabError> {
        self.load_in_active(NEW_TAB_URL)
    }

    fn load_in_active(&mut self, url: &str) -> Result<(), TabError> {
        let (tab_id, surface) = self.active_surface_mut()?;
        surface.load(url);
        debug!(tab = %tab_id, url, "loading");
        self.registry.set_url(tab_id, url);
        self.emit(UiUpdate::AddressBar {
            text: address_bar_text(url).to_string(),
        });
        self.flush_changes();
        Ok(())
    }

    pub fn go_back(&mut self) -> Result<(), TabError> {
        let (_, surface) = self.active_surface_mut()?;
        if surface.can_go_back() {
            surface.go_back();
        }
        Ok(())
    }

    pub fn go_forward(&mut self) -> Result<(), TabError> {
        let (_, surface) = self.active_surface_mut()?;
        if surface.can_go_forward() {
            surface.go_forward();
        }
        Ok(())
    }

    pub fn reload(&mut self) -> Result<(), TabError> {
        self.active_surface_mut()?.1.reload();
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), TabError> {
        self.active_surface_mut()?.1.stop();
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<f64, TabError> {
        self.adjust_zoom(|level| level + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> Result<f64, TabError> {
        self.adjust_zoom(|level| level - ZOOM_STEP)
    }

    pub fn zoom_reset(&mut self) -> Result<f64, TabError> {
        self.adjust_zoom(|_| 0.0)
    }

    fn adjust_zoom<F>(&mut self, next: F) -> Result<f64, TabError>
    where
        F: FnOnce(f64) -> f64,
    {
        let (_, surface) = self.active_surface_mut()?;
        let level = next(surface.zoom());
        surface.set_zoom(level);
        Ok(level)
    }

    // ─── Surface events ───

    /// Applies a navigation-state snapshot reported by a remote surface.
    pub fn apply_surface_state(&mut self, surface_id: SurfaceId, state: &SurfaceState) -> bool {
        match self.surfaces.get_mut(&surface_id) {
            Some(surface) => {
                surface.apply_state(state);
                true
            }
            None => false,
        }
    }

    /// Reconciles one lifecycle event. Returns false when the event came from
    /// a surface that is no longer bound to a tab.
    pub fn handle_surface_event(&mut self, surface_id: SurfaceId, event: SurfaceEvent) -> bool {
        let surface = self.surfaces.get(&surface_id).map(|s| s.as_ref());
        let outcome = self
            .reconciler
            .reconcile(&mut self.registry, surface_id, surface, event);
        if outcome.is_stale() {
            return false;
        }

        self.flush_changes();
        for update in outcome.updates {
            self.emit(update);
        }
        for effect in outcome.effects {
            self.run_effect(effect);
        }
        true
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RecordHistory { title, url, favicon } => {
                let entry = NewHistoryEntry {
                    url,
                    title,
                    favicon,
                    visited_at: Self::now(),
                };
                match self.store.add_history(entry) {
                    Ok(HistoryOutcome::Recorded(entry)) => debug!(url = %entry.url, "history recorded"),
                    Ok(outcome) => debug!(?outcome, "history not recorded"),
                    Err(e) => warn!(error = %e, "failed to record history"),
                }
            }
            Effect::LoadErrorPage { surface, url } => {
                if let Some(target) = self.surfaces.get_mut(&surface) {
                    debug!(surface = %surface, url = %url, "showing error page");
                    target.load(&url);
                }
            }
            Effect::OpenTab { url } => {
                self.create_tab(Some(&url));
            }
            Effect::RefreshBookmarkIndicator { url } => {
                let bookmarked = self.is_bookmarked(&url);
                self.emit(UiUpdate::BookmarkIndicator { bookmarked });
            }
        }
    }

    // ─── Bookmarks ───

    /// Bookmarks `url`. Empty titles are stored as "Untitled".
    pub fn add_bookmark(&mut self, title: &str, url: &str) -> Result<Bookmark, BookmarkError> {
        let url = url.trim();
        if url.is_empty() || is_placeholder_url(url) || is_error_page_url(url) {
            return Err(BookmarkError::InvalidUrl(url.to_string()));
        }
        let title = if title.trim().is_empty() { UNTITLED } else { title };
        let favicon = self
            .registry
            .tabs()
            .iter()
            .find(|t| t.url == url)
            .and_then(|t| t.favicon.clone());

        let bookmark = self.store.add_bookmark(NewBookmark {
            url: url.to_string(),
            title: title.to_string(),
            favicon,
        })?;
        debug!(url = %bookmark.url, "bookmark added");
        self.refresh_bookmark_indicator();
        Ok(bookmark)
    }

    /// Adds or removes a bookmark for the active tab's address.
    ///
    /// Returns `Ok(None)` when the active tab shows a built-in page, otherwise
    /// whether the address is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self) -> Result<Option<bool>, BookmarkError> {
        let Some(tab) = self.registry.active_tab() else {
            return Ok(None);
        };
        if is_placeholder_url(&tab.url) || is_error_page_url(&tab.url) {
            return Ok(None);
        }
        let (url, title) = (tab.url.clone(), tab.title.clone());

        let existing = self
            .store
            .get_bookmarks()
            .map_err(|e| BookmarkError::Store(e.to_string()))?
            .into_iter()
            .find(|b| b.url == url);

        match existing {
            Some(bookmark) => {
                self.remove_bookmark(&bookmark.id)?;
                Ok(Some(false))
            }
            None => {
                self.add_bookmark(&title, &url)?;
                Ok(Some(true))
            }
        }
    }

    pub fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError> {
        let removed = self
            .store
            .remove_bookmark(id)
            .map_err(|e| BookmarkError::Store(e.to_string()))?;
        if !removed {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        self.refresh_bookmark_indicator();
        Ok(())
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.store.get_bookmarks().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read bookmarks");
            Vec::new()
        })
    }

    // ─── History ───

    /// History, most recent first, optionally filtered by title/url substring.
    pub fn history(&self, filter: &str) -> Vec<HistoryEntry> {
        let history = self.store.get_history().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read history");
            Vec::new()
        });
        autocomplete::filter_history(history, filter)
    }

    pub fn clear_history(&mut self) {
        if let Err(e) = self.store.clear_history() {
            warn!(error = %e, "failed to clear history");
        }
    }

    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        if query.trim().chars().count() < autocomplete::MIN_QUERY_CHARS {
            return Vec::new();
        }
        autocomplete::suggest(query, &self.bookmarks(), &self.history(""))
    }

    // ─── Settings ───

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Merges `patch` into the settings and persists them.
    pub fn save_settings(&mut self, patch: SettingsPatch) -> BrowserSettings {
        match self.store.save_settings(patch.clone()) {
            Ok(saved) => self.settings = saved,
            Err(e) => {
                warn!(error = %e, "failed to save settings; keeping them for this session");
                self.settings.merge(patch);
            }
        }
        self.reconciler.set_search_engine(self.settings.search_engine());
        self.settings.clone()
    }

    // ─── Downloads ───

    pub fn downloads(&self) -> &[DownloadItem] {
        self.downloads.list()
    }

    fn emit_download_badge(&mut self) {
        let active = self.downloads.active_count();
        self.emit(UiUpdate::DownloadBadge { active });
    }

    /// Registers a download the front end will start later.
    pub fn download_queued(
        &mut self,
        id: &str,
        url: &str,
        filename: &str,
        save_path: &str,
    ) -> Result<DownloadItem, DownloadError> {
        Ok(self.downloads.enqueue(id, url, filename, save_path)?.clone())
    }

    pub fn download_started(
        &mut self,
        id: &str,
        url: &str,
        filename: &str,
        save_path: &str,
        total_bytes: Option<u64>,
    ) -> Result<DownloadItem, DownloadError> {
        let item = self
            .downloads
            .start(id, url, filename, save_path, total_bytes)?
            .clone();
        self.emit_download_badge();
        Ok(item)
    }

    pub fn download_progress(
        &mut self,
        id: &str,
        received_bytes: u64,
        total_bytes: Option<u64>,
    ) -> Result<DownloadItem, DownloadError> {
        Ok(self.downloads.progress(id, received_bytes, total_bytes)?.clone())
    }

    /// Finishes a download and records it in the store.
    pub fn download_done(&mut self, id: &str, state: DownloadState) -> Result<DownloadItem, DownloadError> {
        let item = self.downloads.finish(id, state)?;
        if let Err(e) = self.store.record_download(item.clone()) {
            warn!(error = %e, id, "failed to record download");
        }
        self.emit_download_badge();
        if state == DownloadState::Completed {
            self.emit(UiUpdate::Notification {
                message: format!("Download complete: {}", item.filename),
            });
        }
        Ok(item)
    }

    pub fn remove_download(&mut self, id: &str) -> Result<(), DownloadError> {
        if !self.downloads.remove(id) {
            return Err(DownloadError::NotFound(id.to_string()));
        }
        self.emit_download_badge();
        Ok(())
    }

    /// Drops finished downloads from the session list. Returns how many.
    pub fn clear_downloads(&mut self) -> usize {
        self.downloads.clear()
    }
}

fn lookup_bookmark(store: &dyn PersistenceStore, url: &str) -> bool {
    store.is_bookmarked(url).unwrap_or_else(|e| {
        warn!(error = %e, "bookmark lookup failed");
        false
    })
}
