//! Self-contained surface used by the demo binary and tests.
//!
//! Keeps its own back/forward list and records every command it receives.
//! It never emits events; callers feed those to the app themselves.

use crate::surface::{CommandQueue, ContentSurface, SurfaceCommand, SurfaceFactory};
use crate::types::surface::SurfaceId;

pub struct HeadlessSurface {
    id: SurfaceId,
    entries: Vec<String>,
    index: usize,
    zoom: f64,
    journal: CommandQueue,
}

impl HeadlessSurface {
    pub fn new(id: SurfaceId, url: &str, journal: CommandQueue) -> Self {
        journal.push(id, SurfaceCommand::Create { url: url.to_string() });
        Self {
            id,
            entries: vec![url.to_string()],
            index: 0,
            zoom: 0.0,
            journal,
        }
    }
}

impl ContentSurface for HeadlessSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load(&mut self, url: &str) {
        self.journal.push(self.id, SurfaceCommand::Load { url: url.to_string() });
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }

    fn go_back(&mut self) {
        self.journal.push(self.id, SurfaceCommand::GoBack);
        if self.index > 0 {
            self.index -= 1;
        }
    }

    fn go_forward(&mut self) {
        self.journal.push(self.id, SurfaceCommand::GoForward);
        if self.index + 1 < self.entries.len() {
            self.index += 1;
        }
    }

    fn reload(&mut self) {
        self.journal.push(self.id, SurfaceCommand::Reload);
    }

    fn stop(&mut self) {
        self.journal.push(self.id, SurfaceCommand::Stop);
    }

    fn set_zoom(&mut self, level: f64) {
        self.journal.push(self.id, SurfaceCommand::SetZoom { level });
        self.zoom = level;
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn url(&self) -> String {
        self.entries.get(self.index).cloned().unwrap_or_default()
    }

    fn can_go_back(&self) -> bool {
        self.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

impl Drop for HeadlessSurface {
    fn drop(&mut self) {
        self.journal.push(self.id, SurfaceCommand::Destroy);
    }
}

/// Factory handing out [`HeadlessSurface`]s that share one command journal.
#[derive(Default)]
pub struct HeadlessSurfaceFactory {
    journal: CommandQueue,
}

impl HeadlessSurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the journal every created surface writes to.
    pub fn journal(&self) -> CommandQueue {
        self.journal.clone()
    }
}

impl SurfaceFactory for HeadlessSurfaceFactory {
    fn create_surface(&mut self, id: SurfaceId, url: &str) -> Box<dyn ContentSurface> {
        Box::new(HeadlessSurface::new(id, url, self.journal.clone()))
    }
}
