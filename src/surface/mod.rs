//! Content surfaces.
//!
//! A content surface renders one tab's page. The core never renders anything
//! itself; it drives surfaces through [`ContentSurface`] and learns about
//! their progress through [`crate::types::surface::SurfaceEvent`]s.

pub mod headless;
pub mod remote;

pub use headless::{HeadlessSurface, HeadlessSurfaceFactory};
pub use remote::{RemoteSurface, RemoteSurfaceFactory};

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::types::surface::SurfaceId;

/// Rendering unit bound to exactly one tab.
pub trait ContentSurface: Send {
    fn id(&self) -> SurfaceId;
    fn load(&mut self, url: &str);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);
    fn set_zoom(&mut self, level: f64);
    fn zoom(&self) -> f64;
    fn url(&self) -> String;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;

    /// Accepts a state snapshot reported by whoever hosts the real surface.
    /// Surfaces that track their own state ignore it.
    fn apply_state(&mut self, _state: &SurfaceState) {}
}

/// Creates the surface for a newly created tab.
pub trait SurfaceFactory: Send {
    fn create_surface(&mut self, id: SurfaceId, url: &str) -> Box<dyn ContentSurface>;
}

/// Command sent to a surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Create { url: String },
    Load { url: String },
    GoBack,
    GoForward,
    Reload,
    Stop,
    SetZoom { level: f64 },
    Destroy,
}

/// Navigation state reported alongside a surface event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceState {
    pub url: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub zoom: Option<f64>,
}

/// Shared, ordered queue of commands issued to surfaces.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Arc<Mutex<Vec<(SurfaceId, SurfaceCommand)>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while the queue was held does not lose queued commands.
    fn lock(&self) -> MutexGuard<'_, Vec<(SurfaceId, SurfaceCommand)>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, surface: SurfaceId, command: SurfaceCommand) {
        self.lock().push((surface, command));
    }

    /// Removes and returns everything queued so far.
    pub fn drain(&self) -> Vec<(SurfaceId, SurfaceCommand)> {
        std::mem::take(&mut *self.lock())
    }

    pub fn snapshot(&self) -> Vec<(SurfaceId, SurfaceCommand)> {
        self.lock().clone()
    }

    /// Commands issued to one surface, in order.
    pub fn commands_for(&self, surface: SurfaceId) -> Vec<SurfaceCommand> {
        self.snapshot()
            .into_iter()
            .filter(|(id, _)| *id == surface)
            .map(|(_, command)| command)
            .collect()
    }
}
