//! Proxy for a surface hosted by the front-end process.
//!
//! Commands go into the shared outbox, which the RPC server flushes to stdout
//! as `surface` notifications. Navigation state is whatever the front end last
//! reported; until then it is assumed from the commands sent.

use tracing::debug;

use crate::surface::{CommandQueue, ContentSurface, SurfaceCommand, SurfaceFactory, SurfaceState};
use crate::types::surface::SurfaceId;

pub struct RemoteSurface {
    id: SurfaceId,
    url: String,
    can_go_back: bool,
    can_go_forward: bool,
    zoom: f64,
    outbox: CommandQueue,
}

impl RemoteSurface {
    pub fn new(id: SurfaceId, url: &str, outbox: CommandQueue) -> Self {
        outbox.push(id, SurfaceCommand::Create { url: url.to_string() });
        Self {
            id,
            url: url.to_string(),
            can_go_back: false,
            can_go_forward: false,
            zoom: 0.0,
            outbox,
        }
    }

    fn send(&self, command: SurfaceCommand) {
        self.outbox.push(self.id, command);
    }
}

impl ContentSurface for RemoteSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load(&mut self, url: &str) {
        self.url = url.to_string();
        self.send(SurfaceCommand::Load { url: url.to_string() });
    }

    fn go_back(&mut self) {
        self.send(SurfaceCommand::GoBack);
    }

    fn go_forward(&mut self) {
        self.send(SurfaceCommand::GoForward);
    }

    fn reload(&mut self) {
        self.send(SurfaceCommand::Reload);
    }

    fn stop(&mut self) {
        self.send(SurfaceCommand::Stop);
    }

    fn set_zoom(&mut self, level: f64) {
        self.zoom = level;
        self.send(SurfaceCommand::SetZoom { level });
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    fn apply_state(&mut self, state: &SurfaceState) {
        debug!(surface = %self.id, ?state, "surface state reported");
        if let Some(url) = &state.url {
            self.url = url.clone();
        }
        self.can_go_back = state.can_go_back;
        self.can_go_forward = state.can_go_forward;
        if let Some(zoom) = state.zoom {
            self.zoom = zoom;
        }
    }
}

impl Drop for RemoteSurface {
    fn drop(&mut self) {
        self.send(SurfaceCommand::Destroy);
    }
}

/// Creates [`RemoteSurface`]s writing to one outbox.
pub struct RemoteSurfaceFactory {
    outbox: CommandQueue,
}

impl RemoteSurfaceFactory {
    pub fn new(outbox: CommandQueue) -> Self {
        Self { outbox }
    }
}

impl SurfaceFactory for RemoteSurfaceFactory {
    fn create_surface(&mut self, id: SurfaceId, url: &str) -> Box<dyn ContentSurface> {
        Box::new(RemoteSurface::new(id, url, self.outbox.clone()))
    }
}
