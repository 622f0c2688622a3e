//! Surface lifecycle management.
//!
//! `SurfaceManager` creates the single `wry::WebView` the shell hosts its
//! web content in, attaches the bridge/lifecycle/navigation handlers, and
//! collects their events for the main loop to drain.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::SurfaceEvent;

mod handle;
mod handlers;
mod lifecycle;
mod types;

pub use handle::SurfaceHandle;
pub use types::SurfaceConfig;

/// Manages the embedded content surface.
pub struct SurfaceManager {
    /// Event sink — events are pushed here for the main loop to consume.
    pub(crate) events: Arc<Mutex<Vec<SurfaceEvent>>>,
    /// Optional content provider for the `revu://` custom protocol.
    content_provider: Option<Arc<ContentProvider>>,
}

impl SurfaceManager {
    /// Create a new surface manager.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
        }
    }

    /// Set the content provider for serving bundled assets via `revu://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    pub(crate) fn content_provider(&self) -> Option<&Arc<ContentProvider>> {
        self.content_provider.as_ref()
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<SurfaceEvent> {
        let mut events = self.events.lock().unwrap();
        std::mem::take(&mut *events)
    }
}

impl Default for SurfaceManager {
    fn default() -> Self {
        Self::new()
    }
}
