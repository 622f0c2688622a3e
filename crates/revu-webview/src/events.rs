//! Surface event types.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the embedded surface, drained on the main loop.
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// A load request failed at issue time.
    LoadFailed { url: String },
    /// A navigation was allowed and will commit.
    NavigationRequested { url: String },
    /// A navigation was cancelled by policy; `to` must be reissued instead.
    NavigationRewritten { from: String, to: String },
    /// A bridge message was received from page script.
    BridgeMessage { body: String },
    /// Result of a post-finish page probe: history depth and rendered body.
    PageProbe {
        url: String,
        can_go_back: bool,
        body: String,
    },
}
