//! Handler attachments: builder callbacks that translate engine callbacks
//! into queued [`SurfaceEvent`]s.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, SurfaceEvent};
use crate::policy::{NavDecision, UrlRules};

use super::SurfaceManager;

impl SurfaceManager {
    pub(super) fn attach_bridge_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<SurfaceEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            // Validate that the bridge body is valid JSON before forwarding
            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(body_len = body.len(), "bridge message rejected: invalid JSON");
                return;
            }

            debug!(body_len = body.len(), "bridge message from page script");
            if let Ok(mut evts) = events.lock() {
                evts.push(SurfaceEvent::BridgeMessage { body });
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<SurfaceEvent>>>,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            if let Ok(mut evts) = events.lock() {
                evts.push(SurfaceEvent::PageLoad { state, url });
            }
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<SurfaceEvent>>>,
        rules: UrlRules,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| match rules.decide(&url) {
            NavDecision::Allow => {
                debug!(url = %url, "navigation allowed");
                if let Ok(mut evts) = events.lock() {
                    evts.push(SurfaceEvent::NavigationRequested { url });
                }
                true
            }
            NavDecision::RewriteWithMarker(to) => {
                debug!(from = %url, to = %to, "navigation cancelled: login URL missing marker");
                if let Ok(mut evts) = events.lock() {
                    evts.push(SurfaceEvent::NavigationRewritten { from: url, to });
                }
                false
            }
        })
    }
}
