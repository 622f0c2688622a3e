use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::warn;
use wry::http::header::{HeaderValue, CACHE_CONTROL, PRAGMA};
use wry::http::HeaderMap;
use wry::WebView;

use revu_common::SurfaceError;

use crate::cookies::CookieRecord;
use crate::events::SurfaceEvent;

/// Script evaluated after every page finish: history depth for the back
/// control plus the rendered body text for blank-render detection.
const PROBE_SCRIPT: &str = "(function() {\
    return {\
        canGoBack: window.history.length > 1,\
        body: document.body ? (document.body.innerText || '') : ''\
    };\
})()";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProbeResult {
    can_go_back: bool,
    body: String,
}

/// Handle to the managed surface. Provides the load / back / script-eval
/// primitives the controller drives.
pub struct SurfaceHandle {
    webview: WebView,
    /// Current URL (best-effort tracking, updated from load events).
    current_url: String,
    /// Shared event sink, used by async probe callbacks.
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl SurfaceHandle {
    pub(super) fn new(
        webview: WebView,
        initial_url: String,
        events: Arc<Mutex<Vec<SurfaceEvent>>>,
    ) -> Self {
        Self {
            webview,
            current_url: initial_url,
            events,
        }
    }

    /// Get the current URL.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Update the tracked URL from a lifecycle event.
    pub fn set_current_url(&mut self, url: impl Into<String>) {
        self.current_url = url.into();
    }

    /// Navigate to a URL, bypassing HTTP caches.
    ///
    /// Every controller-issued load is a fresh one: no stale content may
    /// remain visible under a new target.
    pub fn load(&mut self, url: &str) -> Result<(), wry::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        self.current_url = url.to_string();
        self.webview.load_url_with_headers(url, headers)
    }

    /// Navigate one step back in the engine's history.
    pub fn go_back(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("window.history.back();")
    }

    /// Execute JavaScript in the page context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Send a typed bridge message to page script.
    pub fn send_to_page(&self, name: &str, payload: &serde_json::Value) -> Result<(), wry::Error> {
        let script = crate::bridge::js_dispatch_message(name, payload);
        self.webview.evaluate_script(&script)
    }

    /// Kick off the asynchronous post-finish probe.
    ///
    /// The result arrives later as [`SurfaceEvent::PageProbe`] on the event
    /// queue; a probe that never completes simply never produces one.
    pub fn probe_page(&self) -> Result<(), SurfaceError> {
        let url = self.current_url.clone();
        let events = Arc::clone(&self.events);
        self.webview
            .evaluate_script_with_callback(PROBE_SCRIPT, move |result| {
                let probe: ProbeResult = match serde_json::from_str(&result) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(url = %url, error = %e, "page probe returned unusable result");
                        return;
                    }
                };
                if let Ok(mut evts) = events.lock() {
                    evts.push(SurfaceEvent::PageProbe {
                        url: url.clone(),
                        can_go_back: probe.can_go_back,
                        body: probe.body,
                    });
                }
            })
            .map_err(|e| SurfaceError::Script(e.to_string()))
    }

    /// Snapshot the cookie store for a URL.
    ///
    /// Best-effort: an error here degrades to "unknown login state".
    pub fn cookie_snapshot(&self, url: &str) -> Result<Vec<CookieRecord>, SurfaceError> {
        let cookies = self
            .webview
            .cookies_for_url(url)
            .map_err(|e| SurfaceError::Cookie(e.to_string()))?;
        Ok(cookies
            .into_iter()
            .map(|c| CookieRecord::new(c.name(), c.value()))
            .collect())
    }

    /// Set the surface bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Get a reference to the underlying wry WebView.
    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_result_parses_engine_shape() {
        let probe: ProbeResult =
            serde_json::from_str(r#"{"canGoBack":true,"body":"Welcome back"}"#).unwrap();
        assert!(probe.can_go_back);
        assert_eq!(probe.body, "Welcome back");
    }

    #[test]
    fn probe_result_rejects_null() {
        assert!(serde_json::from_str::<ProbeResult>("null").is_err());
    }

    #[test]
    fn probe_script_reads_history_and_body() {
        assert!(PROBE_SCRIPT.contains("history.length"));
        assert!(PROBE_SCRIPT.contains("document.body"));
    }
}
