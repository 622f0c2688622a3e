//! Script bridge between page JavaScript and native code.
//!
//! Messages flow one way for state reporting:
//! - **JS -> Rust**: page script calls `window.revu.send(name, payload)`,
//!   which posts through the WebView IPC channel and surfaces as a
//!   [`SurfaceEvent::BridgeMessage`](crate::events::SurfaceEvent).
//! - **Rust -> JS**: native code calls `evaluate_script` with
//!   [`js_dispatch_message`] to notify page-side handlers (used for the
//!   authenticating overlay).

use serde::{Deserialize, Serialize};

/// Message name reporting a "remember me" checkbox change. Payload: bool.
pub const REMEMBER_CHANGED: &str = "rememberMeChanged";

/// Message name for the intro screen's continue action. No payload.
pub const INTRO_CONTINUE: &str = "introContinue";

/// Message name for the shell back control. No payload.
pub const BACK_PRESSED: &str = "backPressed";

/// A typed bridge message from JavaScript to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// The message name.
    pub name: String,
    /// The message payload (arbitrary JSON, often null).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl BridgeMessage {
    /// Parse a bridge message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The remember-me change carried by this message, if it is one.
    ///
    /// Returns `None` for any other message name or a non-boolean payload;
    /// malformed messages are ignored, not errors.
    pub fn remember_change(&self) -> Option<bool> {
        if self.name != REMEMBER_CHANGED {
            return None;
        }
        self.payload.as_bool()
    }
}

/// JavaScript snippet that sets up the bridge on the JS side.
///
/// Injected as an initialization script into every page the surface loads,
/// including the remote web app. Also installs the authenticating overlay,
/// toggled from Rust via an `authStateChanged` dispatch.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    if (window.revu) { return; }
    window.revu = {
        send: function(name, payload) {
            window.ipc.postMessage(JSON.stringify({
                name: name,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(name, callback) {
            this._handlers[name] = callback;
        },
        _dispatch: function(name, payload) {
            var handler = this._handlers[name];
            if (handler) {
                handler(payload);
            }
        }
    };

    window.revu.on('authStateChanged', function(active) {
        var overlay = document.getElementById('revu-auth-overlay');
        if (active && !overlay) {
            overlay = document.createElement('div');
            overlay.id = 'revu-auth-overlay';
            overlay.style.cssText = 'position:fixed;inset:0;z-index:2147483647;' +
                'background:rgba(0,0,0,0.6);display:flex;flex-direction:column;' +
                'align-items:center;justify-content:center;color:#fff;' +
                'font:600 17px system-ui,sans-serif;';
            overlay.innerHTML = '<div class="revu-spinner"></div><p>Authenticating...</p>';
            (document.body || document.documentElement).appendChild(overlay);
        } else if (!active && overlay) {
            overlay.remove();
        }
    });
})();
"#;

/// Observer script injected into login-pattern pages only.
///
/// Locates a checkbox-like "remember me" control, reports its current state
/// immediately, then reports on every change event. Injection is idempotent.
pub const REMEMBER_OBSERVER_SCRIPT: &str = r#"
(function() {
    if (window.__revuRememberObserved) { return; }
    var box = document.querySelector(
        'input[type="checkbox"][name*="remember"], input[type="checkbox"][id*="remember"]'
    );
    if (!box) { return; }
    window.__revuRememberObserved = true;
    window.revu.send('rememberMeChanged', box.checked);
    box.addEventListener('change', function() {
        window.revu.send('rememberMeChanged', box.checked);
    });
})();
"#;

/// Generate a JS snippet that dispatches a message to the page-side handler.
pub fn js_dispatch_message(name: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.revu._dispatch({}, {});",
        serde_json::to_string(name).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
