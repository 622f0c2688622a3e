//! Bridge message validation and dispatch into the controller.

use revu_webview::bridge::{self, BridgeMessage};
use tracing::{debug, warn};

use crate::app::ShellApp;

/// Allowed bridge message names from page script.
///
/// Any message with a name not in this list is rejected and logged.
const ALLOWED_BRIDGE_NAMES: &[&str] = &[
    bridge::REMEMBER_CHANGED,
    bridge::INTRO_CONTINUE,
    bridge::BACK_PRESSED,
];

/// Check whether a bridge message name is in the allowlist.
pub fn is_bridge_name_allowed(name: &str) -> bool {
    ALLOWED_BRIDGE_NAMES.contains(&name)
}

impl ShellApp {
    /// Handle a single bridge message body from the surface.
    pub(crate) fn handle_bridge_message(&mut self, body: &str) {
        let msg = match BridgeMessage::from_json(body) {
            Some(m) => m,
            None => {
                warn!(body_len = body.len(), "bridge message rejected: failed to parse");
                return;
            }
        };

        if !is_bridge_name_allowed(&msg.name) {
            warn!(name = %msg.name, "bridge message rejected: unknown name");
            return;
        }

        debug!(name = %msg.name, "bridge message dispatched");

        match msg.name.as_str() {
            bridge::REMEMBER_CHANGED => match msg.remember_change() {
                Some(remembered) => self.controller.remember_changed(remembered),
                None => {
                    warn!("rememberMeChanged carried a non-boolean payload, ignored");
                }
            },
            bridge::INTRO_CONTINUE => self.controller.continue_to_app(),
            bridge::BACK_PRESSED => self.back_requested(),
            _ => {
                // Shouldn't happen — allowlist checked above
                warn!(name = %msg.name, "unhandled bridge name");
            }
        }
    }
}
