//! Cookie snapshot types and login-evidence scan.

use serde::{Deserialize, Serialize};

/// Cookie name substrings that count as evidence of an authenticated
/// session. Case-sensitive; any single hit is sufficient.
pub const AUTH_COOKIE_MARKERS: &[&str] = &["auth", "token", "session", "remember", "login"];

/// A name/value pair read from the surface's cookie store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Whether any cookie name carries an auth-evidence substring.
pub fn has_auth_evidence(cookies: &[CookieRecord]) -> bool {
    cookies
        .iter()
        .any(|c| AUTH_COOKIE_MARKERS.iter().any(|m| c.name.contains(m)))
}
