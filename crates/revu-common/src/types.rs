use serde::{Deserialize, Serialize};
use std::fmt;

/// View-level phase of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellPhase {
    Splash,
    Intro,
    LoginPending,
    Authenticating,
    Dashboard,
}

/// Whether an automatic remembered-session login is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthPhase {
    Idle,
    Authenticating,
}

/// Load state of the embedded surface, drives the spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed,
}

/// The URL the controller currently wants displayed.
///
/// `revision` increments on every load the controller issues, so the same URL
/// loaded twice is still a distinct presentation instance (no retained
/// scroll/form state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub url: String,
    pub revision: u64,
}

impl NavigationTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            revision: 0,
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.url, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_display_includes_revision() {
        let mut target = NavigationTarget::new("https://app.revulink.net/login/?app");
        target.revision = 3;
        assert_eq!(
            target.to_string(),
            "https://app.revulink.net/login/?app#3"
        );
    }

    #[test]
    fn phases_round_trip_through_serde() {
        let json = serde_json::to_string(&ShellPhase::Authenticating).unwrap();
        let parsed: ShellPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ShellPhase::Authenticating);

        let json = serde_json::to_string(&LoadStatus::Failed).unwrap();
        let parsed: LoadStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LoadStatus::Failed);
    }
}
