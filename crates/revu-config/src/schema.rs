//! Configuration schema types for the shell.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching the production web app.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Well-known URLs of the hosted web application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Origin of the web app, no trailing slash.
    pub base_url: String,
    /// Path of the login page. Doubles as the login-page match pattern.
    pub login_path: String,
    /// Path of the dashboard page. Doubles as the dashboard match pattern.
    pub dashboard_path: String,
    /// Query marker that tells the web app it is embedded in the shell.
    pub app_marker: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.revulink.net".into(),
            login_path: "/login/".into(),
            dashboard_path: "/dashboard/".into(),
            app_marker: "app".into(),
        }
    }
}

impl WebConfig {
    /// The bare login URL, without the app marker.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    /// The dashboard URL.
    pub fn dashboard_url(&self) -> String {
        format!("{}{}", self.base_url, self.dashboard_path)
    }
}

/// Fixed delays for the two timed transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds the splash screen stays up before the intro appears.
    pub splash_secs: f64,
    /// Seconds to wait after a login-page finish before hopping to the
    /// dashboard during an automatic login.
    pub auth_hop_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            splash_secs: 0.5,
            auth_hop_secs: 0.5,
        }
    }
}

/// Embedded surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    pub user_agent: Option<String>,
    pub devtools: bool,
    pub autoplay: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            user_agent: Some("RevuShell/0.1".to_string()),
            devtools: cfg!(debug_assertions),
            autoplay: true,
        }
    }
}

/// Bounds for self-healing reloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Max automatic reloads of one target after a blank render.
    pub blank_reload_limit: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            blank_reload_limit: 1,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing directive, overridable on the CLI.
    pub directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: "revu=info".into(),
        }
    }
}

/// Root configuration for the shell.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShellConfig {
    pub web: WebConfig,
    pub timing: TimingConfig,
    pub surface: SurfaceSettings,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}
