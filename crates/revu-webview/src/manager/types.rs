/// Configuration for creating the surface.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Initial URL to load.
    pub url: Option<String>,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable autoplay for media (the intro video).
    pub autoplay: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            url: None,
            devtools: cfg!(debug_assertions),
            user_agent: Some("RevuShell/0.1".to_string()),
            autoplay: true,
        }
    }
}

impl SurfaceConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}
