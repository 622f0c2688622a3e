use std::sync::Arc;

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::bridge::BRIDGE_INIT_SCRIPT;
use crate::policy::UrlRules;

use super::handle::SurfaceHandle;
use super::types::SurfaceConfig;
use super::SurfaceManager;

impl SurfaceManager {
    /// Create the surface as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The surface fills `bounds` within the parent window.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: SurfaceConfig,
        rules: UrlRules,
    ) -> Result<SurfaceHandle, wry::Error> {
        let events = Arc::clone(&self.events);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_autoplay(config.autoplay)
            .with_focused(true);

        // Initialization script: bridge + authenticating overlay
        builder = builder.with_initialization_script(BRIDGE_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // Bridge handler: JS -> Rust
        builder = Self::attach_bridge_handler(builder, Arc::clone(&events));

        // Page load lifecycle
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events));

        // Navigation decisions: login-marker rewrite policy
        builder = Self::attach_navigation_handler(builder, Arc::clone(&events), rules);

        // Custom protocol for bundled onboarding content
        builder = self.attach_custom_protocol(builder);

        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        let webview = builder.build_as_child(window)?;

        debug!(url = %initial_url, "surface created");

        Ok(SurfaceHandle::new(webview, initial_url, events))
    }

    fn attach_custom_protocol<'a>(&self, mut builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        if let Some(provider) = self.content_provider() {
            let cp = Arc::clone(provider);
            builder = builder.with_custom_protocol("revu".to_string(), move |_wv_id, request| {
                let uri = request.uri().to_string();
                let path = uri
                    .strip_prefix("revu://localhost/")
                    .or_else(|| uri.strip_prefix("revu://localhost"))
                    .or_else(|| uri.strip_prefix("revu:///"))
                    .or_else(|| uri.strip_prefix("revu://"))
                    .unwrap_or("");

                match cp.resolve(path) {
                    Some((mime, data)) => wry::http::Response::builder()
                        .status(200)
                        .header("Content-Type", mime.as_ref())
                        .header("Access-Control-Allow-Origin", "revu://localhost")
                        .body(std::borrow::Cow::from(data.into_owned()))
                        .unwrap(),
                    None => {
                        warn!(path = %path, "custom protocol: asset not found");
                        wry::http::Response::builder()
                            .status(404)
                            .body(std::borrow::Cow::from(b"Not Found".to_vec()))
                            .unwrap()
                    }
                }
            });
        }
        builder
    }
}
