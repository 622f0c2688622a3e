//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! loop: creates the window and the surface, drains surface events into the
//! observer, feeds observer signals to the controller, and applies the
//! controller's commands back onto the surface.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use revu_common::{AuthPhase, ShellEvent, ShellPhase};
use revu_config::ShellConfig;
use revu_webview::{
    ContentProvider, PageLoadState, SurfaceConfig, SurfaceEvent, SurfaceHandle, SurfaceManager,
};

use crate::controller::{rules_from, HostController, ShellCommand};
use crate::observer::NavigationObserver;

/// Onboarding pages on the custom protocol.
pub const SPLASH_URL: &str = "revu://localhost/onboarding/splash.html";
pub const INTRO_URL: &str = "revu://localhost/onboarding/intro.html";

/// How often the loop wakes to advance deadline-based transitions.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

pub struct ShellApp {
    config: ShellConfig,
    manager: SurfaceManager,
    // Declared before `window` so the webview is dropped first.
    surface: Option<SurfaceHandle>,
    window: Option<Arc<Window>>,
    pub(crate) controller: HostController,
    observer: NavigationObserver,
    presented_phase: ShellPhase,
    presented_auth: AuthPhase,
    /// History state from the latest page probe, feeds the back control.
    last_can_go_back: bool,
}

impl ShellApp {
    pub fn new(config: ShellConfig, controller: HostController) -> Self {
        let observer = NavigationObserver::new(
            rules_from(&config.web),
            config.retry.blank_reload_limit,
        );

        let mut manager = SurfaceManager::new();
        manager.set_content_provider(ContentProvider::new(assets_dir()));

        Self {
            config,
            manager,
            surface: None,
            window: None,
            controller,
            observer,
            presented_phase: ShellPhase::Splash,
            presented_auth: AuthPhase::Idle,
            last_can_go_back: false,
        }
    }

    /// The shell back control was activated (key or page chrome).
    pub(crate) fn back_requested(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let url = surface.current_url().to_string();
        self.controller.back_pressed(self.last_can_go_back, &url);
    }

    /// One turn of the main loop: drain, tick, apply, present.
    fn pump(&mut self) {
        for event in self.manager.drain_events() {
            self.handle_surface_event(event);
        }
        self.controller.tick();
        self.apply_commands();
        self.present();
    }

    fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PageLoad {
                state: PageLoadState::Started,
                url,
            } => {
                debug!(url = %url, "navigation started");
                for signal in self.observer.on_started() {
                    self.controller.handle_signal(signal);
                }
            }
            SurfaceEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => {
                // The finish itself is consumed once the probe comes back
                // with the body and history state.
                let auth_active = self.controller.auth_phase() == AuthPhase::Authenticating;
                if let Some(surface) = &mut self.surface {
                    surface.set_current_url(&url);
                    // A navigation resets the page DOM; the overlay must be
                    // re-armed on every finish while the sign-in runs.
                    if auth_active {
                        if let Err(e) =
                            surface.send_to_page("authStateChanged", &serde_json::json!(true))
                        {
                            warn!(error = %e, "overlay re-dispatch failed");
                        }
                    }
                    if let Err(e) = surface.probe_page() {
                        warn!(url = %url, error = %e, "page probe failed to start");
                    }
                }
            }
            SurfaceEvent::LoadFailed { url } => {
                for signal in self.observer.on_failed(&url) {
                    self.controller.handle_signal(signal);
                }
            }
            SurfaceEvent::NavigationRequested { url } => {
                debug!(url = %url, "navigation committed");
            }
            SurfaceEvent::NavigationRewritten { from, to } => {
                info!(from = %from, to = %to, "reissuing login navigation with app marker");
                self.load_surface(&to);
            }
            SurfaceEvent::BridgeMessage { body } => {
                self.handle_bridge_message(&body);
            }
            SurfaceEvent::PageProbe {
                url,
                can_go_back,
                body,
            } => {
                self.last_can_go_back = can_go_back;
                let cookies = match &self.surface {
                    Some(surface) => surface.cookie_snapshot(&url).unwrap_or_else(|e| {
                        warn!(url = %url, error = %e, "cookie snapshot unavailable");
                        Vec::new()
                    }),
                    None => Vec::new(),
                };
                let signals = self.observer.on_finished(&url, can_go_back, &cookies, &body);
                for signal in signals {
                    self.controller.handle_signal(signal);
                }
            }
        }
    }

    fn apply_commands(&mut self) {
        for command in self.controller.drain_commands() {
            match command {
                ShellCommand::Load { url, revision } => {
                    debug!(url = %url, revision, "loading target");
                    self.load_surface(&url);
                }
                ShellCommand::InjectScript { source } => {
                    if let Some(surface) = &self.surface {
                        if let Err(e) = surface.evaluate_script(&source) {
                            warn!(error = %e, "script injection failed");
                        }
                    }
                }
                ShellCommand::GoBack => {
                    if let Some(surface) = &self.surface {
                        if let Err(e) = surface.go_back() {
                            warn!(error = %e, "history back failed");
                        }
                    }
                }
                ShellCommand::Dismiss => {
                    // Dismissal takes over presentation directly.
                    self.presented_phase = ShellPhase::Intro;
                    self.load_surface(INTRO_URL);
                }
            }
        }
    }

    /// Reflect controller state onto the surface: onboarding page loads and
    /// the authenticating overlay.
    fn present(&mut self) {
        let phase = self.controller.phase();
        if phase != self.presented_phase {
            self.presented_phase = phase;
            match phase {
                ShellPhase::Splash => self.load_surface(SPLASH_URL),
                ShellPhase::Intro => self.load_surface(INTRO_URL),
                // Web phases are presented through Load commands.
                _ => {}
            }
        }

        let auth = self.controller.auth_phase();
        if auth != self.presented_auth {
            self.presented_auth = auth;
            let active = auth == AuthPhase::Authenticating;
            if let Some(surface) = &self.surface {
                if let Err(e) = surface.send_to_page("authStateChanged", &serde_json::json!(active))
                {
                    warn!(error = %e, "overlay dispatch failed");
                }
            }
        }
    }

    fn load_surface(&mut self, url: &str) {
        let result = match self.surface.as_mut() {
            Some(surface) => surface.load(url),
            None => return,
        };
        if let Err(e) = result {
            error!(url = %url, error = %e, "load request failed");
            for signal in self.observer.on_failed(url) {
                self.controller.handle_signal(signal);
            }
        }
    }
}

impl ApplicationHandler for ShellApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("RevuLink")
            .with_inner_size(LogicalSize::new(480.0, 860.0));
        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let bounds = wry::Rect {
            position: wry::dpi::LogicalPosition::new(0.0, 0.0).into(),
            size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
        };

        let surface_config = SurfaceConfig {
            url: Some(SPLASH_URL.to_string()),
            devtools: self.config.surface.devtools,
            user_agent: self.config.surface.user_agent.clone(),
            autoplay: self.config.surface.autoplay,
        };

        match self.manager.create(
            window.as_ref(),
            bounds,
            surface_config,
            rules_from(&self.config.web),
        ) {
            Ok(surface) => {
                self.surface = Some(surface);
                self.window = Some(window);
                info!("surface ready, splash up");
            }
            Err(e) => {
                error!("failed to create surface: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.controller.events().publish(ShellEvent::Shutdown);
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(surface) = &self.surface {
                    let bounds = wry::Rect {
                        position: wry::dpi::LogicalPosition::new(0.0, 0.0).into(),
                        size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
                    };
                    if let Err(e) = surface.set_bounds(bounds) {
                        warn!(error = %e, "surface resize failed");
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Key::Named(NamedKey::BrowserBack | NamedKey::Escape) =
                        event.logical_key
                    {
                        self.back_requested();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump();
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + TICK_INTERVAL));
    }
}

/// Resolve the bundled assets directory: next to the executable in a
/// packaged install, at the workspace root during development.
fn assets_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("assets");
            if candidate.is_dir() {
                return candidate;
            }
        }
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}
