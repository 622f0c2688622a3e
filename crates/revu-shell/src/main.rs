mod app;
mod cli;
mod controller;
mod dispatch;
mod observer;
mod session;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use revu_common::EventBus;
use revu_config::ShellConfig;

use crate::controller::{rules_from, HostController};
use crate::session::SessionStore;

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Load config (CLI path override wins over the platform default)
    let config = match &args.config {
        Some(path) => revu_config::loader::load_from_path(Path::new(path)),
        None => revu_config::load_config(),
    }
    .unwrap_or_else(|e| {
        eprintln!("config load failed, using defaults: {e}");
        ShellConfig::default()
    });

    // Initialize logging
    let directive = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.directive);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "revu=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("revu v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        base_url = %config.web.base_url,
        "hosting web app"
    );

    // Open the persisted session flag
    let session = SessionStore::open_default().unwrap_or_else(|e| {
        tracing::warn!("session store unavailable ({e}), remember-me will not persist");
        SessionStore::in_memory()
    });
    if session.remembered() {
        tracing::info!("remembered session found, automatic sign-in armed");
    }

    let controller = HostController::new(
        rules_from(&config.web),
        &config.timing,
        session,
        EventBus::new(64),
    );

    // Create event loop and run
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut shell = app::ShellApp::new(config, controller);

    tracing::info!("entering event loop");
    if let Err(e) = event_loop.run_app(&mut shell) {
        tracing::error!("event loop error: {e}");
    }
    tracing::info!("shutdown complete");
}
