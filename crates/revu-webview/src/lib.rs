//! Content Surface adapter over `wry`.
//!
//! Wraps the embedded WebView to provide:
//! - A single managed surface instance hosting the remote web app
//! - One-way IPC from page script to native code (the script bridge)
//! - Navigation interception (login-marker rewrite policy)
//! - Page lifecycle events, body/history probing, cookie snapshots
//! - Custom protocol for serving bundled onboarding content

pub mod bridge;
pub mod content;
pub mod cookies;
pub mod events;
pub mod manager;
pub mod policy;

pub use bridge::BridgeMessage;
pub use content::ContentProvider;
pub use cookies::CookieRecord;
pub use events::{PageLoadState, SurfaceEvent};
pub use manager::{SurfaceConfig, SurfaceHandle, SurfaceManager};
pub use policy::{NavDecision, UrlRules};
