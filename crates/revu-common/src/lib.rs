pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, SessionError, ShellError, SurfaceError};
pub use events::{EventBus, ShellEvent};
pub use types::{AuthPhase, LoadStatus, NavigationTarget, ShellPhase};

pub type Result<T> = std::result::Result<T, ShellError>;
