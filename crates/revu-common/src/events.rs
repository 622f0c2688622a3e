use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{AuthPhase, LoadStatus, ShellPhase};

/// Events the shell broadcasts to the presentation layer.
///
/// The presentation layer consumes exactly three observable facts: the shell
/// phase (splash/intro visibility), the authentication phase (overlay), and
/// the load status (spinner).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ShellEvent {
    PhaseChanged(ShellPhase),
    AuthChanged(AuthPhase),
    LoadStatusChanged(LoadStatus),
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ShellEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
