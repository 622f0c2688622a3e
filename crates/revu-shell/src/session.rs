//! Persisted session state: the remember-me flag.
//!
//! The single durable fact the shell keeps across restarts. Stored as a tiny
//! TOML file in the platform data directory; written atomically (tmp +
//! rename) like the config writer. The store is constructed by the caller
//! and handed to the controller, so tests run against an in-memory variant.

use std::path::{Path, PathBuf};

use revu_common::SessionError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SessionState {
    remembered: bool,
}

/// Durable per-install session flag, with an in-memory mode for tests.
pub struct SessionStore {
    state: SessionState,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            state: SessionState::default(),
            path: None,
        }
    }

    /// Open (or initialize) the store backed by `path`.
    ///
    /// An unreadable or unparseable file degrades to defaults; a lost flag
    /// only means one extra manual login.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "session file unparseable, resetting");
                SessionState::default()
            }),
            Err(_) => SessionState::default(),
        };
        Self {
            state,
            path: Some(path),
        }
    }

    /// Open the store at the platform default path
    /// (`{data_dir}/revu/session.toml`).
    pub fn open_default() -> Result<Self, SessionError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SessionError::ReadError("could not determine data directory".into()))?;
        Ok(Self::open(data_dir.join("revu").join("session.toml")))
    }

    /// Whether the user opted to stay logged in.
    pub fn remembered(&self) -> bool {
        self.state.remembered
    }

    /// Record a remember-me change, persisting when the value moved.
    ///
    /// Persistence failures are logged, not propagated: nothing in the shell
    /// may die because a flag could not be written.
    pub fn set_remembered(&mut self, remembered: bool) {
        if self.state.remembered == remembered {
            return;
        }
        self.state.remembered = remembered;
        debug!(remembered, "session flag changed");
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist session flag");
        }
    }

    fn persist(&self) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let toml_str = toml::to_string(&self.state)
            .map_err(|e| SessionError::WriteError(format!("serialize: {e}")))?;
        write_atomic(path, &toml_str)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SessionError::WriteError(format!("create dir {}: {e}", parent.display()))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)
        .map_err(|e| SessionError::WriteError(format!("write {}: {e}", tmp_path.display())))?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, content)
            .map_err(|e2| SessionError::WriteError(format!("write {}: {e2}", path.display())))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn in_memory_defaults_to_not_remembered() {
        let store = SessionStore::in_memory();
        assert!(!store.remembered());
    }

    #[test]
    fn in_memory_set_does_not_need_disk() {
        let mut store = SessionStore::in_memory();
        store.set_remembered(true);
        assert!(store.remembered());
        store.set_remembered(false);
        assert!(!store.remembered());
    }

    #[test]
    fn flag_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let mut store = SessionStore::open(&path);
        assert!(!store.remembered());
        store.set_remembered(true);

        let reopened = SessionStore::open(&path);
        assert!(reopened.remembered());
    }

    #[test]
    fn unchanged_value_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let mut store = SessionStore::open(&path);
        store.set_remembered(false);
        // No change from the default -> nothing written.
        assert!(!path.exists());
    }

    #[test]
    fn missing_parent_dirs_are_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("revu").join("session.toml");

        let mut store = SessionStore::open(&path);
        store.set_remembered(true);
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_resets_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "remembered = \"definitely\"").unwrap();

        let store = SessionStore::open(&path);
        assert!(!store.remembered());
    }

    #[test]
    fn tmp_file_is_cleaned_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let mut store = SessionStore::open(&path);
        store.set_remembered(true);
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
