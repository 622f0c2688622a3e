//! TOML config loading: read from a path or the platform default.

use std::path::{Path, PathBuf};

use revu_common::ConfigError;
use tracing::{info, warn};

use crate::schema::ShellConfig;
use crate::validation;
use crate::writer::save_config_to_path;

/// Load config from a specific TOML file path.
///
/// Deserializes using serde defaults for any missing fields. After loading,
/// the config is validated; a validation failure is logged as a warning and
/// the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<ShellConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ShellConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e} — using parsed config as-is");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/revu/config.toml`
/// On Linux: `~/.config/revu/config.toml`
///
/// If the file does not exist, a default config file is created and defaults
/// are returned.
pub fn load_default() -> Result<ShellConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::ParseError(msg)) if msg.contains("failed to read") => {
            info!("no config found at {}, creating default", path.display());
            let config = ShellConfig::default();
            save_config_to_path(&config, &path)?;
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("revu").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_from_path_reads_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [web]
            base_url = "https://staging.revulink.net"
            "#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.web.base_url, "https://staging.revulink.net");
        assert_eq!(config.web.login_path, "/login/");
    }

    #[test]
    fn load_from_path_missing_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_from_path_bad_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web\nbase_url = ").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("failed to parse TOML"));
    }

    #[test]
    fn load_from_path_invalid_values_still_parse() {
        // Validation failures warn but do not fail the load.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [timing]
            splash_secs = -1.0
            "#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert!(config.timing.splash_secs < 0.0);
    }
}
