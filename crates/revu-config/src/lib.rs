//! Shell configuration system.
//!
//! TOML-based configuration with full defaults: a missing or partial config
//! file works out of the box, pointing the shell at the production web app.

pub mod loader;
pub mod schema;
pub mod validation;
pub mod writer;

pub use schema::{ShellConfig, CONFIG_SCHEMA_VERSION};
pub use writer::{save_config, save_config_to_path};

use revu_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default if
/// none exists, and validates the result.
pub fn load_config() -> Result<ShellConfig, ConfigError> {
    let config = loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ShellConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ShellConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.web.base_url, "https://app.revulink.net");
        assert_eq!(parsed.web.app_marker, "app");
    }
}
