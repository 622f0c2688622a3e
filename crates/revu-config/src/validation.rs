//! Configuration validation.
//!
//! Checks URL shapes, timing ranges, and retry bounds, collecting every
//! problem into a single `ConfigError`.

use revu_common::ConfigError;

use crate::schema::ShellConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ShellConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_web(&mut errors, config);
    validate_timing(&mut errors, config);
    validate_retry(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_web(errors: &mut Vec<String>, config: &ShellConfig) {
    let web = &config.web;

    if !web.base_url.starts_with("https://") && !web.base_url.starts_with("http://") {
        errors.push(format!("web.base_url must be http(s): {}", web.base_url));
    }
    if web.base_url.ends_with('/') {
        errors.push("web.base_url must not end with a slash".into());
    }
    for (name, path) in [
        ("web.login_path", &web.login_path),
        ("web.dashboard_path", &web.dashboard_path),
    ] {
        if !path.starts_with('/') {
            errors.push(format!("{name} must start with '/': {path}"));
        }
    }
    if web.app_marker.is_empty() {
        errors.push("web.app_marker must not be empty".into());
    }
    if web.app_marker.contains(['&', '=', '?']) {
        errors.push(format!(
            "web.app_marker must be a bare query key: {}",
            web.app_marker
        ));
    }
}

fn validate_timing(errors: &mut Vec<String>, config: &ShellConfig) {
    for (name, secs) in [
        ("timing.splash_secs", config.timing.splash_secs),
        ("timing.auth_hop_secs", config.timing.auth_hop_secs),
    ] {
        if !secs.is_finite() || secs < 0.0 {
            errors.push(format!("{name} must be a non-negative number: {secs}"));
        }
        if secs > 30.0 {
            errors.push(format!("{name} is unreasonably long: {secs}"));
        }
    }
}

fn validate_retry(errors: &mut Vec<String>, config: &ShellConfig) {
    if config.retry.blank_reload_limit > 10 {
        errors.push(format!(
            "retry.blank_reload_limit must be at most 10: {}",
            config.retry.blank_reload_limit
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate(&ShellConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = ShellConfig::default();
        config.web.base_url = "ftp://app.revulink.net".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn rejects_trailing_slash_base_url() {
        let mut config = ShellConfig::default();
        config.web.base_url = "https://app.revulink.net/".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_relative_paths() {
        let mut config = ShellConfig::default();
        config.web.login_path = "login/".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("login_path"));
    }

    #[test]
    fn rejects_marker_with_separators() {
        let mut config = ShellConfig::default();
        config.web.app_marker = "app=1".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_negative_timing() {
        let mut config = ShellConfig::default();
        config.timing.splash_secs = -0.5;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("splash_secs"));
    }

    #[test]
    fn rejects_excessive_retry_limit() {
        let mut config = ShellConfig::default();
        config.retry.blank_reload_limit = 100;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = ShellConfig::default();
        config.web.app_marker = String::new();
        config.timing.auth_hop_secs = f64::NAN;
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("app_marker"));
        assert!(msg.contains("auth_hop_secs"));
    }
}
