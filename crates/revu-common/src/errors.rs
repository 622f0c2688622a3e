use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session read error: {0}")]
    ReadError(String),

    #[error("session write error: {0}")]
    WriteError(String),

    #[error("session parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("webview error: {0}")]
    WebView(String),

    #[error("script evaluation error: {0}")]
    Script(String),

    #[error("cookie store error: {0}")]
    Cookie(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("splash_secs negative".into());
        assert_eq!(
            err.to_string(),
            "config validation error: splash_secs negative"
        );
    }

    #[test]
    fn session_error_display() {
        let err = SessionError::WriteError("disk full".into());
        assert_eq!(err.to_string(), "session write error: disk full");

        let err = SessionError::ParseError("bad toml".into());
        assert_eq!(err.to_string(), "session parse error: bad toml");
    }

    #[test]
    fn surface_error_display() {
        let err = SurfaceError::WebView("creation failed".into());
        assert_eq!(err.to_string(), "webview error: creation failed");

        let err = SurfaceError::Cookie("store unavailable".into());
        assert_eq!(err.to_string(), "cookie store error: store unavailable");
    }

    #[test]
    fn shell_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let shell_err: ShellError = config_err.into();
        assert!(matches!(shell_err, ShellError::Config(_)));
        assert!(shell_err.to_string().contains("bad toml"));
    }

    #[test]
    fn shell_error_from_session() {
        let session_err = SessionError::ReadError("permission denied".into());
        let shell_err: ShellError = session_err.into();
        assert!(matches!(shell_err, ShellError::Session(_)));
        assert!(shell_err.to_string().contains("permission denied"));
    }

    #[test]
    fn shell_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let shell_err: ShellError = io_err.into();
        assert!(matches!(shell_err, ShellError::Io(_)));
        assert!(shell_err.to_string().contains("file missing"));
    }
}
