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
pub enum PlatformError {
    #[error("window error: {0}")]
    WindowError(String),

    #[error("event loop error: {0}")]
    EventLoop(String),
}

/// Failures of the agent process lifecycle.
///
/// None of these are fatal to the host: after any of them the controller
/// is back in (or still in) a state from which `start()` works again.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("agent is already running")]
    AlreadyRunning,

    #[error("executable not found at: {}", .0.display())]
    ExecutableMissing(PathBuf),

    #[error("{0}")]
    Spawn(#[source] std::io::Error),

    #[error("could not resolve launch plan: {0}")]
    Launch(String),

    #[error("agent is not running")]
    NotRunning,

    #[error("agent stdin is closed")]
    StdinClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum WebAgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),
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

        let err = ConfigError::ValidationError("window.width = 0".into());
        assert_eq!(err.to_string(), "config validation error: window.width = 0");
    }

    #[test]
    fn host_error_display() {
        let err = HostError::ExecutableMissing(PathBuf::from("/opt/agent/WebAgent"));
        assert_eq!(err.to_string(), "executable not found at: /opt/agent/WebAgent");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        assert_eq!(HostError::Spawn(io).to_string(), "permission denied");

        assert_eq!(HostError::NotRunning.to_string(), "agent is not running");
        assert_eq!(HostError::StdinClosed.to_string(), "agent stdin is closed");
    }

    #[test]
    fn host_error_spawn_keeps_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = HostError::Spawn(io);
        assert!(err.source().is_some());
    }

    #[test]
    fn webagent_error_from_host() {
        let err: WebAgentError = HostError::AlreadyRunning.into();
        assert!(matches!(err, WebAgentError::Host(HostError::AlreadyRunning)));
        assert_eq!(err.to_string(), "agent is already running");
    }

    #[test]
    fn webagent_error_from_config() {
        let err: WebAgentError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, WebAgentError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn webagent_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WebAgentError = io_err.into();
        assert!(matches!(err, WebAgentError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn webagent_error_other_variants() {
        let err = WebAgentError::WebView("js error".into());
        assert_eq!(err.to_string(), "webview error: js error");

        let err: WebAgentError = PlatformError::EventLoop("no display".into()).into();
        assert_eq!(err.to_string(), "event loop error: no display");
    }
}
