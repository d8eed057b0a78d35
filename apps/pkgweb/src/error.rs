//! CLI error handling

use std::fmt;

use pkgweb_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(pkgweb_errors::ConfigError),
    /// Operations error
    Ops(pkgweb_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<pkgweb_errors::ConfigError> for CliError {
    fn from(e: pkgweb_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<pkgweb_errors::Error> for CliError {
    fn from(e: pkgweb_errors::Error) -> Self {
        match e {
            pkgweb_errors::Error::Config(e) => CliError::Config(e),
            other => CliError::Ops(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgweb_errors::{ClientError, ConfigError};

    #[test]
    fn ops_error_display_carries_code_and_hint() {
        let err = CliError::from(pkgweb_errors::Error::from(ClientError::DaemonUnavailable {
            message: "socket closed".to_string(),
        }));
        let text = err.to_string();
        assert!(text.starts_with("package daemon unavailable: socket closed"));
        assert!(text.contains("Code: client.daemon_unavailable"));
        assert!(text.contains("Hint: "));
        assert!(text.contains("Retry: safe to retry"));
    }

    #[test]
    fn config_errors_are_unwrapped() {
        let err = CliError::from(pkgweb_errors::Error::from(ConfigError::InvalidValue {
            field: "tracker.duration_ms".to_string(),
            value: "0".to_string(),
        }));
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid value for tracker.duration_ms: 0"
        );
    }
}
