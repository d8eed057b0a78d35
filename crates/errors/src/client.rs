//! Package daemon error types
//!
//! These are the failures the daemon can report back for a request. They
//! form a closed set so the response layer can translate them with an
//! exhaustive table instead of comparing against sentinel values.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientError {
    #[error("package not found: {name}")]
    PackageNotFound { name: String },

    #[error("package already installed: {name}")]
    AlreadyInstalled { name: String },

    #[error("package not installed: {name}")]
    NotInstalled { name: String },

    #[error("package already enabled: {name}")]
    AlreadyActive { name: String },

    #[error("package not enabled: {name}")]
    NotActive { name: String },

    #[error("operation already in progress for {name} (change {change_id})")]
    OperationInProgress { name: String, change_id: String },

    #[error("change not found: {id}")]
    ChangeNotFound { id: String },

    #[error("package daemon unavailable: {message}")]
    DaemonUnavailable { message: String },

    #[error("package daemon error: {message}")]
    Daemon { message: String },
}

impl UserFacingError for ClientError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PackageNotFound { .. } => Some("Check the package name and search again."),
            Self::OperationInProgress { .. } => {
                Some("Wait for the running operation to finish before starting another.")
            }
            Self::DaemonUnavailable { .. } => {
                Some("Make sure the package daemon is running and reachable.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::OperationInProgress { .. } | Self::DaemonUnavailable { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::PackageNotFound { .. } => "client.package_not_found",
            Self::AlreadyInstalled { .. } => "client.already_installed",
            Self::NotInstalled { .. } => "client.not_installed",
            Self::AlreadyActive { .. } => "client.already_active",
            Self::NotActive { .. } => "client.not_active",
            Self::OperationInProgress { .. } => "client.operation_in_progress",
            Self::ChangeNotFound { .. } => "client.change_not_found",
            Self::DaemonUnavailable { .. } => "client.daemon_unavailable",
            Self::Daemon { .. } => "client.daemon",
        })
    }
}
