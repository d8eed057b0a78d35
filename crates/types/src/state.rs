//! UI-facing package state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package status as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiStatus {
    Uninstalled,
    Installed,
    Active,
    Installing,
    Uninstalling,
    Enabling,
    Disabling,
    Priced,
    Error,
}

impl UiStatus {
    /// Whether this status only exists while an operation is tracked
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::Installing | Self::Uninstalling | Self::Enabling | Self::Disabling
        )
    }
}

impl fmt::Display for UiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninstalled => "uninstalled",
            Self::Installed => "installed",
            Self::Active => "active",
            Self::Installing => "installing",
            Self::Uninstalling => "uninstalling",
            Self::Enabling => "enabling",
            Self::Disabling => "disabling",
            Self::Priced => "priced",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Operation a caller asked the daemon to perform on a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Install,
    Uninstall,
    Enable,
    Disable,
}

impl Operation {
    /// The transient status reported while this operation is pending
    #[must_use]
    pub fn transient_status(self) -> UiStatus {
        match self {
            Self::Install => UiStatus::Installing,
            Self::Uninstall => UiStatus::Uninstalling,
            Self::Enable => UiStatus::Enabling,
            Self::Disable => UiStatus::Disabling,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
            Self::Enable => write!(f, "enable"),
            Self::Disable => write!(f, "disable"),
        }
    }
}

/// State of a package as rendered to the UI. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapState {
    pub status: UiStatus,
    #[serde(rename = "changeID", default, skip_serializing_if = "String::is_empty")]
    pub change_id: String,
    #[serde(
        rename = "progressSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_size: Option<u64>,
    #[serde(
        rename = "progressSummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub progress_summary: Option<String>,
}

impl SnapState {
    /// A state with no tracked operation behind it
    #[must_use]
    pub fn steady(status: UiStatus) -> Self {
        Self {
            status,
            change_id: String::new(),
            progress_size: None,
            progress_summary: None,
        }
    }

    /// A pending state for the given operation and change id
    #[must_use]
    pub fn pending(operation: Operation, change_id: impl Into<String>) -> Self {
        Self {
            status: operation.transient_status(),
            change_id: change_id.into(),
            progress_size: None,
            progress_summary: None,
        }
    }
}
