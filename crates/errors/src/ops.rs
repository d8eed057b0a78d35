//! Operation orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpsError {
    #[error("no package specified")]
    NoPackageSpecified,

    #[error("invalid scenario: {message}")]
    InvalidScenario { message: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },

    #[error("event channel closed")]
    EventChannelClosed,

    #[error("missing component: {component}")]
    MissingComponent { component: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NoPackageSpecified => Some("Pass the name of the package to operate on."),
            Self::InvalidScenario { .. } => {
                Some("Check the scenario file against the documented step kinds.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NoPackageSpecified => "ops.no_package",
            Self::InvalidScenario { .. } => "ops.invalid_scenario",
            Self::SerializationError { .. } => "ops.serialization",
            Self::EventChannelClosed => "ops.event_channel_closed",
            Self::MissingComponent { .. } => "ops.missing_component",
        })
    }
}
