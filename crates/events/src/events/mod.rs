use serde::{Deserialize, Serialize};

use crate::{EventMeta, EventSource};
use pkgweb_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(str::to_string),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(str::to_string),
            retryable: error.is_retryable(),
        }
    }
}

pub mod general;
pub mod tracker;

pub use general::GeneralEvent;
pub use tracker::TrackerEvent;

/// Top-level application event enum that aggregates all domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Request lifecycle and warnings
    General(GeneralEvent),

    /// Operation state tracker lifecycle
    Tracker(TrackerEvent),
}

impl AppEvent {
    /// Identify the source domain for this event
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Tracker(_) => EventSource::TRACKER,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::OperationFailed { .. }) => Level::ERROR,
            Self::General(GeneralEvent::Warning { .. }) => Level::WARN,
            Self::General(GeneralEvent::OperationStarted { .. }) => Level::INFO,
            // Expiry means we stopped waiting on the daemon
            Self::Tracker(TrackerEvent::Expired { .. }) => Level::INFO,
            Self::Tracker(_) => Level::DEBUG,
        }
    }
}

/// An event together with its metadata envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    #[must_use]
    pub fn new(meta: EventMeta, event: AppEvent) -> Self {
        Self { meta, event }
    }
}
