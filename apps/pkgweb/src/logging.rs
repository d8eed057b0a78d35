//! Structured logging integration for events
//!
//! Library crates report what happened as events; this module turns each
//! event into a tracing record with structured fields.

use pkgweb_events::{AppEvent, EventMessage, GeneralEvent, TrackerEvent};
use tracing::{debug, error, info, warn};

/// Log an event message at the level its metadata carries
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        AppEvent::General(event) => match event {
            GeneralEvent::Warning { message, context } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    context = ?context,
                    "{message}"
                );
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    "Operation started"
                );
            }
            GeneralEvent::OperationFailed { operation, failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Operation failed"
                );
            }
        },

        AppEvent::Tracker(event) => match event {
            TrackerEvent::Started {
                package,
                operation,
                change_id,
                deadline_in,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    operation = %operation,
                    change_id = %change_id,
                    deadline_in = ?deadline_in,
                    "Tracking started"
                );
            }
            TrackerEvent::Replaced {
                package,
                previous,
                operation,
                change_id,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    previous = %previous,
                    operation = %operation,
                    change_id = %change_id,
                    "Tracked operation replaced"
                );
            }
            TrackerEvent::Completed {
                package,
                operation,
                change_id,
                elapsed,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    operation = %operation,
                    change_id = %change_id,
                    elapsed = ?elapsed,
                    "Tracked operation completed"
                );
            }
            TrackerEvent::Expired {
                package,
                operation,
                change_id,
            } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    operation = %operation,
                    change_id = %change_id,
                    "Tracked operation expired"
                );
            }
            TrackerEvent::Cancelled {
                package,
                operation,
                change_id,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    package = %package,
                    operation = %operation,
                    change_id = %change_id,
                    "Tracking cancelled"
                );
            }
        },
    }
}
