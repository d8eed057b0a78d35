//! Thread-safe operation state tracker

use crate::entry::{TrackedOperation, TrackerEntry};
use crate::progress::{attach_progress, ChangeSource};
use crate::translate::{has_operation_completed, is_noop, translate_status};
use pkgweb_config::TrackerConfig;
use pkgweb_events::{AppEvent, EventEmitter, EventMeta, EventSender, TrackerEvent};
use pkgweb_types::{Operation, RawSnapshot, SnapState};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default lifetime of a tracked operation
pub const DEFAULT_TRACKER_DURATION: Duration = Duration::from_secs(30);

/// What a `track_*` call did to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The package already sits at a state where the operation means nothing
    Skipped,
    /// A new entry was created
    Created,
    /// A live entry for a different operation or change was overwritten
    Replaced,
    /// The live entry had no change id yet and took the new one
    ChangeIdAdopted,
    /// A live entry for the same operation already existed
    Unchanged,
}

impl TrackOutcome {
    /// Whether the package is tracked after the call
    #[must_use]
    pub fn is_tracked(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

enum Resolution {
    Pending(SnapState),
    Completed(TrackerEntry),
    Expired(TrackerEntry),
}

/// Tracks at most one outstanding operation per package name.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Debug, Clone)]
pub struct StateTracker {
    entries: Arc<Mutex<HashMap<String, TrackerEntry>>>,
    duration: Duration,
    tx: Option<EventSender>,
}

impl StateTracker {
    /// Create a tracker whose entries live for `duration`
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            duration,
            tx: None,
        }
    }

    /// Create a tracker from configuration
    #[must_use]
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.duration())
    }

    /// Report entry lifecycle on the given event channel
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Lifetime given to new entries
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start tracking an install of the package in `snapshot`
    pub fn track_install(&self, change_id: &str, snapshot: &RawSnapshot) -> TrackOutcome {
        self.track(Operation::Install, change_id, snapshot)
    }

    /// Start tracking a removal of the package in `snapshot`
    pub fn track_uninstall(&self, change_id: &str, snapshot: &RawSnapshot) -> TrackOutcome {
        self.track(Operation::Uninstall, change_id, snapshot)
    }

    /// Start tracking enabling the package in `snapshot`
    pub fn track_enable(&self, change_id: &str, snapshot: &RawSnapshot) -> TrackOutcome {
        self.track(Operation::Enable, change_id, snapshot)
    }

    /// Start tracking disabling the package in `snapshot`
    pub fn track_disable(&self, change_id: &str, snapshot: &RawSnapshot) -> TrackOutcome {
        self.track(Operation::Disable, change_id, snapshot)
    }

    /// Record `operation` for the package in `snapshot`.
    ///
    /// Repeating a call for the operation already being tracked never moves
    /// its deadline. Only a different operation, or a different non-empty
    /// change id, replaces the entry and starts a fresh deadline.
    pub fn track(
        &self,
        operation: Operation,
        change_id: &str,
        snapshot: &RawSnapshot,
    ) -> TrackOutcome {
        let steady = translate_status(&snapshot.status);
        if is_noop(operation, steady) {
            debug!(
                package = %snapshot.name,
                %operation,
                status = %steady,
                "not tracking operation, package already settled"
            );
            return TrackOutcome::Skipped;
        }

        let now = Instant::now();
        let mut previous = None;
        let outcome = {
            let mut entries = self.entries();
            match entries.entry(snapshot.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(TrackerEntry::new(operation, change_id, now, self.duration));
                    TrackOutcome::Created
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    if existing.is_expired(now) {
                        *existing = TrackerEntry::new(operation, change_id, now, self.duration);
                        TrackOutcome::Created
                    } else if existing.operation == operation
                        && (change_id.is_empty() || change_id == existing.change_id)
                    {
                        TrackOutcome::Unchanged
                    } else if existing.operation == operation && existing.change_id.is_empty() {
                        existing.change_id = change_id.to_string();
                        TrackOutcome::ChangeIdAdopted
                    } else {
                        previous = Some(existing.operation);
                        *existing = TrackerEntry::new(operation, change_id, now, self.duration);
                        TrackOutcome::Replaced
                    }
                }
            }
        };

        debug!(
            package = %snapshot.name,
            %operation,
            change_id,
            outcome = ?outcome,
            "tracking operation"
        );
        match outcome {
            TrackOutcome::Created => self.emit_tracker(TrackerEvent::Started {
                package: snapshot.name.clone(),
                operation,
                change_id: change_id.to_string(),
                deadline_in: self.duration,
            }),
            TrackOutcome::Replaced => self.emit_tracker(TrackerEvent::Replaced {
                package: snapshot.name.clone(),
                previous: previous.unwrap_or(operation),
                operation,
                change_id: change_id.to_string(),
            }),
            _ => {}
        }
        outcome
    }

    /// Compute the UI state for the package in `snapshot`.
    ///
    /// Without a tracked operation this is the steady translation of the
    /// raw status. A tracked operation that completed or expired is dropped
    /// and the steady translation is returned. Otherwise the operation's
    /// transient status is reported, with progress taken from `changes`
    /// when it knows the entry's change.
    pub fn state(&self, changes: Option<&dyn ChangeSource>, snapshot: &RawSnapshot) -> SnapState {
        let steady = translate_status(&snapshot.status);
        let now = Instant::now();

        let resolution = {
            let mut entries = self.entries();
            let Some(entry) = entries.get(&snapshot.name) else {
                return SnapState::steady(steady);
            };
            if has_operation_completed(entry.operation, steady) {
                entries
                    .remove(&snapshot.name)
                    .map(Resolution::Completed)
            } else if entry.is_expired(now) {
                entries.remove(&snapshot.name).map(Resolution::Expired)
            } else {
                Some(Resolution::Pending(SnapState::pending(
                    entry.operation,
                    entry.change_id.clone(),
                )))
            }
        };

        match resolution {
            Some(Resolution::Pending(mut state)) => {
                if let Some(source) = changes {
                    attach_progress(&mut state, source);
                }
                state
            }
            Some(Resolution::Completed(entry)) => {
                let elapsed = now.saturating_duration_since(entry.started);
                debug!(
                    package = %snapshot.name,
                    operation = %entry.operation,
                    change_id = %entry.change_id,
                    ?elapsed,
                    "tracked operation completed"
                );
                self.emit_tracker(TrackerEvent::Completed {
                    package: snapshot.name.clone(),
                    operation: entry.operation,
                    change_id: entry.change_id,
                    elapsed,
                });
                SnapState::steady(steady)
            }
            Some(Resolution::Expired(entry)) => {
                info!(
                    package = %snapshot.name,
                    operation = %entry.operation,
                    change_id = %entry.change_id,
                    status = %steady,
                    "tracked operation expired, falling back to daemon status"
                );
                self.emit_tracker(TrackerEvent::Expired {
                    package: snapshot.name.clone(),
                    operation: entry.operation,
                    change_id: entry.change_id,
                });
                SnapState::steady(steady)
            }
            None => SnapState::steady(steady),
        }
    }

    /// The live, not yet completed operation for the package in `snapshot`
    ///
    /// Read only: completed or expired entries are reported as untracked but
    /// left for the next [`state`](Self::state) call to discard.
    #[must_use]
    pub fn running_operation(&self, snapshot: &RawSnapshot) -> Option<TrackedOperation> {
        let steady = translate_status(&snapshot.status);
        let now = Instant::now();
        let entries = self.entries();
        entries
            .get(&snapshot.name)
            .filter(|entry| !entry.is_expired(now))
            .filter(|entry| !has_operation_completed(entry.operation, steady))
            .map(TrackerEntry::describe)
    }

    /// Whether an operation is running for the package, with its change id
    #[must_use]
    pub fn is_tracked_for_running_operation(&self, snapshot: &RawSnapshot) -> (bool, String) {
        match self.running_operation(snapshot) {
            Some(tracked) => (true, tracked.change_id),
            None => (false, String::new()),
        }
    }

    /// Forget any tracked operation for `name`.
    ///
    /// Returns whether an entry was removed.
    pub fn cancel_tracking_for(&self, name: &str) -> bool {
        let removed = self.entries().remove(name);
        let Some(entry) = removed else {
            return false;
        };
        debug!(package = name, operation = %entry.operation, "tracking cancelled");
        self.emit_tracker(TrackerEvent::Cancelled {
            package: name.to_string(),
            operation: entry.operation,
            change_id: entry.change_id,
        });
        true
    }

    /// Number of entries whose deadline has not passed
    #[must_use]
    pub fn active_count(&self) -> usize {
        let now = Instant::now();
        self.entries()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, TrackerEntry>> {
        // Critical sections never panic midway, so a poisoned map is intact.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKER_DURATION)
    }
}

impl EventEmitter for StateTracker {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }

    fn enrich_event_meta(&self, event: &AppEvent, meta: &mut EventMeta) {
        if let AppEvent::Tracker(tracker_event) = event {
            meta.correlation_id = Some(tracker_event.package().to_string());
        }
    }
}
