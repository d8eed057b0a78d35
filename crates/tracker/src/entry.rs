//! Per-package tracker entries

use pkgweb_types::Operation;
use std::time::{Duration, Instant};

/// One outstanding operation for one package
#[derive(Debug, Clone)]
pub(crate) struct TrackerEntry {
    pub(crate) operation: Operation,
    pub(crate) change_id: String,
    pub(crate) started: Instant,
    pub(crate) deadline: Instant,
}

impl TrackerEntry {
    pub(crate) fn new(operation: Operation, change_id: &str, now: Instant, ttl: Duration) -> Self {
        Self {
            operation,
            change_id: change_id.to_string(),
            started: now,
            deadline: now + ttl,
        }
    }

    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub(crate) fn describe(&self) -> TrackedOperation {
        TrackedOperation {
            operation: self.operation,
            change_id: self.change_id.clone(),
        }
    }
}

/// Public view of a live tracker entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedOperation {
    pub operation: Operation,
    /// Daemon change driving the operation, empty if the caller had none
    pub change_id: String,
}
