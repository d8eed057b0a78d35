use pkgweb_types::Operation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle of tracker entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrackerEvent {
    /// An entry was created for a package
    Started {
        package: String,
        operation: Operation,
        change_id: String,
        deadline_in: Duration,
    },

    /// A live entry was overwritten by a different operation
    Replaced {
        package: String,
        previous: Operation,
        operation: Operation,
        change_id: String,
    },

    /// The daemon reports the operation's target state
    Completed {
        package: String,
        operation: Operation,
        change_id: String,
        elapsed: Duration,
    },

    /// The entry outlived its deadline without completing
    Expired {
        package: String,
        operation: Operation,
        change_id: String,
    },

    /// The caller dropped the entry
    Cancelled {
        package: String,
        operation: Operation,
        change_id: String,
    },
}

impl TrackerEvent {
    /// Package the event refers to
    #[must_use]
    pub fn package(&self) -> &str {
        match self {
            Self::Started { package, .. }
            | Self::Replaced { package, .. }
            | Self::Completed { package, .. }
            | Self::Expired { package, .. }
            | Self::Cancelled { package, .. } => package,
        }
    }
}
