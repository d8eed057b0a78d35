use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Request lifecycle and diagnostics not tied to one tracked entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    /// Something degraded the answer without failing it
    Warning {
        message: String,
        context: Option<String>,
    },

    /// Operation handed to the package daemon
    OperationStarted { operation: String },

    /// Operation rejected locally or by the daemon
    OperationFailed {
        operation: String,
        failure: FailureContext,
    },
}
