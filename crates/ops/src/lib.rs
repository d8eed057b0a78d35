#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for pkgweb
//!
//! This crate is the layer a request handler talks to. It combines the
//! package daemon client with the shared operation state tracker: requests
//! go to the daemon and are recorded with the tracker, queries fold the
//! tracked operation into the daemon's snapshot.

mod context;
mod package_ops;
mod query;
mod response;
mod types;

pub use context::{OpsContextBuilder, OpsCtx};
pub use package_ops::{cancel, disable, enable, install, uninstall};
pub use query::{list_packages, package_state};
pub use response::{respond, Response};
pub use types::{ListFilter, PackagePayload};

use pkgweb_errors::Error;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// One package
    PackageState(PackagePayload),
    /// Filtered package list
    PackageList(Vec<PackagePayload>),
    /// Outcome of a state-changing request
    Response(Response),
    /// Generic success message
    Success(String),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| {
            pkgweb_errors::OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Check if this is a success result
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::Response(response) => response.status < 400,
            OperationResult::PackageState(_)
            | OperationResult::PackageList(_)
            | OperationResult::Success(_) => true,
        }
    }
}
