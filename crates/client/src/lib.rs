#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Package daemon client seam
//!
//! [`PackageClient`] is everything pkgweb needs from the package daemon:
//! snapshots, change records and the four state-changing requests. The
//! real daemon wire protocol lives outside this workspace; [`MemoryClient`]
//! is a faithful in-process stand-in used by tests and the CLI replay.

mod memory;

pub use memory::{MemoryClient, Request};

use pkgweb_errors::Error;
use pkgweb_types::{Change, Operation, RawSnapshot};

#[async_trait::async_trait]
pub trait PackageClient: Send + Sync {
    /// Current snapshot of a single package
    async fn snapshot(&self, name: &str) -> Result<RawSnapshot, Error>;

    /// Snapshots of every package the daemon knows about
    async fn list(&self) -> Result<Vec<RawSnapshot>, Error>;

    /// Change record for a daemon change id
    async fn change(&self, id: &str) -> Result<Change, Error>;

    /// Ask the daemon to install a package, returning the change id
    async fn install(&self, name: &str) -> Result<String, Error>;

    /// Ask the daemon to remove a package, returning the change id
    async fn remove(&self, name: &str) -> Result<String, Error>;

    /// Ask the daemon to enable a package, returning the change id
    async fn enable(&self, name: &str) -> Result<String, Error>;

    /// Ask the daemon to disable a package, returning the change id
    async fn disable(&self, name: &str) -> Result<String, Error>;

    /// Dispatch `operation` to the matching request
    async fn submit(&self, operation: Operation, name: &str) -> Result<String, Error> {
        match operation {
            Operation::Install => self.install(name).await,
            Operation::Uninstall => self.remove(name).await,
            Operation::Enable => self.enable(name).await,
            Operation::Disable => self.disable(name).await,
        }
    }
}
