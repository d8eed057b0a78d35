//! In-memory package daemon

use crate::PackageClient;
use pkgweb_errors::{ClientError, Error};
use pkgweb_types::{Change, Operation, RawSnapshot, RawStatus, Task, TaskStatus};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// A state-changing request accepted by the [`MemoryClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub operation: Operation,
    pub package: String,
    pub change_id: String,
}

#[derive(Debug, Default)]
struct Inner {
    packages: BTreeMap<String, RawSnapshot>,
    changes: HashMap<String, Change>,
    /// package name -> ids of its changes, oldest first
    owned: HashMap<String, Vec<String>>,
    next_change: u64,
    requests: Vec<Request>,
    fail_next: Option<ClientError>,
}

impl Inner {
    fn package(&self, name: &str) -> Result<&RawSnapshot, ClientError> {
        self.packages
            .get(name)
            .ok_or_else(|| ClientError::PackageNotFound {
                name: name.to_string(),
            })
    }

    fn pending_change_for(&self, name: &str) -> Option<&str> {
        self.owned
            .get(name)?
            .iter()
            .map(String::as_str)
            .find(|id| self.changes.get(*id).is_some_and(|change| !change.ready))
    }

    /// Forget the package's ready changes; a new change supersedes them
    fn prune_ready(&mut self, name: &str) {
        let Some(ids) = self.owned.get_mut(name) else {
            return;
        };
        let changes = &mut self.changes;
        ids.retain(|id| {
            let ready = changes.get(id).map(|change| change.ready);
            if ready == Some(true) {
                changes.remove(id);
            }
            ready == Some(false)
        });
    }

    fn own(&mut self, name: &str, id: &str) {
        let ids = self.owned.entry(name.to_string()).or_default();
        if !ids.iter().any(|owned| owned == id) {
            ids.push(id.to_string());
        }
    }

    fn check_preconditions(&self, operation: Operation, name: &str) -> Result<(), ClientError> {
        let snapshot = self.package(name)?;
        if let Some(change_id) = self.pending_change_for(name) {
            return Err(ClientError::OperationInProgress {
                name: name.to_string(),
                change_id: change_id.to_string(),
            });
        }

        let name = name.to_string();
        match (operation, &snapshot.status) {
            (Operation::Install, RawStatus::Installed | RawStatus::Active) => {
                Err(ClientError::AlreadyInstalled { name })
            }
            (Operation::Uninstall | Operation::Enable | Operation::Disable, _)
                if !snapshot.is_installed() =>
            {
                Err(ClientError::NotInstalled { name })
            }
            (Operation::Enable, RawStatus::Active) => Err(ClientError::AlreadyActive { name }),
            (Operation::Disable, RawStatus::Installed) => Err(ClientError::NotActive { name }),
            _ => Ok(()),
        }
    }

    fn open_change(&mut self, operation: Operation, name: &str) -> String {
        self.next_change += 1;
        let id = self.next_change.to_string();

        let steps: &[&str] = match operation {
            Operation::Install => &["Download package", "Mount package", "Run install hook"],
            Operation::Uninstall => &["Run remove hook", "Unmount package", "Discard package"],
            Operation::Enable => &["Link package", "Start services"],
            Operation::Disable => &["Stop services", "Unlink package"],
        };
        let tasks = steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let status = if index == 0 {
                    TaskStatus::Doing
                } else {
                    TaskStatus::Do
                };
                let mut task = Task::new(format!("{step} \"{name}\""), status, 0);
                task.id = format!("{id}.{index}");
                task
            })
            .collect();

        let mut change = Change::new(id.clone(), tasks);
        change.kind = format!("{operation}-package");
        change.summary = format!("{operation} \"{name}\"");

        self.prune_ready(name);
        self.changes.insert(id.clone(), change);
        self.own(name, &id);
        self.requests.push(Request {
            operation,
            package: name.to_string(),
            change_id: id.clone(),
        });
        id
    }
}

/// Thread-safe in-process package daemon.
///
/// Requests are validated the way the daemon validates them and open a
/// change, but package statuses only move when the owner calls
/// [`set_status`](Self::set_status). That makes the gap between "request
/// accepted" and "daemon reports the new state" fully controllable.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a package
    #[must_use]
    pub fn with_package(self, snapshot: RawSnapshot) -> Self {
        self.add_package(snapshot);
        self
    }

    /// Add or overwrite a package snapshot
    pub fn add_package(&self, snapshot: RawSnapshot) {
        self.inner()
            .packages
            .insert(snapshot.name.clone(), snapshot);
    }

    /// Move a package to a new raw status.
    ///
    /// Every open change for the package is marked ready with all of its
    /// tasks done. Ready changes stay readable until the package's next
    /// request opens a new change.
    ///
    /// # Errors
    ///
    /// Returns `PackageNotFound` if the package was never seeded.
    pub fn set_status(&self, name: &str, status: RawStatus) -> Result<(), Error> {
        let mut inner = self.inner();
        let snapshot = inner
            .packages
            .get_mut(name)
            .ok_or_else(|| ClientError::PackageNotFound {
                name: name.to_string(),
            })?;
        debug!(package = name, from = %snapshot.status, to = %status, "package status changed");
        snapshot.status = status;

        let Inner { changes, owned, .. } = &mut *inner;
        for id in owned.get(name).into_iter().flatten() {
            if let Some(change) = changes.get_mut(id) {
                change.ready = true;
                for task in &mut change.tasks {
                    task.status = TaskStatus::Done;
                }
            }
        }
        Ok(())
    }

    /// Update one task of a change
    ///
    /// # Errors
    ///
    /// Returns `ChangeNotFound` if the change or the task index is unknown.
    pub fn set_task(
        &self,
        change_id: &str,
        index: usize,
        status: TaskStatus,
        done: u64,
    ) -> Result<(), Error> {
        let mut inner = self.inner();
        let task = inner
            .changes
            .get_mut(change_id)
            .and_then(|change| change.tasks.get_mut(index))
            .ok_or_else(|| ClientError::ChangeNotFound {
                id: change_id.to_string(),
            })?;
        task.status = status;
        task.progress.done = done;
        Ok(())
    }

    /// Register a change record for a package
    pub fn insert_change(&self, package: &str, change: Change) {
        let mut inner = self.inner();
        inner.own(package, &change.id);
        inner.changes.insert(change.id.clone(), change);
    }

    /// Make the next request fail with `error`
    pub fn fail_next(&self, error: ClientError) {
        self.inner().fail_next = Some(error);
    }

    /// Requests accepted so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.inner().requests.clone()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request(&self, operation: Operation, name: &str) -> Result<String, Error> {
        let mut inner = self.inner();
        if let Some(error) = inner.fail_next.take() {
            debug!(package = name, %operation, %error, "injected failure");
            return Err(error.into());
        }
        inner.check_preconditions(operation, name)?;
        let change_id = inner.open_change(operation, name);
        debug!(package = name, %operation, change_id = %change_id, "request accepted");
        Ok(change_id)
    }
}

#[async_trait::async_trait]
impl PackageClient for MemoryClient {
    async fn snapshot(&self, name: &str) -> Result<RawSnapshot, Error> {
        let inner = self.inner();
        Ok(inner.package(name)?.clone())
    }

    async fn list(&self) -> Result<Vec<RawSnapshot>, Error> {
        Ok(self.inner().packages.values().cloned().collect())
    }

    async fn change(&self, id: &str) -> Result<Change, Error> {
        self.inner()
            .changes
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::ChangeNotFound { id: id.to_string() }.into())
    }

    async fn install(&self, name: &str) -> Result<String, Error> {
        self.request(Operation::Install, name)
    }

    async fn remove(&self, name: &str) -> Result<String, Error> {
        self.request(Operation::Uninstall, name)
    }

    async fn enable(&self, name: &str) -> Result<String, Error> {
        self.request(Operation::Enable, name)
    }

    async fn disable(&self, name: &str) -> Result<String, Error> {
        self.request(Operation::Disable, name)
    }
}
