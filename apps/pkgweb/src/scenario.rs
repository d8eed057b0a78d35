//! Scenario replay against the in-memory package daemon
//!
//! A scenario seeds packages and then runs a list of steps, for example:
//!
//! ```json
//! {
//!   "tracker-duration-ms": 1000,
//!   "packages": [{ "name": "hello", "status": "available" }],
//!   "steps": [
//!     { "step": "install", "package": "hello" },
//!     { "step": "progress", "change": "1", "task": 0, "status": "Doing", "done": 40 },
//!     { "step": "query", "package": "hello" },
//!     { "step": "set-status", "package": "hello", "status": "installed" },
//!     { "step": "query" }
//!   ]
//! }
//! ```

use pkgweb_client::MemoryClient;
use pkgweb_errors::{Error, OpsError};
use pkgweb_ops::{ListFilter, OperationResult, OpsCtx};
use pkgweb_types::{Operation, RawSnapshot, RawStatus, TaskStatus};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// A replayable sequence of daemon interactions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Scenario {
    /// Overrides `[tracker] duration_ms` for this run
    #[serde(default)]
    pub tracker_duration_ms: Option<u64>,
    #[serde(default)]
    pub packages: Vec<RawSnapshot>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Step {
    Install {
        package: String,
    },
    Remove {
        package: String,
    },
    Enable {
        package: String,
    },
    Disable {
        package: String,
    },
    Cancel {
        package: String,
    },
    /// The daemon moves a package to a new status
    SetStatus {
        package: String,
        status: RawStatus,
    },
    /// The daemon reports progress on one task of a change
    Progress {
        change: String,
        task: usize,
        status: TaskStatus,
        done: u64,
    },
    /// Wait; without `ms` the configured poll interval is used
    Sleep {
        #[serde(default)]
        ms: Option<u64>,
    },
    /// Report one package, or every package passing the filter
    Query {
        #[serde(default)]
        package: Option<String>,
        #[serde(default)]
        installed_only: bool,
        #[serde(default)]
        types: Option<String>,
        #[serde(default)]
        query: Option<String>,
    },
}

impl Scenario {
    /// Load a scenario from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scenario.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(&e, path))?;
        Self::parse(&contents)
    }

    /// Parse a scenario from JSON text
    ///
    /// # Errors
    ///
    /// Returns `InvalidScenario` if the text does not describe a scenario.
    pub fn parse(contents: &str) -> Result<Self, Error> {
        serde_json::from_str(contents).map_err(|e| {
            OpsError::InvalidScenario {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// In-memory daemon seeded with this scenario's packages
    pub fn client(&self) -> MemoryClient {
        let client = MemoryClient::new();
        for snapshot in &self.packages {
            client.add_package(snapshot.clone());
        }
        client
    }
}

/// Run every step in order and collect what each step reports.
///
/// Daemon refusals of a request are results, not failures: they are
/// reported as responses and the replay continues. Steps that manipulate
/// the daemon directly fail the replay when they name something unknown.
///
/// # Errors
///
/// Returns an error if a `set-status` or `progress` step is invalid, or a
/// query fails.
pub async fn replay(
    ctx: &OpsCtx,
    client: &MemoryClient,
    steps: &[Step],
    poll_interval: Duration,
) -> Result<Vec<OperationResult>, Error> {
    let mut results = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "replaying step");
        match step {
            Step::Install { package } => {
                results.push(request(ctx, Operation::Install, package).await);
            }
            Step::Remove { package } => {
                results.push(request(ctx, Operation::Uninstall, package).await);
            }
            Step::Enable { package } => {
                results.push(request(ctx, Operation::Enable, package).await);
            }
            Step::Disable { package } => {
                results.push(request(ctx, Operation::Disable, package).await);
            }
            Step::Cancel { package } => {
                let message = if pkgweb_ops::cancel(ctx, package) {
                    format!("Stopped tracking {package}")
                } else {
                    format!("Nothing tracked for {package}")
                };
                results.push(OperationResult::Success(message));
            }
            Step::SetStatus { package, status } => {
                client.set_status(package, status.clone())?;
            }
            Step::Progress {
                change,
                task,
                status,
                done,
            } => {
                client.set_task(change, *task, *status, *done)?;
            }
            Step::Sleep { ms } => {
                let wait = ms.map_or(poll_interval, Duration::from_millis);
                tokio::time::sleep(wait).await;
            }
            Step::Query {
                package: Some(package),
                ..
            } => {
                let payload = pkgweb_ops::package_state(ctx, package).await?;
                results.push(OperationResult::PackageState(payload));
            }
            Step::Query {
                package: None,
                installed_only,
                types,
                query,
            } => {
                let mut filter = ListFilter {
                    installed_only: *installed_only,
                    ..ListFilter::default()
                };
                if let Some(types) = types {
                    filter = filter.with_types(types);
                }
                if let Some(query) = query {
                    filter = filter.with_query(query.clone());
                }
                let payloads = pkgweb_ops::list_packages(ctx, &filter).await?;
                results.push(OperationResult::PackageList(payloads));
            }
        }
    }
    Ok(results)
}

async fn request(ctx: &OpsCtx, operation: Operation, package: &str) -> OperationResult {
    let result = match operation {
        Operation::Install => pkgweb_ops::install(ctx, package).await,
        Operation::Uninstall => pkgweb_ops::uninstall(ctx, package).await,
        Operation::Enable => pkgweb_ops::enable(ctx, package).await,
        Operation::Disable => pkgweb_ops::disable(ctx, package).await,
    };
    OperationResult::Response(pkgweb_ops::respond(package, &result))
}
