//! State-changing package operations
//!
//! Each operation refuses to start while the tracker still shows another
//! operation running for the package, checks the package's steady status
//! against the request, hands the request to the daemon and finally records
//! the returned change with the tracker so later queries report the
//! transient status.

use crate::OpsCtx;
use pkgweb_errors::{ClientError, Error, OpsError};
use pkgweb_events::{EventEmitter, FailureContext};
use pkgweb_tracker::{translate_status, TrackOutcome};
use pkgweb_types::{Operation, RawSnapshot, UiStatus};
use tracing::{debug, warn};

/// Ask the daemon to install a package
///
/// # Errors
///
/// Returns `OperationInProgress` while another operation is tracked for the
/// package, `AlreadyInstalled` if it is installed, or whatever the daemon
/// reports.
pub async fn install(ctx: &OpsCtx, name: &str) -> Result<String, Error> {
    perform(ctx, Operation::Install, name).await
}

/// Ask the daemon to remove a package
///
/// # Errors
///
/// Returns `OperationInProgress`, `NotInstalled`, or a daemon error.
pub async fn uninstall(ctx: &OpsCtx, name: &str) -> Result<String, Error> {
    perform(ctx, Operation::Uninstall, name).await
}

/// Ask the daemon to enable a package
///
/// # Errors
///
/// Returns `OperationInProgress`, `NotInstalled`, `AlreadyActive`, or a
/// daemon error.
pub async fn enable(ctx: &OpsCtx, name: &str) -> Result<String, Error> {
    perform(ctx, Operation::Enable, name).await
}

/// Ask the daemon to disable a package
///
/// # Errors
///
/// Returns `OperationInProgress`, `NotInstalled`, `NotActive`, or a daemon
/// error.
pub async fn disable(ctx: &OpsCtx, name: &str) -> Result<String, Error> {
    perform(ctx, Operation::Disable, name).await
}

/// Stop showing a transient state for `name`
///
/// Returns whether anything was being tracked.
#[must_use]
pub fn cancel(ctx: &OpsCtx, name: &str) -> bool {
    ctx.tracker.cancel_tracking_for(name)
}

async fn perform(ctx: &OpsCtx, operation: Operation, name: &str) -> Result<String, Error> {
    if name.is_empty() {
        return Err(OpsError::NoPackageSpecified.into());
    }

    let label = format!("{operation} {name}");
    ctx.emit_operation_started(label.clone());

    let result = submit(ctx, operation, name).await;
    if let Err(err) = &result {
        ctx.emit_operation_failed(label, FailureContext::from_error(err));
    }
    result
}

/// Hand one request to the daemon and track the change it opens.
///
/// The local in-progress check and the final `track` are not one atomic
/// step: two requests for the same package can both pass the check. The
/// daemon refuses every request while a change for the package is pending,
/// so it decides which one wins; the local check only saves a round trip.
async fn submit(ctx: &OpsCtx, operation: Operation, name: &str) -> Result<String, Error> {
    let snapshot = ctx.client.snapshot(name).await?;

    if let Some(running) = ctx.tracker.running_operation(&snapshot) {
        return Err(ClientError::OperationInProgress {
            name: snapshot.name,
            change_id: running.change_id,
        }
        .into());
    }
    check_request(operation, &snapshot)?;

    let change_id = ctx.client.submit(operation, name).await?;
    let outcome = ctx.tracker.track(operation, &change_id, &snapshot);
    if outcome == TrackOutcome::Replaced {
        warn!(package = name, change_id = %change_id, "daemon accepted a request over a tracked one");
    }
    debug!(change_id = %change_id, ?outcome, "daemon accepted request");
    Ok(change_id)
}

fn check_request(operation: Operation, snapshot: &RawSnapshot) -> Result<(), ClientError> {
    let steady = translate_status(&snapshot.status);
    let name = snapshot.name.clone();
    match (operation, steady) {
        (Operation::Install, UiStatus::Installed | UiStatus::Active) => {
            Err(ClientError::AlreadyInstalled { name })
        }
        (
            Operation::Uninstall | Operation::Enable | Operation::Disable,
            UiStatus::Uninstalled,
        ) => Err(ClientError::NotInstalled { name }),
        (Operation::Enable, UiStatus::Active) => Err(ClientError::AlreadyActive { name }),
        (Operation::Disable, UiStatus::Installed) => Err(ClientError::NotActive { name }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgweb_types::RawStatus;

    #[test]
    fn request_checks_follow_steady_status() {
        let cases = [
            (Operation::Install, RawStatus::Active, Some("client.already_installed")),
            (Operation::Install, RawStatus::Removed, None),
            (Operation::Uninstall, RawStatus::NotPresent, Some("client.not_installed")),
            (Operation::Uninstall, RawStatus::Active, None),
            (Operation::Enable, RawStatus::Active, Some("client.already_active")),
            (Operation::Enable, RawStatus::Installed, None),
            (Operation::Disable, RawStatus::Installed, Some("client.not_active")),
            (Operation::Disable, RawStatus::Available, Some("client.not_installed")),
            (Operation::Disable, RawStatus::Active, None),
        ];
        for (operation, status, code) in cases {
            let snapshot = RawSnapshot::new("hello", status.clone());
            let got = check_request(operation, &snapshot)
                .err()
                .and_then(|err| pkgweb_errors::UserFacingError::user_code(&err));
            assert_eq!(got, code, "{operation} from {status}");
        }
    }
}
