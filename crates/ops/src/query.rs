//! Package state queries

use crate::{ListFilter, OpsCtx, PackagePayload};
use pkgweb_errors::{Error, OpsError};
use pkgweb_events::EventEmitter;
use pkgweb_types::{Change, RawSnapshot};

/// Current UI state of one package
///
/// # Errors
///
/// Returns an error if the daemon cannot produce a snapshot for `name`.
pub async fn package_state(ctx: &OpsCtx, name: &str) -> Result<PackagePayload, Error> {
    if name.is_empty() {
        return Err(OpsError::NoPackageSpecified.into());
    }
    let snapshot = ctx.client.snapshot(name).await?;
    Ok(render(ctx, snapshot).await)
}

/// UI state of every package passing `filter`
///
/// # Errors
///
/// Returns an error if the daemon cannot list its packages.
pub async fn list_packages(ctx: &OpsCtx, filter: &ListFilter) -> Result<Vec<PackagePayload>, Error> {
    let snapshots = ctx.client.list().await?;
    let mut payloads = Vec::new();
    for snapshot in snapshots.into_iter().filter(|snapshot| filter.matches(snapshot)) {
        payloads.push(render(ctx, snapshot).await);
    }
    Ok(payloads)
}

async fn render(ctx: &OpsCtx, snapshot: RawSnapshot) -> PackagePayload {
    let change = tracked_change(ctx, &snapshot).await;
    let state = ctx.tracker.state(Some(&change), &snapshot);
    PackagePayload::new(snapshot, state)
}

/// Fetch the change record behind a tracked operation, if there is one.
///
/// A failing lookup only costs the progress fields; it is reported as a
/// warning event and the state is rendered without progress.
async fn tracked_change(ctx: &OpsCtx, snapshot: &RawSnapshot) -> Option<Change> {
    let running = ctx.tracker.running_operation(snapshot)?;
    if running.change_id.is_empty() {
        return None;
    }
    match ctx.client.change(&running.change_id).await {
        Ok(change) => Some(change),
        Err(err) => {
            ctx.emit_warning(
                format!("change lookup failed: {err}"),
                format!("package {} change {}", snapshot.name, running.change_id),
            );
            None
        }
    }
}
