//! Translation from daemon snapshots to UI states

use pkgweb_types::{Operation, RawStatus, UiStatus};

/// Map a raw daemon status onto the steady UI status
#[must_use]
pub fn translate_status(status: &RawStatus) -> UiStatus {
    match status {
        RawStatus::Installed => UiStatus::Installed,
        RawStatus::Active => UiStatus::Active,
        RawStatus::Available | RawStatus::Removed | RawStatus::NotPresent => UiStatus::Uninstalled,
        RawStatus::Priced => UiStatus::Priced,
        RawStatus::Unrecognized(raw) => {
            tracing::warn!(status = %raw, "unrecognized package status");
            UiStatus::Error
        }
    }
}

/// Whether the steady status shows that `operation` reached its target
#[must_use]
pub fn has_operation_completed(operation: Operation, steady: UiStatus) -> bool {
    match operation {
        Operation::Install => matches!(steady, UiStatus::Installed | UiStatus::Active),
        Operation::Uninstall => steady == UiStatus::Uninstalled,
        Operation::Enable => steady == UiStatus::Active,
        Operation::Disable => steady == UiStatus::Installed,
    }
}

/// Whether tracking `operation` from `steady` would never show anything
///
/// Install and uninstall are no-ops once the target is already reached.
/// Enable and disable additionally require the package to be present.
#[must_use]
pub fn is_noop(operation: Operation, steady: UiStatus) -> bool {
    match operation {
        Operation::Install => matches!(steady, UiStatus::Installed | UiStatus::Active),
        Operation::Uninstall => steady == UiStatus::Uninstalled,
        Operation::Enable => matches!(steady, UiStatus::Active | UiStatus::Uninstalled),
        Operation::Disable => matches!(steady, UiStatus::Installed | UiStatus::Uninstalled),
    }
}
