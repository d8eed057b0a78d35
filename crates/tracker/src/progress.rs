//! Correlating tracked operations with daemon change records

use pkgweb_types::{Change, SnapState};
use std::collections::HashMap;

/// Read-only access to the daemon's change records
///
/// The tracker calls this outside of its lock, so implementations may be
/// as slow as a cache lookup but must not block on the daemon.
pub trait ChangeSource {
    /// Change record for `id`, if one is known
    fn change(&self, id: &str) -> Option<Change>;
}

impl ChangeSource for Change {
    fn change(&self, id: &str) -> Option<Change> {
        (self.id == id).then(|| self.clone())
    }
}

impl<T: ChangeSource> ChangeSource for Option<T> {
    fn change(&self, id: &str) -> Option<Change> {
        self.as_ref().and_then(|source| source.change(id))
    }
}

impl ChangeSource for HashMap<String, Change> {
    fn change(&self, id: &str) -> Option<Change> {
        self.get(id).cloned()
    }
}

impl ChangeSource for Vec<Change> {
    fn change(&self, id: &str) -> Option<Change> {
        self.iter().find(|change| change.id == id).cloned()
    }
}

/// Fill the progress fields of a pending state from its change record
pub(crate) fn attach_progress(state: &mut SnapState, source: &dyn ChangeSource) {
    if state.change_id.is_empty() {
        return;
    }
    let Some(change) = source.change(&state.change_id) else {
        return;
    };
    // A source handing back some other change is treated as having none.
    if change.id != state.change_id {
        return;
    }
    if let Some(task) = change.current_task() {
        state.progress_size = Some(task.progress.done);
        state.progress_summary = Some(task.summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgweb_types::{Operation, Task, TaskStatus};

    fn download_change(id: &str) -> Change {
        Change::new(
            id,
            vec![
                Task::new("Download", TaskStatus::Doing, 2),
                Task::new("Mount", TaskStatus::Do, 0),
            ],
        )
    }

    #[test]
    fn progress_comes_from_running_task() {
        let mut state = SnapState::pending(Operation::Install, "ID");
        attach_progress(&mut state, &download_change("ID"));
        assert_eq!(state.progress_size, Some(2));
        assert_eq!(state.progress_summary.as_deref(), Some("Download"));
    }

    #[test]
    fn mismatched_change_is_ignored() {
        let mut state = SnapState::pending(Operation::Install, "ID");
        attach_progress(&mut state, &download_change("OTHER"));
        assert_eq!(state, SnapState::pending(Operation::Install, "ID"));
    }

    #[test]
    fn empty_change_id_skips_lookup() {
        let mut changes = HashMap::new();
        changes.insert(String::new(), download_change(""));
        let mut state = SnapState::pending(Operation::Enable, "");
        attach_progress(&mut state, &changes);
        assert!(state.progress_size.is_none());
    }

    #[test]
    fn vec_and_option_sources() {
        let changes = vec![download_change("1"), download_change("2")];
        assert!(changes.change("2").is_some());
        assert!(changes.change("3").is_none());

        let none: Option<Change> = None;
        assert!(none.change("1").is_none());
        assert!(Some(download_change("1")).change("1").is_some());
    }
}
