//! Integration tests for tracker crate

#[cfg(test)]
mod tests {
    use pkgweb_config::TrackerConfig;
    use pkgweb_tracker::*;
    use pkgweb_types::{Change, Operation, RawSnapshot, RawStatus, SnapState, Task, TaskStatus, UiStatus};
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_tracker_from_config() {
        let config = TrackerConfig { duration_ms: 1500 };
        let tracker = StateTracker::from_config(&config);
        assert_eq!(tracker.duration(), Duration::from_millis(1500));
        assert_eq!(StateTracker::default().duration(), DEFAULT_TRACKER_DURATION);
    }

    #[test]
    fn test_clones_share_entries() {
        let tracker = StateTracker::default();
        let view = tracker.clone();
        let snapshot = RawSnapshot::new("hello", RawStatus::Available);

        assert!(tracker.track_install("3", &snapshot).is_tracked());
        assert_eq!(
            view.running_operation(&snapshot),
            Some(TrackedOperation {
                operation: Operation::Install,
                change_id: "3".to_string(),
            })
        );
        assert!(view.cancel_tracking_for("hello"));
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn test_concurrent_tracking_queries_and_cancellation() {
        let tracker = StateTracker::default();
        let names: Vec<String> = (0..16).map(|i| format!("pkg-{i}")).collect();

        thread::scope(|scope| {
            for name in &names {
                let tracker = &tracker;
                scope.spawn(move || {
                    let snapshot = RawSnapshot::new(name.as_str(), RawStatus::Available);
                    for _ in 0..50 {
                        tracker.track_install("", &snapshot);
                        let state = tracker.state(None, &snapshot);
                        assert!(
                            matches!(state.status, UiStatus::Installing | UiStatus::Uninstalled),
                            "unexpected status {}",
                            state.status
                        );
                        let (tracked, change_id) =
                            tracker.is_tracked_for_running_operation(&snapshot);
                        if !tracked {
                            assert!(change_id.is_empty());
                        }
                    }
                });
                scope.spawn(move || {
                    for _ in 0..50 {
                        tracker.cancel_tracking_for(name);
                        thread::yield_now();
                    }
                });
            }
        });

        assert!(tracker.active_count() <= names.len());

        // whatever the interleaving, the map is consistent afterwards
        for name in &names {
            let snapshot = RawSnapshot::new(name.as_str(), RawStatus::Available);
            tracker.track_install("7", &snapshot);
            assert_eq!(
                tracker.state(None, &snapshot),
                SnapState::pending(Operation::Install, "7")
            );
        }
        assert_eq!(tracker.active_count(), names.len());

        thread::scope(|scope| {
            for name in &names {
                let tracker = &tracker;
                scope.spawn(move || {
                    let snapshot = RawSnapshot::new(name.as_str(), RawStatus::Installed);
                    assert_eq!(
                        tracker.state(None, &snapshot),
                        SnapState::steady(UiStatus::Installed)
                    );
                });
            }
        });

        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn test_progress_from_change_map() {
        let tracker = StateTracker::default();
        let snapshot = RawSnapshot::new("hello", RawStatus::Active);
        tracker.track_uninstall("12", &snapshot);

        let mut changes = HashMap::new();
        changes.insert(
            "12".to_string(),
            Change::new(
                "12",
                vec![
                    Task::new("Remove data", TaskStatus::Done, 1),
                    Task::new("Unlink", TaskStatus::Undoing, 4),
                ],
            ),
        );

        let state = tracker.state(Some(&changes), &snapshot);
        assert_eq!(state.status, UiStatus::Uninstalling);
        assert_eq!(state.change_id, "12");
        assert_eq!(state.progress_size, Some(4));
        assert_eq!(state.progress_summary.as_deref(), Some("Unlink"));

        // no change known for the id: status only
        let empty: HashMap<String, Change> = HashMap::new();
        let state = tracker.state(Some(&empty), &snapshot);
        assert_eq!(state, SnapState::pending(Operation::Uninstall, "12"));
    }

    #[test]
    fn test_expired_entry_can_be_tracked_again() {
        let tracker = StateTracker::new(Duration::from_millis(100));
        let snapshot = RawSnapshot::new("hello", RawStatus::Installed);
        assert_eq!(tracker.track_enable("", &snapshot), TrackOutcome::Created);

        thread::sleep(Duration::from_millis(200));
        assert_eq!(tracker.active_count(), 0);
        assert_eq!(tracker.track_enable("", &snapshot), TrackOutcome::Created);
        assert_eq!(
            tracker.state(None, &snapshot),
            SnapState::pending(Operation::Enable, "")
        );
    }

    fn raw_status() -> impl Strategy<Value = RawStatus> {
        prop_oneof![
            Just(RawStatus::NotPresent),
            Just(RawStatus::Available),
            Just(RawStatus::Installed),
            Just(RawStatus::Active),
            Just(RawStatus::Removed),
            Just(RawStatus::Priced),
            "[a-z]{1,12}".prop_map(RawStatus::from),
        ]
    }

    proptest! {
        #[test]
        fn untracked_state_is_translation(status in raw_status()) {
            let tracker = StateTracker::default();
            let snapshot = RawSnapshot::new("pkg", status.clone());
            let state = tracker.state(None, &snapshot);
            prop_assert_eq!(state, SnapState::steady(translate_status(&status)));
        }

        #[test]
        fn noop_tracking_never_creates_entries(status in raw_status()) {
            let tracker = StateTracker::default();
            let snapshot = RawSnapshot::new("pkg", status.clone());
            let steady = translate_status(&status);
            for operation in [Operation::Install, Operation::Uninstall, Operation::Enable, Operation::Disable] {
                let outcome = tracker.track(operation, "", &snapshot);
                prop_assert_eq!(outcome == TrackOutcome::Skipped, is_noop(operation, steady));
                tracker.cancel_tracking_for("pkg");
            }
            prop_assert_eq!(tracker.active_count(), 0);
        }
    }
}
