//! Integration tests for types

#[cfg(test)]
mod tests {
    use pkgweb_types::*;

    #[test]
    fn test_snapshot_roundtrip_from_daemon_json() {
        let json = r#"{
            "name": "hello-world",
            "status": "active",
            "version": "6.4",
            "type": "app",
            "installed_size": 20480
        }"#;
        let snap: RawSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.name, "hello-world");
        assert_eq!(snap.status, RawStatus::Active);
        assert_eq!(snap.installed_size, 20480);
        assert!(snap.is_installed());
    }

    #[test]
    fn test_change_from_daemon_json() {
        let json = r#"{
            "id": "12",
            "kind": "install-snap",
            "ready": false,
            "tasks": [
                {"summary": "Download", "status": "Doing", "progress": {"done": 512, "total": 1024}},
                {"summary": "Mount", "status": "Do"}
            ]
        }"#;
        let change: Change = serde_json::from_str(json).unwrap();
        let task = change.current_task().unwrap();
        assert_eq!(task.summary, "Download");
        assert_eq!(task.progress.done, 512);
    }

    #[test]
    fn test_transient_status_mapping() {
        assert_eq!(Operation::Install.transient_status(), UiStatus::Installing);
        assert_eq!(
            Operation::Uninstall.transient_status(),
            UiStatus::Uninstalling
        );
        assert_eq!(Operation::Enable.transient_status(), UiStatus::Enabling);
        assert_eq!(Operation::Disable.transient_status(), UiStatus::Disabling);
        assert!(!UiStatus::Priced.is_transient());
    }
}
