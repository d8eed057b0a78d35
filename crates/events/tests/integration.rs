//! Integration tests for events

#[cfg(test)]
mod tests {
    use pkgweb_events::*;
    use pkgweb_types::Operation;

    #[tokio::test]
    async fn test_event_sender_emit() {
        let (tx, mut rx) = channel();

        tx.emit_warning("change lookup failed", "hello change 3");
        tx.emit_operation_started("install hello");

        let first = rx.recv().await.unwrap();
        match first.event {
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                assert_eq!(message, "change lookup failed");
                assert_eq!(context.as_deref(), Some("hello change 3"));
            }
            other => panic!("expected warning, got {other:?}"),
        }
        assert_eq!(first.meta.level, EventLevel::Warn);
        assert_eq!(first.meta.source, EventSource::GENERAL);
        assert!(first.meta.correlation_id.is_none());

        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second.event,
            AppEvent::General(GeneralEvent::OperationStarted { .. })
        ));
        assert_eq!(second.meta.level, EventLevel::Info);
        assert_ne!(first.meta.event_id, second.meta.event_id);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_operation_started("ignored");
    }

    #[tokio::test]
    async fn test_tracker_expiry_is_info() {
        let (tx, mut rx) = channel();
        tx.emit_tracker(TrackerEvent::Expired {
            package: "hello".into(),
            operation: Operation::Install,
            change_id: "3".into(),
        });

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.level, EventLevel::Info);
        assert_eq!(message.meta.source, EventSource::TRACKER);
        match message.event {
            AppEvent::Tracker(event) => assert_eq!(event.package(), "hello"),
            other => panic!("expected tracker event, got {other:?}"),
        }
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = AppEvent::Tracker(TrackerEvent::Cancelled {
            package: "hello".into(),
            operation: Operation::Disable,
            change_id: String::new(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "tracker");
        assert_eq!(json["event"]["type"], "Cancelled");
        assert_eq!(json["event"]["operation"], "disable");
    }
}
