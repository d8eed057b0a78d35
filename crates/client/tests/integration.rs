//! Integration tests for client crate

#[cfg(test)]
mod tests {
    use pkgweb_client::*;
    use pkgweb_types::{Change, Operation, RawSnapshot, RawStatus, Task, TaskStatus};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_client_as_trait_object() {
        let memory = MemoryClient::new()
            .with_package(RawSnapshot::new("hello", RawStatus::Available).with_version("1.0"));
        let client: Arc<dyn PackageClient> = Arc::new(memory.clone());

        let change_id = client.submit(Operation::Install, "hello").await.unwrap();
        assert_eq!(client.change(&change_id).await.unwrap().id, change_id);

        memory.set_status("hello", RawStatus::Installed).unwrap();
        let snapshot = client.snapshot("hello").await.unwrap();
        assert_eq!(snapshot.status, RawStatus::Installed);
        assert_eq!(snapshot.version, "1.0");
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let client = MemoryClient::new()
            .with_package(RawSnapshot::new("zsh", RawStatus::Active))
            .with_package(RawSnapshot::new("bash", RawStatus::Installed))
            .with_package(RawSnapshot::new("fish", RawStatus::Available));
        let names: Vec<_> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|snapshot| snapshot.name)
            .collect();
        assert_eq!(names, ["bash", "fish", "zsh"]);
    }

    #[tokio::test]
    async fn test_registered_change_blocks_requests_until_ready() {
        let client =
            MemoryClient::new().with_package(RawSnapshot::new("hello", RawStatus::Installed));
        client.insert_change(
            "hello",
            Change::new("refresh-1", vec![Task::new("Refresh", TaskStatus::Doing, 1)]),
        );

        let err = client.enable("hello").await.unwrap_err();
        assert!(err.as_client().is_some());

        client.set_status("hello", RawStatus::Installed).unwrap();
        let change_id = client.enable("hello").await.unwrap();
        assert_eq!(client.requests().len(), 1);
        assert_eq!(client.requests()[0].change_id, change_id);
    }
}
