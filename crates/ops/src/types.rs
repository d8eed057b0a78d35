//! Types for operations and results

use pkgweb_types::{PackageType, RawSnapshot, SnapState, UiStatus};
use serde::Serialize;
use tracing::warn;

/// A package as rendered to the UI: daemon facts plus the tracked state
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePayload {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub installed_size: u64,
    pub download_size: u64,
    #[serde(flatten)]
    pub state: SnapState,
    /// Set when the daemon reported a status pkgweb does not understand
    pub is_error: bool,
}

impl PackagePayload {
    #[must_use]
    pub fn new(snapshot: RawSnapshot, state: SnapState) -> Self {
        let is_error = state.status == UiStatus::Error;
        Self {
            name: snapshot.name,
            version: snapshot.version,
            package_type: snapshot.package_type,
            installed_size: snapshot.installed_size,
            download_size: snapshot.download_size,
            state,
            is_error,
        }
    }
}

/// Which packages `list_packages` returns
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only packages the daemon reports as installed or active
    pub installed_only: bool,
    /// Restrict to these package types; `None` means every type and an
    /// empty list matches nothing
    pub types: Option<Vec<PackageType>>,
    /// Case-insensitive substring the package name must contain
    pub query: Option<String>,
}

impl ListFilter {
    /// Set the type restriction from a comma separated list such as
    /// `"app,gadget"`. Unknown entries are skipped, so a list naming only
    /// unknown types matches no package. A blank list lifts the restriction.
    #[must_use]
    pub fn with_types(mut self, types: &str) -> Self {
        let entries: Vec<&str> = types
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.is_empty() {
            self.types = None;
            return self;
        }
        let parsed = entries
            .into_iter()
            .filter_map(|entry| {
                let parsed = PackageType::parse(entry);
                if parsed.is_none() {
                    warn!(package_type = entry, "ignoring unknown package type in filter");
                }
                parsed
            })
            .collect();
        self.types = Some(parsed);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn installed_only(mut self) -> Self {
        self.installed_only = true;
        self
    }

    /// Whether `snapshot` passes every configured restriction
    #[must_use]
    pub fn matches(&self, snapshot: &RawSnapshot) -> bool {
        if self.installed_only && !snapshot.is_installed() {
            return false;
        }
        if let Some(types) = &self.types {
            if !types.contains(&snapshot.package_type) {
                return false;
            }
        }
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => snapshot
                .name
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgweb_types::{Operation, RawStatus};

    #[test]
    fn payload_flattens_state() {
        let snapshot = RawSnapshot::new("hello", RawStatus::Available).with_version("2.10");
        let payload = PackagePayload::new(snapshot, SnapState::pending(Operation::Install, "4"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "hello");
        assert_eq!(json["type"], "app");
        assert_eq!(json["status"], "installing");
        assert_eq!(json["changeID"], "4");
        assert_eq!(json["isError"], false);
        assert!(json.get("progressSize").is_none());
    }

    #[test]
    fn filter_types_skip_unknown_entries() {
        let filter = ListFilter::default().with_types("app, gadget,,toaster");
        assert_eq!(filter.types, Some(vec![PackageType::App, PackageType::Gadget]));

        assert_eq!(ListFilter::default().with_types(" , ").types, None);
    }

    #[test]
    fn filter_with_only_unknown_types_matches_nothing() {
        let filter = ListFilter::default().with_types("toaster");
        assert_eq!(filter.types, Some(Vec::new()));

        let kernel = RawSnapshot::new("linux", RawStatus::Active).with_type(PackageType::Kernel);
        let app = RawSnapshot::new("hello", RawStatus::Available);
        assert!(!filter.matches(&kernel));
        assert!(!filter.matches(&app));
        assert!(ListFilter::default().matches(&app));
    }

    #[test]
    fn filter_matches() {
        let kernel = RawSnapshot::new("Linux-Kernel", RawStatus::Active).with_type(PackageType::Kernel);
        let app = RawSnapshot::new("hello", RawStatus::Available);

        let filter = ListFilter::default().installed_only();
        assert!(filter.matches(&kernel));
        assert!(!filter.matches(&app));

        let filter = ListFilter::default().with_query("KERNEL");
        assert!(filter.matches(&kernel));
        assert!(!filter.matches(&app));

        let filter = ListFilter::default().with_types("app");
        assert!(!filter.matches(&kernel));
        assert!(filter.matches(&app));
    }
}
