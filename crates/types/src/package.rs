//! Raw package snapshots as reported by the package daemon

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw package status as the daemon spells it.
///
/// The daemon only ever reports steady states. Anything outside the known
/// set is kept verbatim so it can be surfaced as an error state instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawStatus {
    NotPresent,
    Available,
    Installed,
    Active,
    Removed,
    Priced,
    Unrecognized(String),
}

impl RawStatus {
    /// The daemon's wire spelling of this status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotPresent => "not-present",
            Self::Available => "available",
            Self::Installed => "installed",
            Self::Active => "active",
            Self::Removed => "removed",
            Self::Priced => "priced",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for RawStatus {
    fn from(value: &str) -> Self {
        match value {
            "not-present" => Self::NotPresent,
            "available" => Self::Available,
            "installed" => Self::Installed,
            "active" => Self::Active,
            "removed" => Self::Removed,
            "priced" => Self::Priced,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for RawStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<RawStatus> for String {
    fn from(value: RawStatus) -> Self {
        match value {
            RawStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of package, used by list filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    #[default]
    App,
    Core,
    Kernel,
    Gadget,
    Os,
}

impl PackageType {
    /// Parse a type name as used in list filters
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "app" | "application" => Some(Self::App),
            "core" => Some(Self::Core),
            "kernel" => Some(Self::Kernel),
            "gadget" => Some(Self::Gadget),
            "os" => Some(Self::Os),
            _ => None,
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App => write!(f, "app"),
            Self::Core => write!(f, "core"),
            Self::Kernel => write!(f, "kernel"),
            Self::Gadget => write!(f, "gadget"),
            Self::Os => write!(f, "os"),
        }
    }
}

/// Current status of a single package as last reported by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub name: String,
    pub status: RawStatus,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "type")]
    pub package_type: PackageType,
    #[serde(default)]
    pub installed_size: u64,
    #[serde(default)]
    pub download_size: u64,
}

impl RawSnapshot {
    /// Create a snapshot with only a name and status
    #[must_use]
    pub fn new(name: impl Into<String>, status: RawStatus) -> Self {
        Self {
            name: name.into(),
            status,
            version: String::new(),
            package_type: PackageType::App,
            installed_size: 0,
            download_size: 0,
        }
    }

    /// Set the version string
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the package type
    #[must_use]
    pub fn with_type(mut self, package_type: PackageType) -> Self {
        self.package_type = package_type;
        self
    }

    /// Whether the daemon reports the package as present on the system
    #[must_use]
    pub fn is_installed(&self) -> bool {
        matches!(self.status, RawStatus::Installed | RawStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_survives_deserialization() {
        let snap: RawSnapshot =
            serde_json::from_str(r#"{"name":"hello","status":"broken"}"#).unwrap();
        assert_eq!(snap.status, RawStatus::Unrecognized("broken".to_string()));
        assert_eq!(snap.package_type, PackageType::App);

        let json = serde_json::to_string(&snap.status).unwrap();
        assert_eq!(json, r#""broken""#);
    }

    #[test]
    fn known_status_uses_wire_spelling() {
        assert_eq!(RawStatus::from("not-present"), RawStatus::NotPresent);
        assert_eq!(
            serde_json::to_string(&RawStatus::Removed).unwrap(),
            r#""removed""#
        );
    }

    #[test]
    fn package_type_parse_is_lenient() {
        assert_eq!(PackageType::parse(" Core "), Some(PackageType::Core));
        assert_eq!(PackageType::parse("application"), Some(PackageType::App));
        assert_eq!(PackageType::parse("firmware"), None);
    }
}
