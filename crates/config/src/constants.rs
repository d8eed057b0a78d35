//! Fixed names used when locating and overriding configuration

pub const CONFIG_DIR_NAME: &str = "pkgweb";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_TRACKER_DURATION_MS: &str = "PKGWEB_TRACKER_DURATION_MS";
pub const ENV_LOG_LEVEL: &str = "PKGWEB_LOG_LEVEL";
pub const ENV_JSON_LOGS: &str = "PKGWEB_JSON_LOGS";
