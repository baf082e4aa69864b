//! Build metadata embedded by `build.rs`

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const RAW_BUILD_NUMBER: Option<&str> = option_env!("BACPLAN_BUILD_NUMBER");
const RAW_BUILD_TIMESTAMP: Option<&str> = option_env!("BACPLAN_BUILD_TIMESTAMP");

/// Version and build stamp reported by `bac_status` and the banner
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// 0 when the build script did not run
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamp(RAW_BUILD_NUMBER, RAW_BUILD_TIMESTAMP)
    }

    fn from_stamp(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }

    pub fn banner(&self) -> String {
        format!(
            "BAC Planner v{} (build {}, {}) - educational use only",
            self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current().banner());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stamp() {
        let info = BuildInfo::from_stamp(Some("42"), Some("2026-01-01T00:00:00Z"));
        assert_eq!(info.build_number, 42);
        assert_eq!(info.build_timestamp, "2026-01-01T00:00:00Z");
        assert_eq!(info.version, VERSION);
    }

    #[test]
    fn test_missing_or_bad_stamp() {
        let info = BuildInfo::from_stamp(None, None);
        assert_eq!(info.build_number, 0);
        assert_eq!(info.build_timestamp, "unknown");
        assert_eq!(BuildInfo::from_stamp(Some("12a"), None).build_number, 0);
    }

    #[test]
    fn test_banner() {
        let banner = BuildInfo::from_stamp(Some("7"), Some("now")).banner();
        assert!(banner.contains("build 7, now"));
        assert!(banner.contains("educational use only"));
    }
}
