//! Snapshot / pre-release classification of project versions.
//!
//! Which versions count as "not a final release" depends on the artifact
//! ecosystem, so the convention is selected by configuration:
//!
//! - `maven`: `-SNAPSHOT` suffix (any case) or a timestamped snapshot such as
//!   `1.0-20240101.120000-3`
//! - `semver`: any version with a pre-release component (`1.2.0-rc.1`)
//! - `suffix`: a custom marker at the end of the version

use crate::error::{GuardError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const MAVEN_SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Convention used to decide whether a version is a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(tag = "convention", rename_all = "lowercase")]
pub enum SnapshotConvention {
    #[default]
    Maven,
    Semver,
    Suffix {
        marker: String,
    },
}

fn maven_timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(.*)-([0-9]{8}\.[0-9]{6})-([0-9]+)$")
            .expect("timestamped snapshot pattern is valid")
    })
}

fn ends_with_ignore_ascii_case(value: &str, suffix: &str) -> bool {
    value.len() >= suffix.len()
        && value.is_char_boundary(value.len() - suffix.len())
        && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn parse_semver(version: &str) -> std::result::Result<semver::Version, semver::Error> {
    let clean = version.trim();
    let clean = clean
        .strip_prefix('v')
        .or_else(|| clean.strip_prefix('V'))
        .unwrap_or(clean);
    semver::Version::parse(clean)
}

impl SnapshotConvention {
    /// Check that the convention itself and the given version are usable.
    ///
    /// Run before evaluation so that a malformed version surfaces as a setup
    /// error instead of a misleading verdict.
    pub fn validate(&self, version: &str) -> Result<()> {
        if version.trim().is_empty() {
            return Err(GuardError::version("project version is empty"));
        }

        match self {
            SnapshotConvention::Maven => Ok(()),
            SnapshotConvention::Semver => parse_semver(version).map(|_| ()).map_err(|e| {
                GuardError::version(format!(
                    "'{}' is not a valid semantic version: {}",
                    version.trim(),
                    e
                ))
            }),
            SnapshotConvention::Suffix { marker } if marker.trim().is_empty() => Err(
                GuardError::config("snapshot convention 'suffix' requires a non-empty marker"),
            ),
            SnapshotConvention::Suffix { .. } => Ok(()),
        }
    }

    /// Whether `version` is a snapshot / pre-release under this convention
    pub fn is_snapshot(&self, version: &str) -> bool {
        let version = version.trim();
        match self {
            SnapshotConvention::Maven => {
                ends_with_ignore_ascii_case(version, MAVEN_SNAPSHOT_MARKER)
                    || maven_timestamp_pattern().is_match(version)
            }
            SnapshotConvention::Semver => parse_semver(version)
                .map(|parsed| !parsed.pre.is_empty())
                .unwrap_or(false),
            SnapshotConvention::Suffix { marker } => {
                !marker.is_empty() && ends_with_ignore_ascii_case(version, marker)
            }
        }
    }

    /// Human-readable description of what counts as a snapshot
    pub fn describe(&self) -> String {
        match self {
            SnapshotConvention::Maven => "maven (-SNAPSHOT or timestamped)".to_string(),
            SnapshotConvention::Semver => "semver (pre-release component)".to_string(),
            SnapshotConvention::Suffix { marker } => format!("suffix '{}'", marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_snapshot_suffix() {
        let maven = SnapshotConvention::Maven;
        assert!(maven.is_snapshot("1.0.0-SNAPSHOT"));
        assert!(maven.is_snapshot("1.0.0-snapshot"));
        assert!(maven.is_snapshot("SNAPSHOT"));
        assert!(!maven.is_snapshot("1.0.0"));
        assert!(!maven.is_snapshot("1.0.0-SNAPSHOT.1"));
    }

    #[test]
    fn test_maven_timestamped_snapshot() {
        let maven = SnapshotConvention::Maven;
        assert!(maven.is_snapshot("1.0-20240101.120000-3"));
        assert!(!maven.is_snapshot("1.0-2024.120000-3"));
    }

    #[test]
    fn test_maven_snapshot_ignores_surrounding_whitespace() {
        assert!(SnapshotConvention::Maven.is_snapshot(" 2.3.0-SNAPSHOT \n"));
    }

    #[test]
    fn test_semver_prerelease() {
        let semver = SnapshotConvention::Semver;
        assert!(semver.is_snapshot("1.2.0-rc.1"));
        assert!(semver.is_snapshot("v1.2.0-alpha"));
        assert!(!semver.is_snapshot("1.2.0"));
        assert!(!semver.is_snapshot("1.2.0+build.5"));
    }

    #[test]
    fn test_semver_validate_rejects_non_semver() {
        assert!(SnapshotConvention::Semver.validate("1.2").is_err());
        assert!(SnapshotConvention::Semver.validate("1.2.3").is_ok());
        assert!(SnapshotConvention::Maven.validate("1.2").is_ok());
    }

    #[test]
    fn test_custom_suffix() {
        let dev = SnapshotConvention::Suffix {
            marker: "-dev".to_string(),
        };
        assert!(dev.is_snapshot("0.4.0-dev"));
        assert!(dev.is_snapshot("0.4.0-DEV"));
        assert!(!dev.is_snapshot("0.4.0"));
    }

    #[test]
    fn test_empty_suffix_is_config_error() {
        let empty = SnapshotConvention::Suffix {
            marker: String::new(),
        };
        assert!(matches!(
            empty.validate("1.0.0"),
            Err(GuardError::Config(_))
        ));
        assert!(!empty.is_snapshot("1.0.0"));
    }

    #[test]
    fn test_validate_rejects_blank_version() {
        assert!(SnapshotConvention::Maven.validate("   ").is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            snapshot: SnapshotConvention,
        }

        let parsed: Wrapper =
            toml::from_str("[snapshot]\nconvention = \"suffix\"\nmarker = \"-dev\"\n").unwrap();
        assert_eq!(
            parsed.snapshot,
            SnapshotConvention::Suffix {
                marker: "-dev".to_string()
            }
        );

        let parsed: Wrapper = toml::from_str("[snapshot]\nconvention = \"semver\"\n").unwrap();
        assert_eq!(parsed.snapshot, SnapshotConvention::Semver);
    }
}
