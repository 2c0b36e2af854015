use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{BranchRule, SnapshotConvention};
use crate::error::{GuardError, Result};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "versionguard.toml";

/// Represents the complete configuration for git-version-guard.
///
/// Contains the ordered branch rules, the snapshot convention and where the
/// branch name and project version come from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_branch_env")]
    pub branch_env: String,

    #[serde(default)]
    pub detect_from_repository: bool,

    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default)]
    pub snapshot: SnapshotConvention,

    #[serde(default = "default_rules")]
    pub rules: Vec<BranchRule>,
}

/// Returns the default environment variable carrying the CI branch name.
fn default_branch_env() -> String {
    "GIT_BRANCH".to_string()
}

/// Returns the default build descriptor path.
fn default_manifest() -> String {
    "Cargo.toml".to_string()
}

/// Returns the default gitflow-style rules, in priority order.
///
/// CI servers often report remote-tracking names, so an `origin/` prefix is
/// accepted on every rule.
pub fn default_rules() -> Vec<BranchRule> {
    vec![
        BranchRule::new("main", "(?:origin/)?(?:main|master)"),
        BranchRule::new("release", "(?:origin/)?release/(.+)"),
        BranchRule::new("hotfix", "(?:origin/)?hotfix/(.+)"),
        BranchRule::new("bugfix", "(?:origin/)?bugfix/.+"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branch_env: default_branch_env(),
            detect_from_repository: false,
            manifest: default_manifest(),
            snapshot: SnapshotConvention::default(),
            rules: default_rules(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionguard.toml` in current directory
/// 3. `.versionguard.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let (source, config_str) = if let Some(path) = config_path {
        (path.to_string(), fs::read_to_string(path)?)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        (
            CONFIG_FILE_NAME.to_string(),
            fs::read_to_string(CONFIG_FILE_NAME)?,
        )
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            (
                config_path.display().to_string(),
                fs::read_to_string(&config_path)?,
            )
        } else {
            tracing::debug!("no configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %source, "loading configuration");
    parse_config(&config_str).map_err(|e| GuardError::config(format!("{}: {}", source, e)))
}

/// Parses configuration from a TOML string.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| GuardError::config(e.to_string()))
}
