//! Reading the declared project version from a build descriptor.

use std::fs;
use std::path::Path;

use toml::Value;

use crate::error::{GuardError, Result};

/// Reads the project version from a `Cargo.toml`.
///
/// Uses `package.version`, falling back to `workspace.package.version` when
/// the package inherits its version or the manifest is a virtual workspace.
pub fn read_project_version(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        GuardError::manifest(format!("cannot read '{}': {}", path.display(), e))
    })?;

    let version = parse_project_version(&content)
        .map_err(|e| GuardError::manifest(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(manifest = %path.display(), %version, "read project version");
    Ok(version)
}

/// Extracts the project version from manifest text.
pub fn parse_project_version(content: &str) -> std::result::Result<String, String> {
    let manifest: Value = toml::from_str(content).map_err(|e| e.to_string())?;

    let package_version = manifest.get("package").and_then(|p| p.get("version"));
    let workspace_version = manifest
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"))
        .and_then(Value::as_str);

    let version = match package_version {
        Some(Value::String(version)) => Some(version.as_str()),
        Some(Value::Table(table))
            if table.get("workspace").and_then(Value::as_bool) == Some(true) =>
        {
            workspace_version
        }
        Some(_) => return Err("package.version must be a string".to_string()),
        None => workspace_version,
    };

    match version.map(str::trim) {
        Some(version) if !version.is_empty() => Ok(version.to_string()),
        _ => Err("no project version declared".to_string()),
    }
}
