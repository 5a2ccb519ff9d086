//! JSON manifest helpers: reading the `version` field and rewriting a
//! manifest with a new one.

use crate::domain::Version;
use crate::error::{Result, VersionHookError};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Extract the semantic version from manifest content.
///
/// Returns `None` when the content is not a JSON object, the `version`
/// field is missing, or it does not match `\d+.\d+.\d+` exactly. Callers
/// map `None` to `0.0.0` or to "no version" depending on the read path.
pub fn manifest_version(content: &str) -> Option<Version> {
    let value: Value = serde_json::from_str(content).ok()?;
    let raw = value.get("version")?.as_str()?;

    if !version_format().is_match(raw) {
        return None;
    }

    Version::parse(raw).ok()
}

fn version_format() -> &'static Regex {
    static VERSION_FORMAT: OnceLock<Regex> = OnceLock::new();
    VERSION_FORMAT.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("hardcoded pattern"))
}

/// Rewrite manifest content with a new version.
///
/// All other fields are preserved in their original order; output is
/// pretty-printed with 2-space indentation and a trailing newline, matching
/// how the manifests are maintained by hand. Order stability keeps the
/// staged diff down to the version line.
pub fn with_version(content: &str, version: &Version) -> Result<String> {
    let mut value: Value = serde_json::from_str(content)
        .map_err(|e| VersionHookError::version(format!("Manifest is not valid JSON: {}", e)))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| VersionHookError::version("Manifest root is not a JSON object"))?;
    object.insert("version".to_string(), Value::String(version.to_string()));

    let pretty = serde_json::to_string_pretty(&value)
        .map_err(|e| VersionHookError::version(format!("Cannot serialize manifest: {}", e)))?;

    Ok(format!("{}\n", pretty))
}
