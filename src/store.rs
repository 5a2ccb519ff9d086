//! ".env"-style key-value store carrying the pending tag value between the
//! pre-commit and post-commit hook processes.
//!
//! The store only ever reads and rewrites the single `TAG_VERSION` key;
//! unrelated lines are preserved untouched by the writer.

use crate::error::{Result, VersionHookError};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const TAG_VERSION_PATTERN: &str = r"TAG_VERSION=([^\n]*)";

pub struct EnvStore {
    path: PathBuf,
}

impl EnvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EnvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the pending `TAG_VERSION` value.
    ///
    /// A missing file or missing key is a configuration error: the
    /// post-commit hook must not invent a tag value.
    pub fn read_tag_version(&self) -> Result<String> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            VersionHookError::config(format!("Cannot read {}: {}", self.path.display(), e))
        })?;

        let re = Regex::new(TAG_VERSION_PATTERN)
            .map_err(|e| VersionHookError::config(format!("Invalid store pattern: {}", e)))?;

        re.captures(&content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                VersionHookError::config(format!(
                    "TAG_VERSION not found in {}",
                    self.path.display()
                ))
            })
    }

    /// Read-modify-write the `TAG_VERSION` entry.
    ///
    /// An existing entry is replaced in place; otherwise a new line is
    /// appended. The file is written trimmed of surrounding whitespace and
    /// every unrelated line survives byte-for-byte.
    pub fn write_tag_version(&self, value: &str) -> Result<()> {
        let content = if self.path.exists() {
            fs::read_to_string(&self.path)?
        } else {
            String::new()
        };

        let entry = format!("TAG_VERSION={}", value);
        let updated = if content.contains("TAG_VERSION=") {
            let re = Regex::new(TAG_VERSION_PATTERN)
                .map_err(|e| VersionHookError::config(format!("Invalid store pattern: {}", e)))?;
            re.replace(&content, entry.as_str()).into_owned()
        } else if content.is_empty() || content.ends_with('\n') {
            format!("{}{}\n", content, entry)
        } else {
            format!("{}\n{}\n", content, entry)
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, updated.trim())?;
        Ok(())
    }
}
