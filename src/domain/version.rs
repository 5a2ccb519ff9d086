use crate::error::{Result, VersionHookError};
use std::fmt;

/// Semantic version triple recorded in a sub-project manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a manifest string (e.g., "1.2.3" -> Version(1,2,3))
    ///
    /// Accepts exactly three dot-separated numeric components. Callers in the
    /// read paths normalize a failed parse to `Version::default()` (0.0.0).
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionHookError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                raw
            )));
        }

        let major = parts[0].parse::<u32>().map_err(|_| {
            VersionHookError::version(format!("Invalid major version: {}", parts[0]))
        })?;
        let minor = parts[1].parse::<u32>().map_err(|_| {
            VersionHookError::version(format!("Invalid minor version: {}", parts[1]))
        })?;
        let patch = parts[2].parse::<u32>().map_err(|_| {
            VersionHookError::version(format!("Invalid patch version: {}", parts[2]))
        })?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Next patch release: patch + 1, major/minor held fixed
    pub fn bump_patch(&self) -> Self {
        Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch + 1,
        }
    }

    /// Version at a manually-raised minor with patch reset to 0
    pub fn at_minor(&self, minor: u32) -> Self {
        Version {
            major: self.major,
            minor,
            patch: 0,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
