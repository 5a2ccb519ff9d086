use thiserror::Error;

/// Unified error type for version-bump-hooks operations
#[derive(Error, Debug)]
pub enum VersionHookError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag '{0}' already exists")]
    Conflict(String),

    #[error("Branch policy violation: {0}")]
    Branch(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-bump-hooks
pub type Result<T> = std::result::Result<T, VersionHookError>;

impl VersionHookError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionHookError::Config(msg.into())
    }

    /// Create a tag conflict error for an existing tag name
    pub fn conflict(tag: impl Into<String>) -> Self {
        VersionHookError::Conflict(tag.into())
    }

    /// Create a branch policy error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        VersionHookError::Branch(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VersionHookError::Version(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        VersionHookError::Remote(msg.into())
    }
}
