//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! the hooks depend on, allowing for multiple implementations including
//! real git repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Most code should depend on `&dyn Repository` rather than a concrete
//! implementation so the hook drivers can be exercised without a real
//! repository.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Injected version-control capability used by the hook core.
///
/// Every method is a single blocking git operation; failures are ordinary
/// error returns consumed by the caller, which decides whether the
/// operation is best-effort or essential.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across
/// threads.
pub trait Repository: Send + Sync {
    /// Content of a file as staged in the index (pre-commit view).
    ///
    /// # Returns
    /// * `Ok(Some(content))` - The staged blob content
    /// * `Ok(None)` - Path has no staged entry
    /// * `Err` - On a git error
    fn staged_file_content(&self, path: &str) -> Result<Option<String>>;

    /// Content of a file as recorded in the most recent commit.
    ///
    /// # Returns
    /// * `Ok(Some(content))` - The committed blob content
    /// * `Ok(None)` - No commit exists yet, or the path is absent from HEAD
    /// * `Err` - On a git error
    fn committed_file_content(&self, path: &str) -> Result<Option<String>>;

    /// Paths staged for the next commit under a path prefix (the diff
    /// between HEAD and the index).
    fn staged_paths(&self, prefix: &str) -> Result<Vec<String>>;

    /// Add a working-tree file to the index.
    fn stage_file(&self, path: &str) -> Result<()>;

    /// Whether a tag with exactly this name exists.
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create an annotated tag on the current HEAD commit.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag ref to a remote.
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;

    /// Push the current branch head to a remote.
    fn push_head(&self, remote: &str) -> Result<()>;

    /// Full message (subject + body) of the latest commit.
    fn last_commit_message(&self) -> Result<String>;

    /// Short name of the currently checked-out branch.
    ///
    /// # Returns
    /// * `Err` - When HEAD is detached or the repository has no branch
    fn current_branch(&self) -> Result<String>;
}
