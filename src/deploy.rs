//! Deployment detection: the commit-message marker and the protected-branch
//! gate checked by the post-commit hook.

use crate::error::{Result, VersionHookError};
use crate::git::Repository;

/// Marker that requests a deployment tag when present in the latest commit
/// message.
pub const DEPLOYMENT_MARKER: &str = "-d";

/// Branches deployment tags may originate from.
pub const PROTECTED_BRANCHES: [&str; 2] = ["main", "master"];

/// True iff the latest commit message contains the deployment marker.
///
/// This is a plain substring test with no word-boundary check, so a message
/// like "redo -design" also triggers a deployment. Known false-positive
/// risk, kept as the established contract for commit messages.
pub fn is_deployment_commit(repo: &dyn Repository) -> Result<bool> {
    let message = repo.last_commit_message()?;
    Ok(message.contains(DEPLOYMENT_MARKER))
}

/// Verify the current branch is a protected branch and return its name.
///
/// Deployment tags are never created off other branches; this is a hard
/// gate, not a warning.
pub fn verify_main_branch(repo: &dyn Repository) -> Result<String> {
    let branch = repo.current_branch()?;

    if !PROTECTED_BRANCHES.contains(&branch.as_str()) {
        return Err(VersionHookError::branch(format!(
            "Deployment tags only allowed on main/master (current: {})",
            branch
        )));
    }

    Ok(branch)
}
