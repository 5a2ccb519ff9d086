//! One-shot setup: wire the pre-commit and post-commit shims into a
//! repository's `.git/hooks` directory.

use crate::error::{Result, VersionHookError};
use std::fs;
use std::path::{Path, PathBuf};

/// Hook files to install, each invoking a subcommand of this binary.
const HOOKS: [(&str, &str); 2] = [("pre-commit", "pre-commit"), ("post-commit", "post-commit")];

/// Locate the `.git` directory in `start` or its parent.
pub fn find_git_dir(start: &Path) -> Option<PathBuf> {
    let git_dir = start.join(".git");
    if git_dir.exists() {
        return Some(git_dir);
    }

    let git_dir = start.join("..").join(".git");
    if git_dir.exists() {
        return Some(git_dir);
    }

    None
}

/// Write the hook shim files and mark them executable.
///
/// Returns the installed hook paths.
pub fn install_hooks(start: &Path) -> Result<Vec<PathBuf>> {
    let git_dir = find_git_dir(start).ok_or_else(|| {
        VersionHookError::config("Could not find .git directory in current or parent folder")
    })?;

    let hooks_dir = git_dir.join("hooks");
    fs::create_dir_all(&hooks_dir)?;

    let mut installed = Vec::new();
    for (hook_name, subcommand) in HOOKS {
        let hook_path = hooks_dir.join(hook_name);
        let content = format!("#!/bin/sh\nversion-bump-hooks {}\n", subcommand);
        fs::write(&hook_path, content)?;
        make_executable(&hook_path)?;
        installed.push(hook_path);
    }

    Ok(installed)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
