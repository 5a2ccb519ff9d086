//! Git hook entry points and installation
//!
//! - pre-commit: bump sub-project versions, refresh the pending tag value
//! - post-commit: create and push the deployment tag when requested
//! - install: write the hook shim files into `.git/hooks`

pub mod install;
pub mod post_commit;
pub mod pre_commit;
