//! Post-commit driver: create and push the deployment tag when the commit
//! carries the deployment marker.

use crate::config::Config;
use crate::deploy;
use crate::error::Result;
use crate::git::Repository;
use crate::logs::LogManager;
use crate::store::EnvStore;
use crate::tags::{TagPublisher, DEPLOY_REMOTE};
use crate::ui;

/// Run the post-commit workflow.
///
/// Non-deployment commits are a silent no-op. For deployment commits the
/// branch gate and the tag pipeline are all-or-nothing: any failure
/// surfaces to the caller, which exits non-zero. Only the follow-up HEAD
/// push is best-effort, since the commit may already be on the remote.
pub fn run(config: &Config, repo: &dyn Repository, log: &LogManager) -> Result<()> {
    log.debug("Starting post-commit hook");

    if !deploy::is_deployment_commit(repo)? {
        return Ok(());
    }
    log.debug("Deployment marker (-d) found");

    deploy::verify_main_branch(repo)?;

    let store = EnvStore::new(&config.store_path);
    let publisher = TagPublisher::new(repo, &store, log);
    let tag_name = publisher.create_and_push_tag()?;

    ui::display_success(&format!("Successfully deployed tag: {}", tag_name));

    if let Err(e) = repo.push_head(DEPLOY_REMOTE) {
        log.debug(&format!("Commit was already pushed or push failed: {}", e));
    }

    Ok(())
}
