//! Deployment tag creation and push.

use crate::domain::CompositeTag;
use crate::error::{Result, VersionHookError};
use crate::git::Repository;
use crate::logs::LogManager;
use crate::store::EnvStore;

/// Remote deployment tags are pushed to.
pub const DEPLOY_REMOTE: &str = "origin";

/// Creates and pushes the deployment tag recorded by the pre-commit run.
///
/// Tag creation favors correctness over availability: the first failing
/// step aborts the whole operation, leaving no partial tag state behind.
pub struct TagPublisher<'a> {
    repo: &'a dyn Repository,
    store: &'a EnvStore,
    log: &'a LogManager,
}

impl<'a> TagPublisher<'a> {
    pub fn new(repo: &'a dyn Repository, store: &'a EnvStore, log: &'a LogManager) -> Self {
        TagPublisher { repo, store, log }
    }

    /// Create the annotated tag `v<TAG_VERSION>` and push it to origin.
    ///
    /// Fails with a `Config` error when no `TAG_VERSION` is stored and with
    /// a `Conflict` error when the tag already exists — tags are immutable
    /// identities and are never overwritten.
    pub fn create_and_push_tag(&self) -> Result<String> {
        match self.try_create_and_push() {
            Ok(tag_name) => Ok(tag_name),
            Err(e) => {
                self.log.error(&format!("Tag creation failed: {}", e));
                Err(e)
            }
        }
    }

    fn try_create_and_push(&self) -> Result<String> {
        self.log.debug("Starting tag creation process");

        let tag = CompositeTag::from_value(self.store.read_tag_version()?);
        let tag_name = tag.tag_name();
        self.log.debug(&format!("Tag to be created: {}", tag_name));

        if self.repo.tag_exists(&tag_name)? {
            return Err(VersionHookError::conflict(tag_name));
        }

        self.repo.create_annotated_tag(&tag_name, &tag_name)?;
        self.repo.push_tag(DEPLOY_REMOTE, &tag_name)?;

        self.log
            .history(&format!("Created and pushed tag: {}", tag_name));
        Ok(tag_name)
    }
}
