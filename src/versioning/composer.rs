use crate::config::FolderConfig;
use crate::domain::CompositeTag;
use crate::logs::LogManager;
use crate::store::EnvStore;
use crate::versioning::reader::VersionReader;

/// Combines the two sub-projects' working-tree versions into the pending
/// deployment tag value and persists it to the env store.
pub struct TagComposer<'a> {
    reader: &'a VersionReader<'a>,
    store: &'a EnvStore,
    log: &'a LogManager,
}

impl<'a> TagComposer<'a> {
    pub fn new(reader: &'a VersionReader<'a>, store: &'a EnvStore, log: &'a LogManager) -> Self {
        TagComposer { reader, store, log }
    }

    /// Derive `{minorA}.{patchA}.{minorB}.{patchB}` from the two folders
    /// and write it to the store's `TAG_VERSION` entry.
    ///
    /// Returns `None` on a store write failure, leaving the file untouched.
    pub fn derive_and_persist(
        &self,
        back: &FolderConfig,
        web: &FolderConfig,
    ) -> Option<CompositeTag> {
        self.log.debug("Updating TAG_VERSION in env store");

        let back_version = self.reader.working_version(back);
        let web_version = self.reader.working_version(web);
        self.log.debug(&format!(
            "Back version: {}, Web version: {}",
            back_version, web_version
        ));

        let tag = CompositeTag::derive(&back_version, &web_version);

        match self.store.write_tag_version(&tag.value) {
            Ok(()) => {
                self.log.history(&format!(
                    "Updated TAG_VERSION to {} (not committed)",
                    tag.value
                ));
                self.log.debug(&format!("New TAG_VERSION: {}", tag.value));
                Some(tag)
            }
            Err(e) => {
                self.log
                    .debug(&format!("Error updating TAG_VERSION: {}", e));
                None
            }
        }
    }
}
