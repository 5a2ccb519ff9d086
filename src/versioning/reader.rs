use crate::config::FolderConfig;
use crate::domain::Version;
use crate::git::Repository;
use crate::logs::LogManager;
use crate::versioning::manifest;
use std::fs;

/// Reads a sub-project's version out of its manifest in the three places a
/// version can live: the working tree, the staged index, and the latest
/// commit.
///
/// Read failures never abort a hook run. Working-tree and HEAD reads fall
/// back to `0.0.0`; staged reads return `None` because "no staged content"
/// and "explicit 0.0.0" are different states for the reconciliation logic.
pub struct VersionReader<'a> {
    repo: &'a dyn Repository,
    log: &'a LogManager,
}

impl<'a> VersionReader<'a> {
    pub fn new(repo: &'a dyn Repository, log: &'a LogManager) -> Self {
        VersionReader { repo, log }
    }

    /// Version in the working-tree manifest, `0.0.0` on any failure
    pub fn working_version(&self, folder: &FolderConfig) -> Version {
        self.log
            .debug(&format!("Reading current version from {}", folder.path));

        match fs::read_to_string(&folder.path) {
            Ok(content) => match manifest::manifest_version(&content) {
                Some(version) => {
                    self.log.debug(&format!(
                        "Current version for {}: {}",
                        folder.folder, version
                    ));
                    version
                }
                None => {
                    self.log.debug(&format!(
                        "No valid version field in {}",
                        folder.path
                    ));
                    Version::default()
                }
            },
            Err(e) => {
                self.log
                    .debug(&format!("Error reading {}: {}", folder.path, e));
                Version::default()
            }
        }
    }

    /// Version in the staged manifest, `None` when absent or unparsable
    pub fn staged_version(&self, folder: &FolderConfig) -> Option<Version> {
        self.log
            .debug(&format!("Getting staged version for {}", folder.folder));

        match self.repo.staged_file_content(&folder.path) {
            Ok(Some(content)) => {
                let version = manifest::manifest_version(&content);
                self.log.debug(&format!(
                    "Staged version for {}: {:?}",
                    folder.folder, version
                ));
                version
            }
            Ok(None) => {
                self.log
                    .debug(&format!("No staged manifest for {}", folder.folder));
                None
            }
            Err(e) => {
                self.log.debug(&format!(
                    "Error getting staged version for {}: {}",
                    folder.folder, e
                ));
                None
            }
        }
    }

    /// Version in the latest commit's manifest.
    ///
    /// `0.0.0` (never `None`) when no commit exists, the manifest is absent
    /// from HEAD, its content is empty, or it lacks a version field —
    /// HEAD-state is a definite fallback, not an absence signal.
    pub fn committed_version(&self, folder: &FolderConfig) -> Version {
        self.log
            .debug(&format!("Checking HEAD version for {}", folder.folder));

        match self.repo.committed_file_content(&folder.path) {
            Ok(Some(content)) => {
                if content.trim().is_empty() {
                    self.log.debug(&format!(
                        "Empty manifest content in HEAD for {}",
                        folder.folder
                    ));
                    return Version::default();
                }
                match manifest::manifest_version(&content) {
                    Some(version) => {
                        self.log.debug(&format!(
                            "HEAD version for {}: {}",
                            folder.folder, version
                        ));
                        version
                    }
                    None => {
                        self.log.debug(&format!(
                            "No version field in HEAD manifest for {}",
                            folder.folder
                        ));
                        Version::default()
                    }
                }
            }
            Ok(None) => {
                self.log.debug(&format!(
                    "Manifest does not exist in HEAD for {}",
                    folder.folder
                ));
                Version::default()
            }
            Err(e) => {
                self.log.debug(&format!(
                    "Unexpected error reading HEAD version for {}: {}",
                    folder.folder, e
                ));
                Version::default()
            }
        }
    }
}
