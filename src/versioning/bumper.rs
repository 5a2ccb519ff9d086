use crate::config::FolderConfig;
use crate::domain::Version;
use crate::git::Repository;
use crate::logs::LogManager;
use crate::versioning::manifest;
use std::fs;

/// Decides whether a sub-project's version advances and applies the bump.
///
/// Bump paths favor availability: every failure is logged and reported as
/// `None` ("no bump occurred"), never as a fatal condition. The commit
/// itself must not be blocked by a failed version write.
pub struct VersionBumper<'a> {
    repo: &'a dyn Repository,
    log: &'a LogManager,
}

impl<'a> VersionBumper<'a> {
    pub fn new(repo: &'a dyn Repository, log: &'a LogManager) -> Self {
        VersionBumper { repo, log }
    }

    /// True iff the staged change set for the folder contains at least one
    /// path that is not the manifest file itself.
    ///
    /// Manifest-only edits never trigger a bump; the bump itself stages the
    /// manifest, so counting it would re-bump on every commit.
    pub fn has_non_manifest_changes(&self, folder: &FolderConfig) -> bool {
        self.log
            .debug(&format!("Checking for changes in {}", folder.folder));

        let changes = match self.repo.staged_paths(&folder.folder) {
            Ok(paths) => paths,
            Err(e) => {
                self.log.debug(&format!(
                    "Error checking changes for {}: {}",
                    folder.folder, e
                ));
                return false;
            }
        };

        if changes.is_empty() {
            self.log
                .debug(&format!("No changes detected in {}", folder.folder));
            return false;
        }

        let manifest_name = folder.manifest_name();
        let non_manifest: Vec<&String> = changes
            .iter()
            .filter(|path| !path.ends_with(manifest_name))
            .collect();

        self.log.debug(&format!(
            "Non-manifest changes for {}: {:?}",
            folder.folder, non_manifest
        ));

        !non_manifest.is_empty()
    }

    /// Increment the patch component, rewrite the manifest, stage it.
    ///
    /// Returns the new version, or `None` on any I/O or parse error.
    pub fn bump_patch(&self, folder: &FolderConfig) -> Option<Version> {
        self.log.debug(&format!(
            "Starting patch version bump for {}",
            folder.folder
        ));

        let content = match fs::read_to_string(&folder.path) {
            Ok(content) => content,
            Err(e) => {
                self.log.debug(&format!(
                    "Error bumping version for {}: {}",
                    folder.folder, e
                ));
                return None;
            }
        };

        let current = manifest::manifest_version(&content)?;
        let next = current.bump_patch();

        self.persist_and_stage(folder, &content, &next)
    }

    /// Honor a manual minor bump: when the staged minor was raised above
    /// the committed minor at the same major, reset patch to 0 at that
    /// minor. Takes precedence over an automatic patch bump for the run.
    ///
    /// Returns `None` when no manual minor bump is detected or on error.
    pub fn reconcile_minor_bump(
        &self,
        folder: &FolderConfig,
        staged: &Version,
        committed: &Version,
    ) -> Option<Version> {
        self.log.debug(&format!(
            "Checking for minor version bump in {}",
            folder.folder
        ));

        if !(staged.major == committed.major && staged.minor > committed.minor) {
            return None;
        }

        self.log.debug(&format!(
            "Minor version manually increased in {} - resetting patch to 0",
            folder.folder
        ));

        let content = match fs::read_to_string(&folder.path) {
            Ok(content) => content,
            Err(e) => {
                self.log.debug(&format!(
                    "Error reconciling minor bump for {}: {}",
                    folder.folder, e
                ));
                return None;
            }
        };

        let reset = staged.at_minor(staged.minor);
        self.persist_and_stage(folder, &content, &reset)
    }

    fn persist_and_stage(
        &self,
        folder: &FolderConfig,
        content: &str,
        version: &Version,
    ) -> Option<Version> {
        let updated = match manifest::with_version(content, version) {
            Ok(updated) => updated,
            Err(e) => {
                self.log.debug(&format!(
                    "Error rewriting manifest for {}: {}",
                    folder.folder, e
                ));
                return None;
            }
        };

        if let Err(e) = fs::write(&folder.path, updated) {
            self.log.debug(&format!(
                "Error writing manifest for {}: {}",
                folder.folder, e
            ));
            return None;
        }
        self.log.debug(&format!(
            "Updated version for {} to {}",
            folder.folder, version
        ));

        if let Err(e) = self.repo.stage_file(&folder.path) {
            self.log.debug(&format!(
                "Error staging manifest for {}: {}",
                folder.folder, e
            ));
            return None;
        }
        self.log
            .debug(&format!("Staged manifest changes for {}", folder.folder));

        Some(*version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;
    use crate::git::MockRepository;
    use tempfile::TempDir;

    fn test_log(dir: &TempDir) -> LogManager {
        LogManager::new(&LogConfig {
            dir: dir.path().join("logs").to_string_lossy().into_owned(),
            max_entries: 500,
            clear_debug_log: false,
        })
        .unwrap()
    }

    fn folder_at(dir: &TempDir) -> FolderConfig {
        FolderConfig {
            folder: "back/".to_string(),
            path: dir
                .path()
                .join("package.json")
                .to_string_lossy()
                .into_owned(),
        }
    }

    #[test]
    fn test_has_non_manifest_changes_empty_set() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let bumper = VersionBumper::new(&repo, &log);

        assert!(!bumper.has_non_manifest_changes(&folder_at(&dir)));
    }

    #[test]
    fn test_has_non_manifest_changes_manifest_only() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let mut repo = MockRepository::new();
        repo.add_staged_path("back/package.json");
        let bumper = VersionBumper::new(&repo, &log);

        assert!(!bumper.has_non_manifest_changes(&folder_at(&dir)));
    }

    #[test]
    fn test_has_non_manifest_changes_real_change() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let mut repo = MockRepository::new();
        repo.add_staged_path("back/src/server.js");
        let bumper = VersionBumper::new(&repo, &log);

        assert!(bumper.has_non_manifest_changes(&folder_at(&dir)));
    }

    #[test]
    fn test_has_non_manifest_changes_mixed_set() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let mut repo = MockRepository::new();
        repo.add_staged_path("back/package.json");
        repo.add_staged_path("back/src/server.js");
        let bumper = VersionBumper::new(&repo, &log);

        assert!(bumper.has_non_manifest_changes(&folder_at(&dir)));
    }

    #[test]
    fn test_bump_patch_increments_only_patch() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let folder = folder_at(&dir);
        fs::write(&folder.path, r#"{"name": "back", "version": "1.2.3"}"#).unwrap();

        let bumper = VersionBumper::new(&repo, &log);
        let bumped = bumper.bump_patch(&folder);

        assert_eq!(bumped, Some(Version::new(1, 2, 4)));
        let written = fs::read_to_string(&folder.path).unwrap();
        assert!(written.contains("\"version\": \"1.2.4\""));
        assert!(written.contains("\"name\": \"back\""));
        assert!(written.ends_with('\n'));
        assert_eq!(repo.staged_adds(), vec![folder.path.clone()]);
    }

    #[test]
    fn test_bump_patch_missing_manifest_is_none() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let folder = folder_at(&dir);

        let bumper = VersionBumper::new(&repo, &log);
        assert_eq!(bumper.bump_patch(&folder), None);
        assert!(repo.staged_adds().is_empty());
    }

    #[test]
    fn test_bump_patch_unparsable_version_is_none() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let folder = folder_at(&dir);
        fs::write(&folder.path, r#"{"version": "abc"}"#).unwrap();

        let bumper = VersionBumper::new(&repo, &log);
        assert_eq!(bumper.bump_patch(&folder), None);
    }

    #[test]
    fn test_reconcile_minor_bump_detected() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let folder = folder_at(&dir);
        fs::write(&folder.path, r#"{"version": "1.3.0"}"#).unwrap();

        let bumper = VersionBumper::new(&repo, &log);
        let reset = bumper.reconcile_minor_bump(
            &folder,
            &Version::new(1, 3, 7),
            &Version::new(1, 2, 9),
        );

        assert_eq!(reset, Some(Version::new(1, 3, 0)));
        let written = fs::read_to_string(&folder.path).unwrap();
        assert!(written.contains("\"version\": \"1.3.0\""));
        assert_eq!(repo.staged_adds(), vec![folder.path.clone()]);
    }

    #[test]
    fn test_reconcile_minor_bump_not_detected() {
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let folder = folder_at(&dir);
        fs::write(&folder.path, r#"{"version": "1.2.3"}"#).unwrap();
        let bumper = VersionBumper::new(&repo, &log);

        // same minor
        assert_eq!(
            bumper.reconcile_minor_bump(&folder, &Version::new(1, 2, 3), &Version::new(1, 2, 2)),
            None
        );
        // lower minor
        assert_eq!(
            bumper.reconcile_minor_bump(&folder, &Version::new(1, 1, 0), &Version::new(1, 2, 0)),
            None
        );
        // different major
        assert_eq!(
            bumper.reconcile_minor_bump(&folder, &Version::new(2, 3, 0), &Version::new(1, 2, 0)),
            None
        );
        assert!(repo.staged_adds().is_empty());
    }

    #[test]
    fn test_reconcile_minor_bump_against_zero_committed() {
        // A malformed or absent HEAD manifest reads as 0.0.0, so any real
        // staged version looks like a minor increase and forces the reset.
        let dir = TempDir::new().unwrap();
        let log = test_log(&dir);
        let repo = MockRepository::new();
        let folder = folder_at(&dir);
        fs::write(&folder.path, r#"{"version": "0.1.0"}"#).unwrap();

        let bumper = VersionBumper::new(&repo, &log);
        let reset =
            bumper.reconcile_minor_bump(&folder, &Version::new(0, 1, 0), &Version::default());

        assert_eq!(reset, Some(Version::new(0, 1, 0)));
    }
}
