//! Pre-commit driver: bump versions for changed sub-projects and refresh
//! the pending deployment tag.

use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::logs::LogManager;
use crate::store::EnvStore;
use crate::versioning::{TagComposer, VersionBumper, VersionReader};

/// Run the pre-commit workflow.
///
/// For each configured folder with staged non-manifest changes: honor a
/// manual minor bump first, fall through to an automatic patch bump when
/// reconciliation signals no action. When any folder had relevant changes
/// the pending tag value is re-derived from the working-tree versions.
///
/// Bump failures are logged and skipped, never fatal; a commit must not be
/// blocked because a version write failed. The hook exits zero when nothing
/// relevant is staged.
pub fn run(config: &Config, repo: &dyn Repository, log: &LogManager) -> Result<()> {
    log.debug("Starting pre-commit hook");

    let reader = VersionReader::new(repo, log);
    let bumper = VersionBumper::new(repo, log);
    let mut any_changes = false;

    for folder in [&config.folders.back, &config.folders.web] {
        if !bumper.has_non_manifest_changes(folder) {
            continue;
        }
        any_changes = true;

        let committed = reader.committed_version(folder);

        let bumped = match reader.staged_version(folder) {
            Some(staged) => bumper
                .reconcile_minor_bump(folder, &staged, &committed)
                .or_else(|| bumper.bump_patch(folder)),
            None => bumper.bump_patch(folder),
        };

        if let Some(version) = bumped {
            log.history(&format!(
                "Bumped version for {}: {}",
                folder.folder, version
            ));
        }
    }

    if !any_changes {
        log.debug("No relevant staged changes - skipping bump");
        return Ok(());
    }

    let store = EnvStore::new(&config.store_path);
    let composer = TagComposer::new(&reader, &store, log);
    composer.derive_and_persist(&config.folders.back, &config.folders.web);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FolderConfig, FoldersConfig, LogConfig};
    use crate::git::MockRepository;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let folder_config = |name: &str| FolderConfig {
            folder: format!("{}/", name),
            path: dir
                .path()
                .join(name)
                .join("package.json")
                .to_string_lossy()
                .into_owned(),
        };

        Config {
            folders: FoldersConfig {
                back: folder_config("back"),
                web: folder_config("web"),
            },
            store_path: dir.path().join(".env").to_string_lossy().into_owned(),
            logs: LogConfig {
                dir: dir.path().join("logs").to_string_lossy().into_owned(),
                max_entries: 500,
                clear_debug_log: false,
            },
        }
    }

    fn write_manifest(folder: &FolderConfig, version: &str) {
        let path = std::path::Path::new(&folder.path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!(r#"{{"version": "{}"}}"#, version)).unwrap();
    }

    #[test]
    fn test_no_staged_changes_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let log = LogManager::new(&config.logs).unwrap();
        let repo = MockRepository::new();

        run(&config, &repo, &log).unwrap();

        assert!(!std::path::Path::new(&config.store_path).exists());
        assert!(repo.staged_adds().is_empty());
    }

    #[test]
    fn test_patch_bump_and_tag_refresh() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let log = LogManager::new(&config.logs).unwrap();

        write_manifest(&config.folders.back, "1.2.3");
        write_manifest(&config.folders.web, "4.5.6");

        let mut repo = MockRepository::new();
        repo.add_staged_path("back/src/server.js");
        repo.set_staged_file(config.folders.back.path.clone(), r#"{"version": "1.2.3"}"#);
        repo.set_committed_file(config.folders.back.path.clone(), r#"{"version": "1.2.3"}"#);

        run(&config, &repo, &log).unwrap();

        // back bumped to 1.2.4, web untouched at 4.5.6
        let back = fs::read_to_string(&config.folders.back.path).unwrap();
        assert!(back.contains("\"version\": \"1.2.4\""));
        let web = fs::read_to_string(&config.folders.web.path).unwrap();
        assert!(web.contains("\"version\": \"4.5.6\""));

        let store = EnvStore::new(&config.store_path);
        assert_eq!(store.read_tag_version().unwrap(), "2.4.5.6");
    }

    #[test]
    fn test_manual_minor_bump_takes_precedence() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let log = LogManager::new(&config.logs).unwrap();

        write_manifest(&config.folders.back, "1.3.5");
        write_manifest(&config.folders.web, "0.1.0");

        let mut repo = MockRepository::new();
        repo.add_staged_path("back/src/server.js");
        repo.set_staged_file(config.folders.back.path.clone(), r#"{"version": "1.3.5"}"#);
        repo.set_committed_file(config.folders.back.path.clone(), r#"{"version": "1.2.9"}"#);

        run(&config, &repo, &log).unwrap();

        // patch reset to 0 at the manually raised minor, not bumped to 1.3.6
        let back = fs::read_to_string(&config.folders.back.path).unwrap();
        assert!(back.contains("\"version\": \"1.3.0\""));

        let store = EnvStore::new(&config.store_path);
        assert_eq!(store.read_tag_version().unwrap(), "3.0.1.0");
    }

    #[test]
    fn test_manifest_only_changes_do_not_bump() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let log = LogManager::new(&config.logs).unwrap();

        write_manifest(&config.folders.back, "1.2.3");
        write_manifest(&config.folders.web, "4.5.6");

        let mut repo = MockRepository::new();
        repo.add_staged_path("back/package.json");

        run(&config, &repo, &log).unwrap();

        let back = fs::read_to_string(&config.folders.back.path).unwrap();
        assert!(back.contains("\"version\": \"1.2.3\""));
        assert!(!std::path::Path::new(&config.store_path).exists());
    }

    #[test]
    fn test_unstaged_manifest_still_patch_bumps() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let log = LogManager::new(&config.logs).unwrap();

        write_manifest(&config.folders.web, "0.2.7");

        let mut repo = MockRepository::new();
        repo.add_staged_path("web/src/app.js");

        run(&config, &repo, &log).unwrap();

        let web = fs::read_to_string(&config.folders.web.path).unwrap();
        assert!(web.contains("\"version\": \"0.2.8\""));
    }
}
