use crate::error::{Result, VersionHookError};
use crate::git::Repository;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// Read state (staged/committed content, branch, commit message) is set up
/// front; mutating operations record into interior Mutexes so tests can
/// assert which tags were created, pushed, and which paths were staged.
pub struct MockRepository {
    staged_files: HashMap<String, String>,
    committed_files: HashMap<String, String>,
    staged_paths: Vec<String>,
    commit_message: String,
    branch: String,
    tags: Mutex<Vec<String>>,
    pushed_tags: Mutex<Vec<String>>,
    staged_adds: Mutex<Vec<String>>,
    fail_push: bool,
}

impl MockRepository {
    /// Create a new empty mock repository on branch "main"
    pub fn new() -> Self {
        MockRepository {
            staged_files: HashMap::new(),
            committed_files: HashMap::new(),
            staged_paths: Vec::new(),
            commit_message: String::new(),
            branch: "main".to_string(),
            tags: Mutex::new(Vec::new()),
            pushed_tags: Mutex::new(Vec::new()),
            staged_adds: Mutex::new(Vec::new()),
            fail_push: false,
        }
    }

    /// Set the staged (index) content of a path
    pub fn set_staged_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.staged_files.insert(path.into(), content.into());
    }

    /// Set the HEAD content of a path
    pub fn set_committed_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.committed_files.insert(path.into(), content.into());
    }

    /// Add a path to the staged change set
    pub fn add_staged_path(&mut self, path: impl Into<String>) {
        self.staged_paths.push(path.into());
    }

    /// Set the latest commit message
    pub fn set_commit_message(&mut self, message: impl Into<String>) {
        self.commit_message = message.into();
    }

    /// Set the current branch name
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Pre-create a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.lock().unwrap().push(name.into());
    }

    /// Make push operations fail with a remote error
    pub fn fail_pushes(&mut self) {
        self.fail_push = true;
    }

    /// Tags created so far
    pub fn created_tags(&self) -> Vec<String> {
        self.tags.lock().unwrap().clone()
    }

    /// Tags pushed so far
    pub fn pushed_tags(&self) -> Vec<String> {
        self.pushed_tags.lock().unwrap().clone()
    }

    /// Paths passed to stage_file so far
    pub fn staged_adds(&self) -> Vec<String> {
        self.staged_adds.lock().unwrap().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn staged_file_content(&self, path: &str) -> Result<Option<String>> {
        Ok(self.staged_files.get(path).cloned())
    }

    fn committed_file_content(&self, path: &str) -> Result<Option<String>> {
        Ok(self.committed_files.get(path).cloned())
    }

    fn staged_paths(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .staged_paths
            .iter()
            .filter(|p| p.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn stage_file(&self, path: &str) -> Result<()> {
        self.staged_adds.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.lock().unwrap().iter().any(|t| t == name))
    }

    fn create_annotated_tag(&self, name: &str, _message: &str) -> Result<()> {
        self.tags.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn push_tag(&self, _remote: &str, name: &str) -> Result<()> {
        if self.fail_push {
            return Err(VersionHookError::remote("push rejected by mock"));
        }
        self.pushed_tags.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn push_head(&self, _remote: &str) -> Result<()> {
        if self.fail_push {
            return Err(VersionHookError::remote("push rejected by mock"));
        }
        Ok(())
    }

    fn last_commit_message(&self) -> Result<String> {
        Ok(self.commit_message.clone())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_staged_content() {
        let mut repo = MockRepository::new();
        repo.set_staged_file("back/package.json", "{\"version\": \"1.2.3\"}");

        assert_eq!(
            repo.staged_file_content("back/package.json").unwrap(),
            Some("{\"version\": \"1.2.3\"}".to_string())
        );
        assert_eq!(repo.staged_file_content("web/package.json").unwrap(), None);
    }

    #[test]
    fn test_mock_repository_staged_paths_filter_by_prefix() {
        let mut repo = MockRepository::new();
        repo.add_staged_path("back/src/server.js");
        repo.add_staged_path("web/src/app.js");

        let paths = repo.staged_paths("back/").unwrap();
        assert_eq!(paths, vec!["back/src/server.js".to_string()]);
    }

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0.0");

        assert!(repo.tag_exists("v1.0.0.0").unwrap());
        assert!(!repo.tag_exists("v2.0.0.0").unwrap());
    }

    #[test]
    fn test_mock_repository_records_created_and_pushed_tags() {
        let repo = MockRepository::new();
        repo.create_annotated_tag("v1.0.0.0", "v1.0.0.0").unwrap();
        repo.push_tag("origin", "v1.0.0.0").unwrap();

        assert_eq!(repo.created_tags(), vec!["v1.0.0.0".to_string()]);
        assert_eq!(repo.pushed_tags(), vec!["v1.0.0.0".to_string()]);
    }

    #[test]
    fn test_mock_repository_failing_push() {
        let mut repo = MockRepository::new();
        repo.fail_pushes();

        assert!(repo.push_tag("origin", "v1.0.0.0").is_err());
        assert!(repo.pushed_tags().is_empty());
    }

    #[test]
    fn test_mock_repository_default_branch() {
        let repo = MockRepository::default();
        assert_eq!(repo.current_branch().unwrap(), "main");
    }
}
