use crate::error::{Result, VersionHookError};
use git2::{ErrorCode, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Discover the repository from the current working directory.
    ///
    /// Hooks run with the repository root as working directory, so discovery
    /// from "." finds the right repository.
    pub fn discover() -> Result<Self> {
        Self::open(".")
    }

    /// Open or discover a git repository at a path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// HEAD tree, or None when the repository has no commit yet
    fn head_tree(&self) -> Result<Option<git2::Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remote callbacks with SSH credential resolution.
    ///
    /// Tries on-disk keys in preference order, then the SSH agent, then the
    /// default credential helper.
    fn credential_callbacks() -> git2::RemoteCallbacks<'static> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            VersionHookError::remote(format!("No remote named '{}' found", remote_name))
        })?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = Self::credential_callbacks();

        // Surface per-ref rejections as push failures
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    VersionHookError::remote(format!("Network error during push: {}", e))
                } else {
                    VersionHookError::remote(format!("Failed to push '{}': {}", refspec, e))
                }
            })
    }
}

impl super::Repository for Git2Repository {
    fn staged_file_content(&self, path: &str) -> Result<Option<String>> {
        let index = self.repo.index()?;

        match index.get_path(Path::new(path), 0) {
            Some(entry) => {
                let blob = self.repo.find_blob(entry.id)?;
                Ok(Some(String::from_utf8_lossy(blob.content()).into_owned()))
            }
            None => Ok(None),
        }
    }

    fn committed_file_content(&self, path: &str) -> Result<Option<String>> {
        let tree = match self.head_tree()? {
            Some(tree) => tree,
            None => return Ok(None),
        };

        match tree.get_path(Path::new(path)) {
            Ok(entry) => {
                let object = entry.to_object(&self.repo)?;
                match object.as_blob() {
                    Some(blob) => {
                        Ok(Some(String::from_utf8_lossy(blob.content()).into_owned()))
                    }
                    None => Ok(None),
                }
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn staged_paths(&self, prefix: &str) -> Result<Vec<String>> {
        let head_tree = self.head_tree()?;

        let mut opts = git2::DiffOptions::new();
        if !prefix.is_empty() {
            opts.pathspec(prefix);
        }

        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            let file = delta.new_file().path().or_else(|| delta.old_file().path());
            if let Some(path) = file {
                paths.push(path.to_string_lossy().into_owned());
            }
        }

        Ok(paths)
    }

    fn stage_file(&self, path: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(Path::new(path))?;
        index.write()?;
        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let reference_name = format!("refs/tags/{}", name);

        match self.repo.find_reference(&reference_name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        self.push_refspec(remote, &format!("refs/tags/{0}:refs/tags/{0}", name))
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        let branch = self.current_branch()?;
        self.push_refspec(remote, &format!("refs/heads/{0}:refs/heads/{0}", branch))
    }

    fn last_commit_message(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.message().unwrap_or("").trim().to_string())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            return Err(VersionHookError::branch(
                "HEAD is detached or not on a branch",
            ));
        }

        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| VersionHookError::branch("Branch name is not valid UTF-8"))
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
