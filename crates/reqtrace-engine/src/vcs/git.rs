//! git2-backed gateway implementation.

use std::path::{Path, PathBuf};

use reqtrace_core::TraceError;

use super::{vcs_error, CommitRecord, VersionControlGateway};

/// Gateway reading branch and commit data from a local git repository.
pub struct GitGateway {
    repo_path: PathBuf,
    max_commits: usize,
}

impl GitGateway {
    pub fn new(repo_path: &Path, max_commits: usize) -> Self {
        Self {
            repo_path: repo_path.to_path_buf(),
            max_commits,
        }
    }

    fn open(&self) -> Result<git2::Repository, TraceError> {
        git2::Repository::discover(&self.repo_path)
            .map_err(|e| vcs_error(format!("failed to open repository: {e}")))
    }

    /// Paths touched by a commit, via diff against its first parent
    /// (or the empty tree for a root commit). Per-commit failures yield
    /// an empty list rather than aborting the walk.
    fn touched_files(repo: &git2::Repository, commit: &git2::Commit) -> Vec<String> {
        let tree = match commit.tree() {
            Ok(t) => t,
            Err(_) => return Vec::new(),
        };
        let parent_tree = commit.parent(0).ok().and_then(|p| p.tree().ok());

        let diff = match repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None) {
            Ok(d) => d,
            Err(_) => return Vec::new(),
        };

        let mut files = Vec::new();
        let _ = diff.foreach(
            &mut |delta, _| {
                if let Some(path) = delta.new_file().path() {
                    files.push(path.to_string_lossy().to_string());
                }
                true
            },
            None,
            None,
            None,
        );
        files
    }
}

impl VersionControlGateway for GitGateway {
    fn list_branches(&self) -> Result<Vec<String>, TraceError> {
        let repo = self.open()?;
        let branches = repo
            .branches(None)
            .map_err(|e| vcs_error(format!("failed to list branches: {e}")))?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, kind) = match branch {
                Ok(b) => b,
                Err(_) => continue,
            };
            let Ok(Some(name)) = branch.name() else {
                continue;
            };
            // Match the `branch -a` presentation the rest of the engine
            // expects: remote branches carry the remotes/ prefix.
            match kind {
                git2::BranchType::Local => names.push(name.to_string()),
                git2::BranchType::Remote => names.push(format!("remotes/{name}")),
            }
        }
        Ok(names)
    }

    fn find_commits_referencing(&self, id: &str) -> Result<Vec<CommitRecord>, TraceError> {
        let repo = self.open()?;
        let mut revwalk = repo
            .revwalk()
            .map_err(|e| vcs_error(format!("failed to create revwalk: {e}")))?;
        revwalk
            .push_head()
            .map_err(|e| vcs_error(format!("failed to push HEAD: {e}")))?;
        revwalk
            .set_sorting(git2::Sort::TIME)
            .map_err(|e| vcs_error(format!("failed to set sorting: {e}")))?;

        let mut records = Vec::new();
        for (walked, oid_result) in revwalk.enumerate() {
            if walked >= self.max_commits {
                break;
            }
            let oid = match oid_result {
                Ok(oid) => oid,
                Err(_) => continue,
            };
            let commit = match repo.find_commit(oid) {
                Ok(c) => c,
                Err(_) => continue,
            };
            let message = commit.message().unwrap_or("").to_string();
            if !message.contains(id) {
                continue;
            }
            records.push(CommitRecord {
                sha: oid.to_string(),
                message,
                files: Self::touched_files(&repo, &commit),
            });
        }
        Ok(records)
    }
}
