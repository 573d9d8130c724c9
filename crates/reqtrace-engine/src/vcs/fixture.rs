//! In-memory gateway for tests and dry runs: recorded history instead
//! of a real repository.

use reqtrace_core::TraceError;

use super::{vcs_error, CommitRecord, VersionControlGateway};

/// Gateway serving pre-recorded branches and commits.
#[derive(Debug, Clone, Default)]
pub struct FixtureGateway {
    branches: Vec<String>,
    commits: Vec<CommitRecord>,
    fail: bool,
}

impl FixtureGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branches(mut self, branches: &[&str]) -> Self {
        self.branches = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_commit(mut self, sha: &str, message: &str, files: &[&str]) -> Self {
        self.commits.push(CommitRecord {
            sha: sha.to_string(),
            message: message.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    /// Make every query fail, for exercising the degraded path.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl VersionControlGateway for FixtureGateway {
    fn list_branches(&self) -> Result<Vec<String>, TraceError> {
        if self.fail {
            return Err(vcs_error("fixture gateway configured to fail"));
        }
        Ok(self.branches.clone())
    }

    fn find_commits_referencing(&self, id: &str) -> Result<Vec<CommitRecord>, TraceError> {
        if self.fail {
            return Err(vcs_error("fixture gateway configured to fail"));
        }
        Ok(self
            .commits
            .iter()
            .filter(|c| c.message.contains(id))
            .cloned()
            .collect())
    }
}
