//! Version-control access behind an injectable gateway.
//!
//! The engine never shells out or opens a repository directly; everything
//! goes through [`VersionControlGateway`] so tests can substitute recorded
//! history instead of a real repository. A failing or absent repository is
//! a degraded input (empty results), never a fatal abort; shallow clones
//! and export tarballs are valid things to run the engine against.

pub mod fixture;
pub mod git;

pub use fixture::FixtureGateway;
pub use git::GitGateway;

use reqtrace_core::TraceError;

/// One commit relevant to a requirement query.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    /// Paths touched by this commit, repository-relative.
    pub files: Vec<String>,
}

/// Read-only view of the project's version-control history.
pub trait VersionControlGateway {
    /// All local and remote branch names, as the tool reports them
    /// (remote names may carry a `remotes/<remote>/` prefix).
    fn list_branches(&self) -> Result<Vec<String>, TraceError>;

    /// Commits whose message contains `id`, newest first, bounded by the
    /// gateway's commit-walk cap.
    fn find_commits_referencing(&self, id: &str) -> Result<Vec<CommitRecord>, TraceError>;
}

pub(crate) fn vcs_error(message: impl Into<String>) -> TraceError {
    TraceError::VersionControl {
        message: message.into(),
    }
}
