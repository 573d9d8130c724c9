//! Error taxonomy for the traceability engine.
//!
//! Scanner-level problems (missing directories, malformed artifacts,
//! version-control failures) are degraded to empty results at the call
//! site and logged; only persistence and export I/O is fatal.

use std::path::PathBuf;

/// Errors that can occur while building, validating, or exporting a matrix.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("input not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("malformed artifact {path}: {message}")]
    MalformedArtifact { path: PathBuf, message: String },

    #[error("version control query failed: {message}")]
    VersionControl { message: String },

    #[error("unknown requirement: {id}")]
    UnknownRequirement { id: String },

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("matrix serialization failed: {message}")]
    Serialization { message: String },
}

impl TraceError {
    /// True for conditions a scanner recovers from by returning empty.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. }
                | Self::MalformedArtifact { .. }
                | Self::VersionControl { .. }
        )
    }
}
