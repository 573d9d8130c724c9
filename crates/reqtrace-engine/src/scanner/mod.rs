//! Artifact scanners: one per artifact kind, all independent.
//!
//! Shared contract: a scanner never aborts the matrix build. A missing
//! directory, unreadable file, or malformed artifact degrades to an empty
//! (or smaller) result with a `tracing::warn!`, and the scan continues.

pub mod branches;
pub mod compliance;
pub mod features;
pub mod requirements;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqtrace_core::TraceError;

/// Recursively collect files under `root`, respecting `.gitignore`.
/// A missing or unreadable root yields an empty list plus a warning.
pub(crate) fn walk_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        let e = TraceError::MissingInput {
            path: root.to_path_buf(),
        };
        tracing::warn!(error = %e, "scan root missing, skipping");
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(root).hidden(false).build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "walk error, skipping entry");
                continue;
            }
        };
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }
    // Stable order: downstream output (and the audit signature) must not
    // depend on directory iteration order.
    files.sort();
    files
}

/// Filesystem mtime as a UTC timestamp, or None when unavailable.
pub(crate) fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified))
}
