//! Compliance mapping scanner.
//!
//! Reads the externally maintained framework-coverage JSON. The numbers
//! are authoritative input; the engine reports them, it never recomputes
//! them. An absent or malformed mapping degrades to an empty map.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use reqtrace_core::model::FrameworkCoverage;

/// On-disk shape of the mapping artifact.
#[derive(Debug, Deserialize)]
struct ComplianceMapping {
    #[serde(default)]
    framework_coverage: BTreeMap<String, FrameworkCoverage>,
}

/// Load per-framework coverage from the mapping file.
pub fn scan(path: &Path) -> BTreeMap<String, FrameworkCoverage> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "compliance mapping unavailable, continuing without it");
            return BTreeMap::new();
        }
    };
    match serde_json::from_str::<ComplianceMapping>(&content) {
        Ok(mapping) => mapping.framework_coverage,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "compliance mapping unparsable, continuing without it");
            BTreeMap::new()
        }
    }
}
