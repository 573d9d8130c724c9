//! A tracked requirement, parsed from a requirement file's frontmatter.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One requirement record. Identity is `id`, unique within a scan;
/// immutable for the duration of one matrix build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Canonical id (`REQ-###`).
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    pub status: String,
    pub priority: String,
    /// Compliance standards this requirement claims (e.g. "SOC2", "ISO27001").
    #[serde(default)]
    pub compliance_standards: Vec<String>,
    /// Other requirement ids this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}
