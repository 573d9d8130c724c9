//! Scanned artifact records: test files, compliance coverage, features.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A test file and the requirements it references. Files with no
/// references never enter the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub file_path: PathBuf,
    pub requirement_refs: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Per-framework clause coverage, loaded from the externally maintained
/// mapping artifact. Authoritative input, never recomputed here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameworkCoverage {
    pub total_clauses: u32,
    pub covered_clauses: u32,
    pub coverage_percentage: u32,
}

/// A feature descriptor parsed from `domain/feature/README.md` frontmatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub name: String,
    pub domain: String,
    pub path: PathBuf,
    pub title: String,
    pub phase: String,
    /// Requirement references as authored; may be bare numbers or
    /// alternate casing; linking applies tolerant matching.
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    pub priority: String,
    pub tests_pending: bool,
}
