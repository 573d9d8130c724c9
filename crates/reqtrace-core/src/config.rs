//! Engine configuration.
//!
//! Built once at startup (optionally from a `reqtrace.toml`) and passed by
//! reference into every component. No component reads ambient config itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for one matrix build.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TraceConfig {
    /// Project root all relative paths resolve against. Default: ".".
    pub project_root: Option<PathBuf>,
    /// Directory scanned for requirement files. Default: "requirements".
    pub requirements_dir: Option<PathBuf>,
    /// Directory scanned for test files. Default: "tests".
    pub tests_dir: Option<PathBuf>,
    /// Two-level feature tree (`domain/feature/README.md`). Default: "features".
    pub features_dir: Option<PathBuf>,
    /// Externally maintained compliance mapping JSON. Default: "compliance/mapping.json".
    pub compliance_file: Option<PathBuf>,
    /// Persisted matrix location. Default: ".reqtrace/traceability-matrix.json".
    pub matrix_path: Option<PathBuf>,
    /// Audit export directory. Default: "audit-export".
    pub output_dir: Option<PathBuf>,
    /// Feature domain allow-list; non-listed top-level directories are skipped.
    #[serde(default)]
    pub feature_domains: Vec<String>,
    /// Reserved subdirectory names skipped inside a domain.
    #[serde(default)]
    pub reserved_dirs: Vec<String>,
    /// Substrings identifying a test file by name.
    #[serde(default)]
    pub test_file_patterns: Vec<String>,
    /// Commit-walk cap for implementation-file queries. Default: 1000.
    pub max_commits: Option<usize>,
}

/// Default feature domains, matching the governed repository layout.
pub const DEFAULT_FEATURE_DOMAINS: &[&str] = &[
    "core",
    "platform",
    "integrations",
    "security",
    "infrastructure",
    "experience",
];

/// Subdirectory names inside a domain that never hold a feature.
pub const DEFAULT_RESERVED_DIRS: &[&str] = &["planning", "tests", "docs", "assets", "templates"];

/// Filename substrings that mark a file as a test.
pub const DEFAULT_TEST_PATTERNS: &[&str] = &[".test.", ".spec.", "_test.", "test_"];

impl TraceConfig {
    /// Returns the effective project root, defaulting to the current directory.
    pub fn effective_project_root(&self) -> PathBuf {
        self.project_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the effective requirements directory.
    pub fn effective_requirements_dir(&self) -> PathBuf {
        self.resolve(self.requirements_dir.as_deref(), "requirements")
    }

    /// Returns the effective tests directory.
    pub fn effective_tests_dir(&self) -> PathBuf {
        self.resolve(self.tests_dir.as_deref(), "tests")
    }

    /// Returns the effective features directory.
    pub fn effective_features_dir(&self) -> PathBuf {
        self.resolve(self.features_dir.as_deref(), "features")
    }

    /// Returns the effective compliance mapping path.
    pub fn effective_compliance_file(&self) -> PathBuf {
        self.resolve(self.compliance_file.as_deref(), "compliance/mapping.json")
    }

    /// Returns the effective persisted-matrix path.
    pub fn effective_matrix_path(&self) -> PathBuf {
        self.resolve(
            self.matrix_path.as_deref(),
            ".reqtrace/traceability-matrix.json",
        )
    }

    /// Returns the effective audit export directory.
    pub fn effective_output_dir(&self) -> PathBuf {
        self.resolve(self.output_dir.as_deref(), "audit-export")
    }

    /// Returns the effective feature domain allow-list.
    pub fn effective_feature_domains(&self) -> Vec<String> {
        if self.feature_domains.is_empty() {
            DEFAULT_FEATURE_DOMAINS.iter().map(|s| s.to_string()).collect()
        } else {
            self.feature_domains.clone()
        }
    }

    /// Returns the effective reserved subdirectory names.
    pub fn effective_reserved_dirs(&self) -> Vec<String> {
        if self.reserved_dirs.is_empty() {
            DEFAULT_RESERVED_DIRS.iter().map(|s| s.to_string()).collect()
        } else {
            self.reserved_dirs.clone()
        }
    }

    /// Returns the effective test filename patterns.
    pub fn effective_test_patterns(&self) -> Vec<String> {
        if self.test_file_patterns.is_empty() {
            DEFAULT_TEST_PATTERNS.iter().map(|s| s.to_string()).collect()
        } else {
            self.test_file_patterns.clone()
        }
    }

    /// Returns the effective commit-walk cap, defaulting to 1000.
    pub fn effective_max_commits(&self) -> usize {
        self.max_commits.unwrap_or(1000)
    }

    fn resolve(&self, configured: Option<&Path>, default: &str) -> PathBuf {
        match configured {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.effective_project_root().join(p),
            None => self.effective_project_root().join(default),
        }
    }
}
