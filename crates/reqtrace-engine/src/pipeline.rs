//! Pipeline orchestration: scan → link → coverage → sign → persist.
//!
//! Each phase consumes the previous phase's immutable output. Scanners are
//! independent and degrade individually; the link builder only runs once
//! all of them have finished. Only persistence and export I/O is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use reqtrace_core::model::Matrix;
use reqtrace_core::{TraceConfig, TraceError};

use crate::coverage::{self, RequirementScore};
use crate::vcs::VersionControlGateway;
use crate::{export, linker, scanner, signer};

/// Version stamped into matrix metadata.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The engine facade the CLI drives.
pub struct TraceEngine<'a> {
    config: &'a TraceConfig,
    gateway: &'a dyn VersionControlGateway,
}

impl<'a> TraceEngine<'a> {
    pub fn new(config: &'a TraceConfig, gateway: &'a dyn VersionControlGateway) -> Self {
        Self { config, gateway }
    }

    /// Build a fresh matrix from all artifact scans, sign it, and persist
    /// it to the configured matrix path.
    pub fn generate(&self) -> Result<Matrix, TraceError> {
        let matrix = self.build()?;
        self.persist(&matrix)?;
        Ok(matrix)
    }

    /// Build a matrix without persisting it.
    pub fn build(&self) -> Result<Matrix, TraceError> {
        let mut matrix = Matrix::new(GENERATOR_VERSION);

        // Phase 1: scanners. Independent, each degrades to empty on failure.
        matrix.requirements = scanner::requirements::scan(&self.config.effective_requirements_dir());
        matrix.tests = scanner::tests::scan(
            &self.config.effective_tests_dir(),
            &self.config.effective_test_patterns(),
        );
        matrix.git_branches = scanner::branches::scan(self.gateway);
        matrix.compliance_frameworks =
            scanner::compliance::scan(&self.config.effective_compliance_file());
        matrix.features = scanner::features::scan(
            &self.config.effective_features_dir(),
            &self.config.effective_feature_domains(),
            &self.config.effective_reserved_dirs(),
        );

        // Phase 2: link building needs the complete cross-reference indices.
        matrix.traceability_links = linker::build_links(
            &matrix.requirements,
            &matrix.tests,
            &matrix.git_branches,
            &matrix.compliance_frameworks,
            &matrix.features,
            self.gateway,
        );

        // Phase 3: coverage.
        matrix.coverage = coverage::summarize(
            &matrix.requirements,
            &matrix.features,
            &matrix.compliance_frameworks,
            &matrix.traceability_links,
        );

        // Phase 4: signing runs strictly last.
        signer::sign(&mut matrix)?;

        tracing::info!(
            requirements = matrix.requirements.len(),
            tests = matrix.tests.len(),
            features = matrix.features.len(),
            coverage = matrix.coverage.requirements.percentage,
            "matrix built"
        );
        Ok(matrix)
    }

    /// Reuse the persisted matrix when present and signature-valid;
    /// otherwise regenerate (and persist) a fresh one.
    pub fn load_or_generate(&self) -> Result<Matrix, TraceError> {
        let path = self.config.effective_matrix_path();
        if let Some(matrix) = self.load(&path) {
            if signer::verify(&matrix) {
                return Ok(matrix);
            }
            tracing::warn!(
                path = %path.display(),
                "persisted matrix failed signature verification, regenerating"
            );
        }
        self.generate()
    }

    /// Score one requirement against the 80% validation threshold.
    pub fn validate(&self, requirement_id: &str) -> Result<RequirementScore, TraceError> {
        let trimmed = requirement_id.trim();
        let id = reqtrace_core::ids::extract_loose_reference(trimmed).unwrap_or_else(|| {
            if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
                reqtrace_core::ids::normalize_id(trimmed)
            } else {
                trimmed.to_uppercase()
            }
        });
        let matrix = self.load_or_generate()?;

        let Some(link) = matrix.traceability_links.get(&id) else {
            return Err(TraceError::UnknownRequirement { id });
        };
        Ok(coverage::score_requirement(&id, link))
    }

    /// Coverage summary from the persisted (or freshly generated) matrix.
    pub fn coverage_summary(&self) -> Result<reqtrace_core::CoverageSummary, TraceError> {
        Ok(self.load_or_generate()?.coverage)
    }

    /// Write the audit export artifacts. Returns the written paths.
    /// Any write failure here is fatal.
    pub fn audit_export(&self, output_dir: Option<&Path>) -> Result<Vec<PathBuf>, TraceError> {
        let matrix = self.load_or_generate()?;
        let dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.effective_output_dir());
        fs::create_dir_all(&dir).map_err(|e| TraceError::WriteFailed {
            path: dir.clone(),
            source: e,
        })?;

        let artifacts = [
            ("traceability-matrix.json", export::json::render(&matrix)?),
            ("traceability-matrix.csv", export::csv::render(&matrix)),
            ("traceability-matrix.html", export::html::render(&matrix)),
            ("compliance-summary.md", export::markdown::render(&matrix)),
        ];

        let mut written = Vec::new();
        for (name, content) in artifacts {
            let path = dir.join(name);
            fs::write(&path, content).map_err(|e| TraceError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;
            written.push(path);
        }
        Ok(written)
    }

    fn persist(&self, matrix: &Matrix) -> Result<(), TraceError> {
        let path = self.config.effective_matrix_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TraceError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = export::json::render(matrix)?;
        fs::write(&path, json).map_err(|e| TraceError::WriteFailed { path, source: e })
    }

    fn load(&self, path: &Path) -> Option<Matrix> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "persisted matrix unparsable, regenerating");
                None
            }
        }
    }
}
