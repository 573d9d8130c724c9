//! The aggregate traceability matrix and its derived link/coverage types.
//!
//! Every map here is a `BTreeMap`: the audit signature is a hash over the
//! serialized matrix, so key iteration order must be fixed. Hash maps with
//! nondeterministic iteration order would produce phantom signature drift
//! between identical runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifacts::{FeatureRecord, FrameworkCoverage, TestRecord};
use super::requirement::Requirement;

/// Integer percentage with the engine-wide rounding rule:
/// `round(covered/total*100)`, and 0 when the denominator is 0.
pub fn percentage(covered: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((covered as f64 / total as f64) * 100.0).round() as u32
    }
}

/// A requirement's link into one compliance framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceLink {
    pub framework: String,
    /// Covered clause count at the time of the scan.
    pub clauses: u32,
}

/// A requirement's link to one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLink {
    pub name: String,
    pub domain: String,
    pub phase: String,
}

/// Everything connected to one requirement. One link record exists per
/// known requirement id, never for ids outside the requirement map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceabilityLink {
    pub tests: Vec<PathBuf>,
    pub branches: Vec<String>,
    pub implementation_files: Vec<String>,
    pub compliance_frameworks: Vec<ComplianceLink>,
    pub features: Vec<FeatureLink>,
}

/// Requirements with at least one test over all requirements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RequirementCoverage {
    pub total: usize,
    pub tested: usize,
    pub percentage: u32,
}

/// Feature linkage, measured two ways: features with any linked
/// requirement, and features where any linked requirement has a test.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCoverage {
    pub total: usize,
    pub with_requirements: usize,
    pub with_requirements_percentage: u32,
    pub with_tested_requirements: usize,
    pub with_tested_requirements_percentage: u32,
}

/// The three coverage granularities of one matrix build.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub requirements: RequirementCoverage,
    pub features: FeatureCoverage,
    /// Pass-through of the externally supplied per-framework numbers.
    pub compliance: BTreeMap<String, FrameworkCoverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixMetadata {
    pub generated_at: DateTime<Utc>,
    pub generator_version: String,
}

/// Tamper-evidence record: SHA-256 over the canonical serialized matrix
/// body, computed strictly after every other field is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub signature: String,
    pub timestamp: DateTime<Utc>,
}

/// The aggregate root produced by one `generate` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub metadata: MatrixMetadata,
    pub requirements: BTreeMap<String, Requirement>,
    pub tests: BTreeMap<PathBuf, TestRecord>,
    /// Requirement id → branch names (1:N).
    pub git_branches: BTreeMap<String, Vec<String>>,
    pub compliance_frameworks: BTreeMap<String, FrameworkCoverage>,
    pub features: BTreeMap<String, FeatureRecord>,
    pub traceability_links: BTreeMap<String, TraceabilityLink>,
    pub coverage: CoverageSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_trail: Option<AuditTrail>,
}

impl Matrix {
    /// An empty matrix stamped with the given generator version.
    pub fn new(generator_version: &str) -> Self {
        Self {
            metadata: MatrixMetadata {
                generated_at: Utc::now(),
                generator_version: generator_version.to_string(),
            },
            requirements: BTreeMap::new(),
            tests: BTreeMap::new(),
            git_branches: BTreeMap::new(),
            compliance_frameworks: BTreeMap::new(),
            features: BTreeMap::new(),
            traceability_links: BTreeMap::new(),
            coverage: CoverageSummary::default(),
            audit_trail: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn percentage_zero_denominator_is_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
    }
}
