//! Coverage calculator.
//!
//! Three independent summaries over the finished link map, plus the
//! per-requirement four-check score used by `validate`. All ratios use
//! the shared rounding rule from the core model (0 when total is 0).

use std::collections::BTreeMap;

use reqtrace_core::ids;
use reqtrace_core::model::{
    percentage, CoverageSummary, FeatureCoverage, FeatureRecord, FrameworkCoverage,
    Requirement, RequirementCoverage, TraceabilityLink,
};

/// A requirement passes validation at or above this score.
pub const VALIDATION_THRESHOLD: u32 = 80;

/// Result of scoring one requirement: four binary checks worth 25% each.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementScore {
    pub id: String,
    pub percentage: u32,
    /// Human-readable list of failed checks, empty at 100%.
    pub gaps: Vec<String>,
}

impl RequirementScore {
    pub fn passes(&self) -> bool {
        self.percentage >= VALIDATION_THRESHOLD
    }
}

/// Score one requirement's link record: tests, branches, implementation
/// files, compliance mapping. 25% each.
pub fn score_requirement(id: &str, link: &TraceabilityLink) -> RequirementScore {
    let mut score = 0u32;
    let mut gaps = Vec::new();

    if link.tests.is_empty() {
        gaps.push("no test files reference this requirement".to_string());
    } else {
        score += 25;
    }
    if link.branches.is_empty() {
        gaps.push("no git branches reference this requirement".to_string());
    } else {
        score += 25;
    }
    if link.implementation_files.is_empty() {
        gaps.push("no implementation commits reference this requirement".to_string());
    } else {
        score += 25;
    }
    if link.compliance_frameworks.is_empty() {
        gaps.push("no compliance framework is mapped".to_string());
    } else {
        score += 25;
    }

    RequirementScore {
        id: id.to_string(),
        percentage: score,
        gaps,
    }
}

/// Aggregate the link map into the matrix-level coverage summary.
pub fn summarize(
    requirements: &BTreeMap<String, Requirement>,
    features: &BTreeMap<String, FeatureRecord>,
    compliance: &BTreeMap<String, FrameworkCoverage>,
    links: &BTreeMap<String, TraceabilityLink>,
) -> CoverageSummary {
    let total = requirements.len();
    let tested = links.values().filter(|l| !l.tests.is_empty()).count();

    let mut with_requirements = 0usize;
    let mut with_tested_requirements = 0usize;
    for feature in features.values() {
        let linked: Vec<&str> = requirements
            .keys()
            .filter(|id| feature.requirements.iter().any(|r| ids::ids_match(r, id)))
            .map(String::as_str)
            .collect();
        if linked.is_empty() {
            continue;
        }
        with_requirements += 1;
        let any_tested = linked
            .iter()
            .any(|id| links.get(*id).is_some_and(|l| !l.tests.is_empty()));
        if any_tested {
            with_tested_requirements += 1;
        }
    }

    CoverageSummary {
        requirements: RequirementCoverage {
            total,
            tested,
            percentage: percentage(tested, total),
        },
        features: FeatureCoverage {
            total: features.len(),
            with_requirements,
            with_requirements_percentage: percentage(with_requirements, features.len()),
            with_tested_requirements,
            with_tested_requirements_percentage: percentage(
                with_tested_requirements,
                features.len(),
            ),
        },
        // Pass-through of externally supplied numbers, never recomputed.
        compliance: compliance.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqtrace_core::model::ComplianceLink;
    use std::path::PathBuf;

    fn link(tests: usize, branches: usize, files: usize, frameworks: usize) -> TraceabilityLink {
        TraceabilityLink {
            tests: (0..tests).map(|i| PathBuf::from(format!("t{i}.test.ts"))).collect(),
            branches: (0..branches).map(|i| format!("feature/req-01{i}")).collect(),
            implementation_files: (0..files).map(|i| format!("src/f{i}.ts")).collect(),
            compliance_frameworks: (0..frameworks)
                .map(|i| ComplianceLink {
                    framework: format!("FW{i}"),
                    clauses: 1,
                })
                .collect(),
            features: Vec::new(),
        }
    }

    #[test]
    fn full_coverage_scores_100_with_no_gaps() {
        let score = score_requirement("REQ-010", &link(1, 1, 1, 1));
        assert_eq!(score.percentage, 100);
        assert!(score.gaps.is_empty());
        assert!(score.passes());
    }

    #[test]
    fn empty_link_scores_0_with_four_gaps() {
        let score = score_requirement("REQ-020", &TraceabilityLink::default());
        assert_eq!(score.percentage, 0);
        assert_eq!(score.gaps.len(), 4);
        assert!(!score.passes());
    }

    #[test]
    fn partial_coverage_fails_below_threshold() {
        // Test + branch but no implementation commits, no compliance.
        let score = score_requirement("REQ-030", &link(1, 1, 0, 0));
        assert_eq!(score.percentage, 50);
        assert_eq!(score.gaps.len(), 2);
        assert!(!score.passes());
    }

    #[test]
    fn three_of_four_fails_the_80_threshold() {
        let score = score_requirement("REQ-040", &link(1, 1, 1, 0));
        assert_eq!(score.percentage, 75);
        assert!(!score.passes());
    }

    #[test]
    fn empty_matrix_summarizes_to_zero() {
        let summary = summarize(
            &BTreeMap::new(),
            &BTreeMap::new(),
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        assert_eq!(summary.requirements.percentage, 0);
        assert_eq!(summary.features.with_requirements_percentage, 0);
    }
}
