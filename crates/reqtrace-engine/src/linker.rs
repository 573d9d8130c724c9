//! Link builder: joins scanner outputs into per-requirement adjacency.
//!
//! Runs only after every scanner has finished: it needs the complete
//! cross-reference indices. Produces exactly one TraceabilityLink per
//! known requirement id, so links can never be orphaned.

use std::collections::BTreeMap;
use std::path::PathBuf;

use reqtrace_core::ids;
use reqtrace_core::model::{
    ComplianceLink, FeatureLink, FeatureRecord, FrameworkCoverage, Requirement, TestRecord,
    TraceabilityLink,
};

use crate::locator;
use crate::vcs::VersionControlGateway;

/// Build the full link map from scanner outputs.
pub fn build_links(
    requirements: &BTreeMap<String, Requirement>,
    tests: &BTreeMap<PathBuf, TestRecord>,
    git_branches: &BTreeMap<String, Vec<String>>,
    compliance: &BTreeMap<String, FrameworkCoverage>,
    features: &BTreeMap<String, FeatureRecord>,
    gateway: &dyn VersionControlGateway,
) -> BTreeMap<String, TraceabilityLink> {
    let mut links = BTreeMap::new();

    for (id, requirement) in requirements {
        let test_paths: Vec<PathBuf> = tests
            .values()
            .filter(|t| t.requirement_refs.contains(id))
            .map(|t| t.file_path.clone())
            .collect();

        let branches = git_branches.get(id).cloned().unwrap_or_default();

        let implementation_files = locator::locate(gateway, id);

        // Unknown standards are silently omitted; the compliance mapping
        // may lag requirement authoring.
        let compliance_frameworks: Vec<ComplianceLink> = requirement
            .compliance_standards
            .iter()
            .filter_map(|standard| {
                compliance.get(standard).map(|cov| ComplianceLink {
                    framework: standard.clone(),
                    clauses: cov.covered_clauses,
                })
            })
            .collect();

        let feature_links: Vec<FeatureLink> = features
            .values()
            .filter(|f| f.requirements.iter().any(|r| ids::ids_match(r, id)))
            .map(|f| FeatureLink {
                name: f.name.clone(),
                domain: f.domain.clone(),
                phase: f.phase.clone(),
            })
            .collect();

        links.insert(
            id.clone(),
            TraceabilityLink {
                tests: test_paths,
                branches,
                implementation_files,
                compliance_frameworks,
                features: feature_links,
            },
        );
    }

    links
}
