//! Report exporters.
//!
//! Stateless renderers over a finished matrix. Each returns a string; the
//! pipeline owns writing them to disk. Safe to run repeatedly and in any
//! order, since none of them mutate the matrix.

pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;

use reqtrace_core::model::Matrix;

use crate::coverage::score_requirement;

/// Per-requirement row shared by the CSV and HTML exporters.
pub(crate) struct RequirementRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub status: &'a str,
    pub test_count: usize,
    pub branch_count: usize,
    pub framework_count: usize,
    pub coverage_percentage: u32,
}

pub(crate) fn requirement_rows(matrix: &Matrix) -> Vec<RequirementRow<'_>> {
    matrix
        .requirements
        .values()
        .filter_map(|req| {
            // One link record exists per requirement id.
            let link = matrix.traceability_links.get(&req.id)?;
            Some(RequirementRow {
                id: &req.id,
                title: &req.title,
                status: &req.status,
                test_count: link.tests.len(),
                branch_count: link.branches.len(),
                framework_count: link.compliance_frameworks.len(),
                coverage_percentage: score_requirement(&req.id, link).percentage,
            })
        })
        .collect()
}
