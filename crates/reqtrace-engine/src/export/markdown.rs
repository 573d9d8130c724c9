//! Compliance summary exporter: human-readable Markdown.

use reqtrace_core::model::Matrix;

pub fn render(matrix: &Matrix) -> String {
    let coverage = &matrix.coverage;
    let mut out = String::new();

    out.push_str("# Compliance Summary\n\n");
    out.push_str(&format!(
        "Generated {} by reqtrace {}\n\n",
        matrix.metadata.generated_at.to_rfc3339(),
        matrix.metadata.generator_version,
    ));

    out.push_str("## Coverage\n\n");
    out.push_str(&format!(
        "- Requirements with tests: {}/{} ({}%)\n",
        coverage.requirements.tested,
        coverage.requirements.total,
        coverage.requirements.percentage,
    ));
    out.push_str(&format!(
        "- Features linked to requirements: {}/{} ({}%)\n",
        coverage.features.with_requirements,
        coverage.features.total,
        coverage.features.with_requirements_percentage,
    ));
    out.push_str(&format!(
        "- Features with tested requirements: {}/{} ({}%)\n\n",
        coverage.features.with_tested_requirements,
        coverage.features.total,
        coverage.features.with_tested_requirements_percentage,
    ));

    out.push_str("## Frameworks\n\n");
    if coverage.compliance.is_empty() {
        out.push_str("No compliance mapping available.\n");
    } else {
        out.push_str("| Framework | Clauses | Covered | Coverage |\n");
        out.push_str("|---|---|---|---|\n");
        for (name, fw) in &coverage.compliance {
            out.push_str(&format!(
                "| {} | {} | {} | {}% |\n",
                name, fw.total_clauses, fw.covered_clauses, fw.coverage_percentage,
            ));
        }
    }

    if let Some(trail) = &matrix.audit_trail {
        out.push_str(&format!(
            "\n---\nAudit signature: `{}` ({})\n",
            trail.signature,
            trail.timestamp.to_rfc3339(),
        ));
    }

    out
}
