//! CSV exporter: one row per requirement.

use reqtrace_core::model::Matrix;

const HEADER: &str =
    "requirement_id,title,status,test_count,branch_count,compliance_frameworks,coverage_percentage";

pub fn render(matrix: &Matrix) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in super::requirement_rows(matrix) {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            quote(row.id),
            quote(row.title),
            quote(row.status),
            row.test_count,
            row.branch_count,
            row.framework_count,
            row.coverage_percentage,
        ));
    }
    out
}

/// RFC 4180 quoting: wrap when the field contains a comma, quote, or
/// newline; double embedded quotes.
fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqtrace_core::model::{Requirement, TraceabilityLink};
    use std::path::PathBuf;

    #[test]
    fn quotes_only_when_needed() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn one_row_per_requirement() {
        let mut matrix = Matrix::new("test");
        matrix.requirements.insert(
            "REQ-001".to_string(),
            Requirement {
                id: "REQ-001".to_string(),
                title: "Login, with SSO".to_string(),
                epic: None,
                status: "active".to_string(),
                priority: "high".to_string(),
                compliance_standards: Vec::new(),
                dependencies: Vec::new(),
                file_path: PathBuf::from("requirements/req-001.md"),
                last_modified: None,
            },
        );
        matrix
            .traceability_links
            .insert("REQ-001".to_string(), TraceabilityLink::default());

        let rendered = render(&matrix);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("requirement_id,"));
        assert_eq!(lines[1], "REQ-001,\"Login, with SSO\",active,0,0,0,0");
    }
}
