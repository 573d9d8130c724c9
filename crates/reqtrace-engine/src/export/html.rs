//! HTML exporter: a static requirement table with coverage-tier classes.

use reqtrace_core::model::Matrix;

/// CSS class for a coverage value: ≥80 high, 50–79 medium, <50 low.
fn tier_class(percentage: u32) -> &'static str {
    match percentage {
        80.. => "coverage-high",
        50..=79 => "coverage-medium",
        _ => "coverage-low",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render(matrix: &Matrix) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Traceability Matrix</title>\n<style>\n");
    out.push_str("table { border-collapse: collapse; font-family: sans-serif; }\n");
    out.push_str("th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; }\n");
    out.push_str(".coverage-high { background: #d4edda; }\n");
    out.push_str(".coverage-medium { background: #fff3cd; }\n");
    out.push_str(".coverage-low { background: #f8d7da; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<h1>Traceability Matrix</h1>\n");
    out.push_str(&format!(
        "<p>Generated {} by reqtrace {}</p>\n",
        matrix.metadata.generated_at.to_rfc3339(),
        escape(&matrix.metadata.generator_version),
    ));
    out.push_str("<table>\n<thead>\n<tr>");
    for heading in [
        "Requirement",
        "Title",
        "Status",
        "Tests",
        "Branches",
        "Frameworks",
        "Coverage",
    ] {
        out.push_str(&format!("<th>{heading}</th>"));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in super::requirement_rows(matrix) {
        out.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
            tier_class(row.coverage_percentage),
            escape(row.id),
            escape(row.title),
            escape(row.status),
            row.test_count,
            row.branch_count,
            row.framework_count,
            row.coverage_percentage,
        ));
    }

    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_class(100), "coverage-high");
        assert_eq!(tier_class(80), "coverage-high");
        assert_eq!(tier_class(79), "coverage-medium");
        assert_eq!(tier_class(50), "coverage-medium");
        assert_eq!(tier_class(49), "coverage-low");
        assert_eq!(tier_class(0), "coverage-low");
    }

    #[test]
    fn escapes_markup_in_titles() {
        assert_eq!(escape("a <b> & \"c\""), "a &lt;b&gt; &amp; &quot;c&quot;");
    }

    #[test]
    fn renders_a_table() {
        let matrix = Matrix::new("test");
        let html = render(&matrix);
        assert!(html.contains("<table>"));
        assert!(html.contains("Traceability Matrix"));
    }
}
