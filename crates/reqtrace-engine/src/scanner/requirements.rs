//! Requirement file scanner.
//!
//! A requirement file is a markdown file whose stem starts with `req-`
//! (any case) followed by digits, carrying frontmatter with at least an
//! `id` field. Files without a parseable id are skipped, not fatal.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use reqtrace_core::ids;
use reqtrace_core::model::Requirement;
use reqtrace_core::TraceError;

use crate::frontmatter::Frontmatter;

fn filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^req-\d+").unwrap())
}

/// Scan `root` for requirement files, keyed by normalized requirement id.
pub fn scan(root: &Path) -> BTreeMap<String, Requirement> {
    let mut requirements = BTreeMap::new();

    for path in super::walk_files(root) {
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !filename_regex().is_match(stem) {
            continue;
        }

        let requirement = match parse_file(&path) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping requirement file");
                continue;
            }
        };

        if let Some(previous) = requirements.insert(requirement.id.clone(), requirement) {
            tracing::warn!(
                id = %previous.id,
                path = %previous.file_path.display(),
                "duplicate requirement id, later file wins"
            );
        }
    }

    requirements
}

fn parse_file(path: &Path) -> Result<Requirement, TraceError> {
    let content = std::fs::read_to_string(path).map_err(|e| TraceError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_requirement(path, &content)
}

/// Parse one requirement file's frontmatter into a record. Missing or
/// unparseable frontmatter, or a missing `id` field, is a malformed
/// artifact; the file is skipped, never fatal.
fn parse_requirement(path: &Path, content: &str) -> Result<Requirement, TraceError> {
    let fm = Frontmatter::parse(content).ok_or_else(|| TraceError::MalformedArtifact {
        path: path.to_path_buf(),
        message: "missing or unparseable frontmatter".to_string(),
    })?;
    let raw_id = fm.string("id").ok_or_else(|| TraceError::MalformedArtifact {
        path: path.to_path_buf(),
        message: "frontmatter has no id field".to_string(),
    })?;
    let id = ids::extract_loose_reference(&raw_id).unwrap_or(raw_id);

    Ok(Requirement {
        id,
        title: fm.string_or("title", "Untitled"),
        epic: fm.string("epic"),
        status: fm.string_or("status", "draft"),
        priority: fm.string_or("priority", "medium"),
        compliance_standards: fm.string_list("compliance"),
        dependencies: fm.string_list("dependencies"),
        file_path: path.to_path_buf(),
        last_modified: super::modified_time(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_full_frontmatter() {
        let content = "---\n\
            id: REQ-044\n\
            title: Tolerant linking\n\
            epic: governance\n\
            status: active\n\
            priority: high\n\
            compliance: [SOC2, HIPAA]\n\
            dependencies: [REQ-010]\n\
            ---\n\n# Body\n";
        let req = parse_requirement(&PathBuf::from("req-044.md"), content).unwrap();
        assert_eq!(req.id, "REQ-044");
        assert_eq!(req.title, "Tolerant linking");
        assert_eq!(req.compliance_standards, vec!["SOC2", "HIPAA"]);
        assert_eq!(req.dependencies, vec!["REQ-010"]);
    }

    #[test]
    fn lowercase_id_is_normalized() {
        let content = "---\nid: req-44\ntitle: X\n---\n";
        let req = parse_requirement(&PathBuf::from("req-044.md"), content).unwrap();
        assert_eq!(req.id, "REQ-044");
    }

    #[test]
    fn missing_id_is_malformed() {
        let content = "---\ntitle: No id here\n---\n";
        let err = parse_requirement(&PathBuf::from("req-001.md"), content).unwrap_err();
        assert!(matches!(err, TraceError::MalformedArtifact { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn missing_frontmatter_is_malformed() {
        let err = parse_requirement(&PathBuf::from("req-001.md"), "# heading only\n").unwrap_err();
        assert!(matches!(err, TraceError::MalformedArtifact { .. }));
    }

    #[test]
    fn missing_fields_default() {
        let content = "---\nid: REQ-001\n---\n";
        let req = parse_requirement(&PathBuf::from("req-001.md"), content).unwrap();
        assert_eq!(req.title, "Untitled");
        assert_eq!(req.status, "draft");
        assert_eq!(req.priority, "medium");
        assert!(req.compliance_standards.is_empty());
    }

    #[test]
    fn filename_convention_is_case_insensitive() {
        assert!(filename_regex().is_match("REQ-001-login"));
        assert!(filename_regex().is_match("req-044"));
        assert!(!filename_regex().is_match("readme"));
        assert!(!filename_regex().is_match("request-handling"));
    }
}
