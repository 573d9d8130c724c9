//! Requirement identifiers: extraction, normalization, tolerant matching.
//!
//! All reference matching in the engine funnels through this module so the
//! coverage numbers stay internally consistent: the test scanner and any
//! other free-text consumer see identical semantics.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Canonical requirement id pattern: `REQ-` plus exactly three digits,
/// case-sensitive. `\b` on both sides rejects run-ons like `REQ-1044`
/// (which would otherwise yield a phantom `REQ-104`).
const ID_PATTERN: &str = r"\bREQ-\d{3}\b";

/// Case-insensitive form used for branch names and commit messages, where
/// authors routinely write `req-44` or `Req-044`.
const LOOSE_PATTERN: &str = r"(?i)\breq-(\d+)\b";

fn strict_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ID_PATTERN).unwrap())
}

fn loose_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LOOSE_PATTERN).unwrap())
}

/// Extract all canonical requirement references from free text, deduped.
///
/// Case-sensitive and exact: `REQ-001` matches, `req-001` and `REQ-1` do not.
pub fn extract_references(text: &str) -> BTreeSet<String> {
    strict_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract a requirement id from loosely-authored text (branch names,
/// commit messages) and normalize it, or None when no `req-NNN` appears.
pub fn extract_loose_reference(text: &str) -> Option<String> {
    loose_regex()
        .captures(text)
        .map(|caps| normalize_id(&caps[1]))
}

/// Normalize a bare numeric part or full id to canonical `REQ-NNN` form:
/// uppercase prefix, digits zero-padded to at least three.
pub fn normalize_id(raw: &str) -> String {
    let digits = raw
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit());
    if digits.len() >= 3 {
        format!("REQ-{digits}")
    } else {
        format!("REQ-{digits:0>3}")
    }
}

/// Tolerant id comparison used for feature↔requirement linking.
///
/// Matches when the lowercased ids are equal, or when one id with any
/// `req-` prefix stripped is a suffix of the other. The suffix fallback
/// handles features that list bare numbers (`requirements: ["044"]`), but
/// it can false-positive on short numeric ids (`044` also suffixes
/// `req-1044`). That looseness is a known, deliberate property of the
/// matcher; callers wanting strict matching should compare normalized ids.
pub fn ids_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let a_bare = a.strip_prefix("req-").unwrap_or(&a);
    let b_bare = b.strip_prefix("req-").unwrap_or(&b);
    if a_bare.is_empty() || b_bare.is_empty() {
        return false;
    }
    a_bare.ends_with(b_bare) || b_bare.ends_with(a_bare)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_is_case_sensitive_and_exact() {
        let refs = extract_references("See REQ-001 and req-001 and REQ-1");
        assert_eq!(refs.len(), 1);
        assert!(refs.contains("REQ-001"));
    }

    #[test]
    fn extraction_rejects_run_on_digits() {
        let refs = extract_references("REQ-1044 is not a three-digit id");
        assert!(refs.is_empty());
    }

    #[test]
    fn extraction_dedupes() {
        let refs = extract_references("REQ-044 then REQ-044 again, plus REQ-045");
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn loose_extraction_normalizes() {
        assert_eq!(
            extract_loose_reference("feature/req-44-login"),
            Some("REQ-044".to_string())
        );
        assert_eq!(
            extract_loose_reference("hotfix/REQ-102-rollback"),
            Some("REQ-102".to_string())
        );
        assert_eq!(extract_loose_reference("main"), None);
    }

    #[test]
    fn normalize_pads_short_ids() {
        assert_eq!(normalize_id("44"), "REQ-044");
        assert_eq!(normalize_id("044"), "REQ-044");
        assert_eq!(normalize_id("1044"), "REQ-1044");
    }

    #[test]
    fn ids_match_exact_and_case() {
        assert!(ids_match("REQ-044", "req-044"));
        assert!(ids_match("REQ-044", "REQ-044"));
        assert!(!ids_match("REQ-044", "REQ-045"));
    }

    #[test]
    fn ids_match_bare_number_suffix() {
        assert!(ids_match("044", "REQ-044"));
        assert!(ids_match("REQ-044", "44"));
    }

    #[test]
    fn ids_match_known_false_positive_is_preserved() {
        // Documented heuristic limitation: bare "044" suffixes "1044".
        assert!(ids_match("044", "req-1044"));
    }

    #[test]
    fn ids_match_rejects_empty() {
        assert!(!ids_match("", "REQ-044"));
        assert!(!ids_match("REQ-044", "  "));
    }
}
