//! Implementation file locator.
//!
//! Derives "implementation files" for a requirement from version-control
//! history: every path touched by a commit whose message references the
//! requirement id, filtered through inclusion/exclusion pattern sets. A
//! path counts only when it matches an inclusion pattern AND no exclusion
//! pattern. No matching commits is a valid, reportable state, not an error.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::vcs::VersionControlGateway;

/// Paths recognized as implementation code: known source roots or known
/// source file extensions.
const INCLUDE_PATTERNS: &[&str] = &[
    r"^(src|lib|app|apps|packages|services|cmd|internal)/",
    r"\.(rs|ts|tsx|js|jsx|mjs|py|go|java|kt|cs|rb|php|c|cc|cpp|h|hpp|swift)$",
];

/// Paths excluded even when they look like source: test trees, docs,
/// markdown, and READMEs.
const EXCLUDE_PATTERNS: &[&str] = &[
    r"(^|/)(tests?|__tests__|spec|docs?)(/|$)",
    r"\.(test|spec)\.",
    r"_test\.",
    r"\.md$",
    r"(^|/)README",
];

fn include_set() -> &'static Vec<Regex> {
    static SET: OnceLock<Vec<Regex>> = OnceLock::new();
    SET.get_or_init(|| {
        INCLUDE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect()
    })
}

fn exclude_set() -> &'static Vec<Regex> {
    static SET: OnceLock<Vec<Regex>> = OnceLock::new();
    SET.get_or_init(|| {
        EXCLUDE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect()
    })
}

/// Classify one repository-relative path.
pub fn is_implementation_path(path: &str) -> bool {
    include_set().iter().any(|re| re.is_match(path))
        && !exclude_set().iter().any(|re| re.is_match(path))
}

/// Implementation files for `id`: the deduped union of paths touched by
/// commits referencing it, filtered by the classifier. Failed queries
/// degrade to empty.
pub fn locate(gateway: &dyn VersionControlGateway, id: &str) -> Vec<String> {
    let commits = match gateway.find_commits_referencing(id) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "commit query failed, no implementation evidence");
            return Vec::new();
        }
    };

    let files: BTreeSet<String> = commits
        .into_iter()
        .flat_map(|c| c.files)
        .filter(|p| is_implementation_path(p))
        .collect();
    files.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::FixtureGateway;

    #[test]
    fn source_paths_are_included() {
        assert!(is_implementation_path("src/auth/login.ts"));
        assert!(is_implementation_path("packages/api/handler.py"));
        assert!(is_implementation_path("tools/build.rs"));
    }

    #[test]
    fn test_and_doc_paths_are_excluded() {
        assert!(!is_implementation_path("tests/auth_test.rs"));
        assert!(!is_implementation_path("src/__tests__/login.test.ts"));
        assert!(!is_implementation_path("src/auth/login.spec.ts"));
        assert!(!is_implementation_path("docs/design.md"));
        assert!(!is_implementation_path("src/README.md"));
        assert!(!is_implementation_path("README.md"));
    }

    #[test]
    fn unrecognized_paths_are_not_implementation() {
        assert!(!is_implementation_path("Makefile"));
        assert!(!is_implementation_path("config/settings.yaml"));
    }

    #[test]
    fn locate_unions_and_dedupes() {
        let gateway = FixtureGateway::new()
            .with_commit(
                "a1",
                "REQ-010: implement login",
                &["src/login.ts", "docs/login.md"],
            )
            .with_commit(
                "b2",
                "REQ-010: follow-up fix",
                &["src/login.ts", "src/session.ts"],
            )
            .with_commit("c3", "unrelated", &["src/other.ts"]);

        let files = locate(&gateway, "REQ-010");
        assert_eq!(files, vec!["src/login.ts", "src/session.ts"]);
    }

    #[test]
    fn locate_degrades_on_gateway_failure() {
        let gateway = FixtureGateway::new().failing();
        assert!(locate(&gateway, "REQ-010").is_empty());
    }
}
