//! Feature descriptor scanner.
//!
//! Features live in a fixed two-level tree: `<root>/<domain>/<feature>/README.md`.
//! Only directories in the domain allow-list are visited, reserved
//! subdirectory names (planning, tests, ...) are skipped, and each README's
//! frontmatter is parsed leniently: a feature with sparse metadata still
//! counts, it just carries defaults.

use std::collections::BTreeMap;
use std::path::Path;

use reqtrace_core::model::FeatureRecord;
use reqtrace_core::TraceError;

use crate::frontmatter::Frontmatter;

/// Scan the feature tree, keyed by feature directory name.
pub fn scan(root: &Path, domains: &[String], reserved: &[String]) -> BTreeMap<String, FeatureRecord> {
    let mut features = BTreeMap::new();

    if !root.is_dir() {
        let e = TraceError::MissingInput {
            path: root.to_path_buf(),
        };
        tracing::warn!(error = %e, "features root missing, skipping");
        return features;
    }

    for domain in domains {
        let domain_dir = root.join(domain);
        if !domain_dir.is_dir() {
            continue;
        }
        let entries = match std::fs::read_dir(&domain_dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(path = %domain_dir.display(), error = %e, "unreadable domain dir, skipping");
                continue;
            }
        };

        for entry in entries.flatten() {
            let feature_dir = entry.path();
            if !feature_dir.is_dir() {
                continue;
            }
            let Some(name) = feature_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || reserved.iter().any(|r| r == name) {
                continue;
            }

            let readme = feature_dir.join("README.md");
            let content = match std::fs::read_to_string(&readme) {
                Ok(c) => c,
                Err(_) => continue, // feature dirs without a README are not features
            };

            let fm = Frontmatter::parse(&content).unwrap_or_default();
            features.insert(
                name.to_string(),
                FeatureRecord {
                    name: name.to_string(),
                    domain: domain.clone(),
                    path: feature_dir.clone(),
                    title: fm.string_or("title", name),
                    phase: fm.string_or("phase", "unphased"),
                    requirements: fm.string_list("requirements"),
                    epic: fm.string("epic"),
                    priority: fm.string_or("priority", "medium"),
                    tests_pending: fm.bool_or("tests_pending", false),
                },
            );
        }
    }

    features
}
