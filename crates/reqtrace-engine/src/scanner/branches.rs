//! Git branch scanner.
//!
//! Lists local and remote branches through the gateway, strips the
//! `remotes/<remote>/` presentation prefix, and groups branch names under
//! the normalized requirement id found in the name. Branches without a
//! `req-NNN` substring are ignored. A failing gateway degrades to an
//! empty map; a repository without history is valid, just uncovered.

use std::collections::BTreeMap;

use reqtrace_core::ids;

use crate::vcs::VersionControlGateway;

/// Group branch names by the normalized requirement id they reference.
pub fn scan(gateway: &dyn VersionControlGateway) -> BTreeMap<String, Vec<String>> {
    let branches = match gateway.list_branches() {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "branch listing failed, continuing without branches");
            return BTreeMap::new();
        }
    };

    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for raw in branches {
        let name = strip_remote_prefix(raw.trim());
        if name.is_empty() || name.ends_with("/HEAD") || name == "HEAD" {
            continue;
        }
        let Some(id) = ids::extract_loose_reference(name) else {
            continue;
        };
        let entry = grouped.entry(id).or_default();
        if !entry.iter().any(|b| b == name) {
            entry.push(name.to_string());
        }
    }

    for branches in grouped.values_mut() {
        branches.sort();
    }
    grouped
}

/// Strip a leading `remotes/<remote>/` from a branch listing entry.
fn strip_remote_prefix(name: &str) -> &str {
    let Some(rest) = name.strip_prefix("remotes/") else {
        return name;
    };
    match rest.split_once('/') {
        Some((_, branch)) => branch,
        None => rest,
    }
}
