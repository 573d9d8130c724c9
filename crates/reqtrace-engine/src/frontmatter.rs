//! Frontmatter extraction and lenient field access.
//!
//! Requirement files and feature READMEs carry a YAML block between `---`
//! fences at the top of the file. The block is hand-authored, so parsing
//! is tolerant: the block is run through a real YAML parser, then fields
//! are pulled out individually with defaults for anything missing or of
//! the wrong shape. A missing field is a partial record, not an error.

use serde_yaml::Value;

/// A parsed frontmatter block with lenient typed accessors.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    mapping: serde_yaml::Mapping,
}

impl Frontmatter {
    /// Extract and parse the `---`-fenced block at the start of `content`.
    ///
    /// Returns None when there is no opening fence, no closing fence, or
    /// the block is not valid YAML; callers skip such files.
    pub fn parse(content: &str) -> Option<Self> {
        let rest = content.strip_prefix("---")?;
        let rest = rest.strip_prefix('\r').unwrap_or(rest);
        let rest = rest.strip_prefix('\n')?;
        let end = rest.find("\n---")?;
        let block = &rest[..end];
        match serde_yaml::from_str::<Value>(block) {
            Ok(Value::Mapping(mapping)) => Some(Self { mapping }),
            Ok(_) | Err(_) => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.mapping.get(key)
    }

    /// String field, with numbers and booleans coerced to their display form.
    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String field with a default for missing/mistyped values.
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.string(key).unwrap_or_else(|| default.to_string())
    }

    /// String-array field (`[a, b, c]` flow style or block style). Scalar
    /// values are promoted to a one-element list; anything else is empty.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }

    /// Boolean field, defaulting to `default` when missing or mistyped.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim() {
                "true" | "yes" => true,
                "false" | "no" => false,
                _ => default,
            },
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_block() {
        let content = "---\nid: REQ-044\ntitle: Fuzzy linking\nstatus: active\n---\n\n# Body\n";
        let fm = Frontmatter::parse(content).unwrap();
        assert_eq!(fm.string("id").as_deref(), Some("REQ-044"));
        assert_eq!(fm.string_or("status", "draft"), "active");
        assert_eq!(fm.string_or("priority", "medium"), "medium");
    }

    #[test]
    fn parses_flow_arrays() {
        let content = "---\nid: REQ-001\ncompliance: [SOC2, ISO27001]\n---\n";
        let fm = Frontmatter::parse(content).unwrap();
        assert_eq!(fm.string_list("compliance"), vec!["SOC2", "ISO27001"]);
    }

    #[test]
    fn scalar_promotes_to_single_element_list() {
        let content = "---\nrequirements: REQ-002\n---\n";
        let fm = Frontmatter::parse(content).unwrap();
        assert_eq!(fm.string_list("requirements"), vec!["REQ-002"]);
    }

    #[test]
    fn numeric_ids_in_lists_survive() {
        // YAML parses [044] entries as numbers when unquoted; they must
        // still come through as strings for tolerant matching.
        let content = "---\nrequirements: [44, \"044\"]\n---\n";
        let fm = Frontmatter::parse(content).unwrap();
        assert_eq!(fm.string_list("requirements"), vec!["44", "044"]);
    }

    #[test]
    fn missing_fence_is_none() {
        assert!(Frontmatter::parse("# Just a heading\n").is_none());
        assert!(Frontmatter::parse("---\nid: REQ-001\nno closing fence").is_none());
    }

    #[test]
    fn unparsable_block_is_none() {
        assert!(Frontmatter::parse("---\n[not: valid: yaml\n---\n").is_none());
    }

    #[test]
    fn bool_fields_tolerate_strings() {
        let content = "---\ntests_pending: \"yes\"\n---\n";
        let fm = Frontmatter::parse(content).unwrap();
        assert!(fm.bool_or("tests_pending", false));
        assert!(!fm.bool_or("absent", false));
    }
}
