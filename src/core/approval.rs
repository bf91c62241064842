//! Approval patterns decide which document paths the form exposes.
//!
//! A pattern is either the wildcard `*` or a dot-joined path. It approves the
//! node it names, everything below that node, and every ancestor on the way to
//! it, so the form keeps descending into containers that hold approved fields.

use crate::core::value_path::ValuePath;

pub const WILDCARD: &str = "*";

/// Tests one pattern against a concrete path.
pub fn matches(pattern: &str, path: &ValuePath) -> bool {
    matches_joined(pattern, &path.joined())
}

pub fn matches_joined(pattern: &str, joined: &str) -> bool {
    if pattern == WILDCARD || pattern == joined {
        return true;
    }
    is_strict_prefix(pattern, joined) || is_strict_prefix(joined, pattern)
}

/// `prefix` names an ancestor of `path`: `path` starts with `prefix + "."`.
fn is_strict_prefix(prefix: &str, path: &str) -> bool {
    path.len() > prefix.len()
        && path.starts_with(prefix)
        && path.as_bytes()[prefix.len()] == b'.'
}

/// Ordered, duplicate-free, never-empty set of approval patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalSet {
    patterns: Vec<String>,
}

impl Default for ApprovalSet {
    fn default() -> Self {
        Self {
            patterns: vec![WILDCARD.to_string()],
        }
    }
}

impl ApprovalSet {
    /// Builds a set from a selection, verbatim. An empty selection falls back
    /// to the wildcard.
    pub fn from_selection<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut patterns: Vec<String> = Vec::new();
        for pattern in selection {
            let pattern = pattern.into();
            let pattern = pattern.trim().to_string();
            if pattern.is_empty() || patterns.contains(&pattern) {
                continue;
            }
            patterns.push(pattern);
        }
        if patterns.is_empty() {
            return Self::default();
        }
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        self.patterns.as_slice()
    }

    fn contains(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.contains(WILDCARD)
    }

    /// The only pattern when the set holds exactly one non-wildcard entry.
    pub fn sole_pattern(&self) -> Option<&str> {
        match self.patterns.as_slice() {
            [only] if only != WILDCARD => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn is_approved(&self, path: &ValuePath) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        let joined = path.joined();
        self.patterns
            .iter()
            .any(|pattern| matches_joined(pattern, &joined))
    }
}
