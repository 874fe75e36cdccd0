//! Label to slug canonicalization

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Runs of whitespace, slashes and dashes collapse to one dash
static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s/-]+").expect("separator pattern is valid"));

/// Normalized, URL-safe token derived from a display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty slugs are unclassifiable
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bidirectional substring containment used by every taxonomy lookup
    ///
    /// Two empty sides never match, and an empty side never matches anything.
    pub fn overlaps(&self, other: &Slug) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.0.contains(other.as_str()) || other.0.contains(self.as_str())
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a free-text category label
///
/// Trims, lower-cases and collapses every separator run to a single `-`.
/// Never fails; an empty or all-separator label yields an empty slug.
pub fn normalize(label: &str) -> Slug {
    let lowered = label.trim().to_lowercase();
    let dashed = SEPARATOR_RUN.replace_all(&lowered, "-");
    Slug(dashed.trim_matches('-').to_string())
}
