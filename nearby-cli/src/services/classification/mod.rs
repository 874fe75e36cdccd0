// Classification service for resolving category labels to routes
//
// Pure, stateless lookups against the process-wide taxonomy tables.

pub mod core;
pub mod models;

// Re-export commonly used types
pub use self::core::{
    classify_domain, classify_industrial_group, match_table, matching_domains, suggest_variants,
};
pub use models::{Classification, MatchKind, VariantMatch, VariantSuggestion};

use crate::taxonomy::normalize;

/// Normalize a raw label and classify it
/// Main entry point for presentation code picking a category
pub fn classify(label: &str) -> Classification {
    let slug = normalize(label);
    self::core::classify_domain(&slug)
}
