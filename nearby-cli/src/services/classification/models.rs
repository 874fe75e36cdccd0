use serde::Serialize;

use crate::taxonomy::{Domain, IndustrialGroup, Slug};

/// How a slug was matched against a taxonomy variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Exact,       // Slug equals the normalized variant
    Contains,    // Slug contains the variant
    ContainedBy, // Variant contains the slug
    Fallback,    // Nothing matched, default domain used
}

impl MatchKind {
    /// Get display label for match kind
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Exact => "[Exact]",
            MatchKind::Contains => "[Contains]",
            MatchKind::ContainedBy => "[Partial]",
            MatchKind::Fallback => "[Fallback]",
        }
    }
}

/// A single variant hit inside one table or group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMatch {
    pub variant: &'static str,
    pub kind: MatchKind,
}

/// Result of resolving a slug to its owning domain
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub domain: Domain,
    /// Slug used to build the navigable path
    pub route_slug: Slug,
    pub match_kind: MatchKind,
    /// Table variant that decided the domain (None on fallback)
    pub matched_variant: Option<&'static str>,
    /// Only set for the industrial domain
    pub industrial_group: Option<&'static str>,
}

impl Classification {
    pub(crate) fn fallback(route_slug: Slug) -> Self {
        Self {
            domain: Domain::WorkerGeneric,
            route_slug,
            match_kind: MatchKind::Fallback,
            matched_variant: None,
            industrial_group: None,
        }
    }

    /// Full path, e.g. `/food/biryani`
    pub fn route_path(&self) -> String {
        if self.route_slug.is_empty() {
            format!("/{}", self.domain.route_base())
        } else {
            format!("/{}/{}", self.domain.route_base(), self.route_slug)
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.match_kind == MatchKind::Fallback
    }

    /// Resolved industrial group, if any
    pub fn group(&self) -> Option<&'static IndustrialGroup> {
        self.industrial_group
            .and_then(crate::taxonomy::group_by_key)
    }
}

/// A ranked taxonomy variant for search-as-you-type pickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSuggestion {
    pub domain: Domain,
    pub variant: &'static str,
    pub score: i64,
}
