//! Core classification functions
//! All matching is bidirectional substring containment on normalized slugs

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::models::{Classification, MatchKind, VariantMatch, VariantSuggestion};
use crate::taxonomy::{
    DOMAIN_PRECEDENCE, Domain, INDUSTRIAL_GROUPS, IndustrialGroup, Slug, TaxonomyTable, table_for,
    tables,
};

/// Compare a slug with one normalized variant
fn match_variant(slug: &Slug, variant: &Slug) -> Option<MatchKind> {
    if !slug.overlaps(variant) {
        return None;
    }
    if slug == variant {
        Some(MatchKind::Exact)
    } else if slug.as_str().contains(variant.as_str()) {
        Some(MatchKind::Contains)
    } else {
        Some(MatchKind::ContainedBy)
    }
}

/// Find the first variant of a table that matches the slug
/// An exact hit anywhere in the table wins over an earlier partial hit
pub fn match_table(table: &TaxonomyTable, slug: &Slug) -> Option<VariantMatch> {
    let mut first_partial = None;

    for (raw, variant) in table.entries() {
        match match_variant(slug, variant) {
            Some(MatchKind::Exact) => {
                return Some(VariantMatch {
                    variant: raw,
                    kind: MatchKind::Exact,
                });
            }
            Some(kind) if first_partial.is_none() => {
                first_partial = Some(VariantMatch { variant: raw, kind });
            }
            _ => {}
        }
    }

    first_partial
}

/// Find the first variant of an industrial group that matches the slug
fn match_group(group: &IndustrialGroup, slug: &Slug) -> Option<VariantMatch> {
    group
        .variants
        .iter()
        .zip(group.normalized_variants())
        .find_map(|(raw, variant)| {
            match_variant(slug, variant).map(|kind| VariantMatch { variant: raw, kind })
        })
}

/// Resolve the owning industrial group of a slug
/// Groups are tried in declared order, first match wins
pub fn classify_industrial_group(slug: &Slug) -> Option<&'static IndustrialGroup> {
    if slug.is_empty() {
        return None;
    }

    INDUSTRIAL_GROUPS
        .iter()
        .find(|group| match_group(group, slug).is_some())
}

/// Resolve a slug to exactly one domain
///
/// Walks `DOMAIN_PRECEDENCE` and stops at the first table that matches.
/// Industrial is consulted after the walk, and anything still unmatched
/// (including an empty slug) falls back to the worker-generic domain.
pub fn classify_domain(slug: &Slug) -> Classification {
    if slug.is_empty() {
        log::debug!("Empty slug, falling back to {}", Domain::WorkerGeneric);
        return Classification::fallback(slug.clone());
    }

    for domain in DOMAIN_PRECEDENCE {
        if let Some(hit) = match_table(table_for(*domain), slug) {
            log::debug!(
                "Classified '{}' as {} via '{}' {}",
                slug,
                domain,
                hit.variant,
                hit.kind.label()
            );
            return Classification {
                domain: *domain,
                route_slug: slug.clone(),
                match_kind: hit.kind,
                matched_variant: Some(hit.variant),
                industrial_group: None,
            };
        }
    }

    if let Some(hit) = match_table(table_for(Domain::Industrial), slug) {
        let group = classify_industrial_group(slug);
        log::debug!(
            "Classified '{}' as {} (group: {})",
            slug,
            Domain::Industrial,
            group.map(|g| g.key).unwrap_or("none")
        );
        return Classification {
            domain: Domain::Industrial,
            route_slug: slug.clone(),
            match_kind: hit.kind,
            matched_variant: Some(hit.variant),
            industrial_group: group.map(|g| g.key),
        };
    }

    log::debug!("No table matched '{}', falling back to {}", slug, Domain::WorkerGeneric);
    Classification::fallback(slug.clone())
}

/// Every domain whose table matches the slug, in precedence order
/// Used to inspect ambiguous labels; classification itself only takes the first
pub fn matching_domains(slug: &Slug) -> Vec<(Domain, VariantMatch)> {
    DOMAIN_PRECEDENCE
        .iter()
        .chain(std::iter::once(&Domain::Industrial))
        .filter_map(|domain| match_table(table_for(*domain), slug).map(|hit| (*domain, hit)))
        .collect()
}

/// Rank taxonomy variants against a partially typed query
/// Returns at most `limit` suggestions, best first
pub fn suggest_variants(
    query: &str,
    domain: Option<Domain>,
    limit: usize,
) -> Vec<VariantSuggestion> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut suggestions: Vec<VariantSuggestion> = tables()
        .iter()
        .filter(|table| domain.is_none_or(|d| d == table.domain()))
        .flat_map(|table| {
            table.variants().iter().filter_map(|variant| {
                matcher
                    .fuzzy_match(variant, query)
                    .map(|score| VariantSuggestion {
                        domain: table.domain(),
                        variant,
                        score,
                    })
            })
        })
        .collect();

    // Highest score first, ties broken alphabetically for stable output
    suggestions.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.variant.cmp(b.variant)));
    suggestions.truncate(limit);
    suggestions
}
