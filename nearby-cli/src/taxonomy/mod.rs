//! Business taxonomy: domains, label normalization and variant tables
//!
//! Everything in here is read-only configuration data. The tables are
//! built once on first access and shared process-wide.

pub mod industrial;
pub mod normalize;
pub mod tables;

pub use industrial::{INDUSTRIAL_GROUPS, IndustrialGroup, group_by_key};
pub use normalize::{Slug, normalize};
pub use tables::{DOMAIN_PRECEDENCE, TaxonomyTable, table_for, tables};

use serde::{Deserialize, Serialize};

/// Top-level business category a listing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Food,
    Hospital,
    Hotel,
    Beauty,
    RealEstate,
    Shopping,
    Education,
    Industrial,
    Automotive,
    PlaceGeneric,
    WorkerGeneric,
}

impl Domain {
    /// Stable key used in routes, config files and backend queries
    pub fn key(&self) -> &'static str {
        match self {
            Domain::Food => "food",
            Domain::Hospital => "hospital",
            Domain::Hotel => "hotel",
            Domain::Beauty => "beauty",
            Domain::RealEstate => "real-estate",
            Domain::Shopping => "shopping",
            Domain::Education => "education",
            Domain::Industrial => "industrial",
            Domain::Automotive => "automotive",
            Domain::PlaceGeneric => "place-generic",
            Domain::WorkerGeneric => "worker-generic",
        }
    }

    /// Get display label for domain
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Food => "Food",
            Domain::Hospital => "Hospitals",
            Domain::Hotel => "Hotels",
            Domain::Beauty => "Beauty & Wellness",
            Domain::RealEstate => "Real Estate",
            Domain::Shopping => "Shopping",
            Domain::Education => "Education",
            Domain::Industrial => "Industrial Services",
            Domain::Automotive => "Automotive",
            Domain::PlaceGeneric => "Places",
            Domain::WorkerGeneric => "Workers",
        }
    }

    /// Base segment of the navigable path for this domain
    pub fn route_base(&self) -> &'static str {
        match self {
            Domain::WorkerGeneric => "workers",
            Domain::PlaceGeneric => "places",
            other => other.key(),
        }
    }

    /// Get all variants in declaration order
    pub fn all_variants() -> &'static [Domain] {
        &[
            Domain::Food,
            Domain::Hospital,
            Domain::Hotel,
            Domain::Beauty,
            Domain::RealEstate,
            Domain::Shopping,
            Domain::Education,
            Domain::Industrial,
            Domain::Automotive,
            Domain::PlaceGeneric,
            Domain::WorkerGeneric,
        ]
    }

    /// Parse a domain key (accepts the same forms `normalize` produces)
    pub fn from_key(key: &str) -> Option<Self> {
        let slug = normalize(key);
        Domain::all_variants()
            .iter()
            .copied()
            .find(|d| d.key() == slug.as_str())
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
