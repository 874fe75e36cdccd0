//! Category classification and nearby-results composition for a local
//! services directory
//!
//! Free-text category labels are normalized into slugs, classified into a
//! fixed set of business domains and turned into navigable routes. A screen
//! for a route shows compiled-in listings immediately and live listings
//! within a chosen radius once the user's location is known.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod compose;
pub mod config;
pub mod geo;
pub mod location;
pub mod services;
pub mod taxonomy;

pub use api::{
    HttpSearchBackend, ProviderRecord, SearchBackend, SearchError, SearchQuery, backend_fn,
};
pub use compose::{ComposerState, LiveSection, ResultsComposer, ResultsView, compose_results};
pub use config::{Config, SearchConfig};
pub use geo::{Coordinate, RadiusPreset, UnlocatedPolicy, distance_km, format_distance};
pub use location::{LocationError, LocationProvider};
pub use services::classification::{
    Classification, MatchKind, classify, classify_domain, classify_industrial_group,
};
pub use taxonomy::{Domain, IndustrialGroup, Slug, normalize};
