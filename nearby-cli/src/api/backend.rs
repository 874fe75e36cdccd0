//! Live search seam

use async_trait::async_trait;
use std::future::Future;

use super::models::ProviderRecord;
use crate::geo::{Coordinate, RadiusPreset};
use crate::taxonomy::{Domain, Slug};

/// Parameters of one live search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin: Coordinate,
    pub radius: RadiusPreset,
    pub domain: Domain,
    pub route_slug: Slug,
}

/// Error from a live search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Request never produced a response (connect, timeout, ...)
    Transport(String),
    /// Backend answered with a non-success status
    Status(u16),
    /// Response body could not be decoded
    Decode(String),
    /// The backend panicked while searching
    Panicked(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Transport(msg) => write!(f, "Search request failed: {}", msg),
            SearchError::Status(code) => write!(f, "Search backend returned HTTP {}", code),
            SearchError::Decode(msg) => write!(f, "Could not read search results: {}", msg),
            SearchError::Panicked(msg) => write!(f, "Search backend crashed: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}

/// Where live listings come from
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Listings for the query, in the backend's own order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>, SearchError>;
}

/// Adapter turning a caller-supplied async closure into a backend
pub struct FnBackend<F> {
    fetch: F,
}

/// Wrap a fetch function as a `SearchBackend`
pub fn backend_fn<F, Fut>(fetch: F) -> FnBackend<F>
where
    F: Fn(SearchQuery) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<ProviderRecord>, SearchError>> + Send + 'static,
{
    FnBackend { fetch }
}

#[async_trait]
impl<F, Fut> SearchBackend for FnBackend<F>
where
    F: Fn(SearchQuery) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<ProviderRecord>, SearchError>> + Send + 'static,
{
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>, SearchError> {
        (self.fetch)(query.clone()).await
    }
}
