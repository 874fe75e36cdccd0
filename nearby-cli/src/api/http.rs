//! HTTP search backend

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

use super::backend::{SearchBackend, SearchError, SearchQuery};
use super::models::ProviderRecord;
use crate::config::BackendConfig;

/// Accepted response shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    List(Vec<Value>),
    Results { results: Vec<Value> },
    Data { data: Vec<Value> },
}

impl SearchResponse {
    fn into_items(self) -> Vec<Value> {
        match self {
            SearchResponse::List(items)
            | SearchResponse::Results { results: items }
            | SearchResponse::Data { data: items } => items,
        }
    }
}

/// Decode a search response body
///
/// Records are decoded one by one; a record that cannot be decoded is
/// skipped with a warning instead of failing the whole response.
pub fn parse_search_response(body: &str) -> Result<Vec<ProviderRecord>, SearchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    let items = SearchResponse::deserialize(value)
        .map(SearchResponse::into_items)
        .map_err(|_| {
            SearchError::Decode(
                "expected a JSON array or an object with a `results` or `data` array".to_string(),
            )
        })?;

    let total = items.len();
    let records: Vec<ProviderRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match ProviderRecord::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping search result {}: {}", index, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        log::warn!("Decoded {} of {} search results", records.len(), total);
    }

    Ok(records)
}

/// Live search over `GET {base_url}/{search_path}`
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    search_url: String,
}

impl HttpSearchBackend {
    /// Create a backend for a base URL with a per-request timeout
    pub fn new(base_url: &str, search_path: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let search_url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            search_path.trim_start_matches('/')
        );

        Ok(Self { client, search_url })
    }

    /// Create a backend from configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .context("No search backend configured (set backend.base_url or NEARBY_BACKEND_URL)")?;

        Self::new(base_url, &config.search_path, config.timeout())
            .with_context(|| format!("Failed to create search client for {}", base_url))
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>, SearchError> {
        let start = Instant::now();
        let params = [
            ("lat", query.origin.latitude.to_string()),
            ("lng", query.origin.longitude.to_string()),
            ("radius", query.radius.whole_km().to_string()),
            ("category", query.route_slug.to_string()),
            ("domain", query.domain.key().to_string()),
        ];

        log::debug!("GET {} {:?}", self.search_url, params);

        let response = self
            .client
            .get(&self.search_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Search backend returned {} for {}", status, query.route_slug);
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let records = parse_search_response(&body)?;

        log::info!(
            "Search '{}' within {} returned {} records in {:?}",
            query.route_slug,
            query.radius,
            records.len(),
            start.elapsed()
        );

        Ok(records)
    }
}
