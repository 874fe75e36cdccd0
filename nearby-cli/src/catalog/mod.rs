//! Compiled-in sample listings shown before live data arrives
//!
//! One JSON file per domain under `catalog/`, named by domain key.

use include_dir::{Dir, include_dir};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::ProviderRecord;
use crate::services::classification::Classification;
use crate::taxonomy::Domain;

static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/catalog");

static CATALOG: Lazy<HashMap<Domain, Arc<[ProviderRecord]>>> = Lazy::new(|| {
    let mut catalog = HashMap::new();

    for domain in Domain::all_variants() {
        let file_name = format!("{}.json", domain.key());
        let Some(file) = CATALOG_DIR.get_file(&file_name) else {
            log::debug!("No static catalog for {}", domain);
            continue;
        };

        match serde_json::from_slice::<Vec<ProviderRecord>>(file.contents()) {
            Ok(records) => {
                catalog.insert(*domain, Arc::from(records));
            }
            Err(e) => log::error!("Static catalog {} is invalid: {}", file_name, e),
        }
    }

    catalog
});

/// Every static listing of a domain, in file order
pub fn static_catalog(domain: Domain) -> Arc<[ProviderRecord]> {
    CATALOG
        .get(&domain)
        .cloned()
        .unwrap_or_else(|| Arc::from(Vec::new()))
}

/// Static listings for a classified label
///
/// Industrial groups narrow the list to listings tagged with the group key,
/// keeping the whole domain list when none are tagged.
pub fn static_for(classification: &Classification) -> Arc<[ProviderRecord]> {
    let all = static_catalog(classification.domain);

    let Some(group) = classification.industrial_group else {
        return all;
    };

    let tagged: Vec<ProviderRecord> = all
        .iter()
        .filter(|record| record.tags.iter().any(|t| t == group))
        .cloned()
        .collect();

    if tagged.is_empty() { all } else { Arc::from(tagged) }
}
