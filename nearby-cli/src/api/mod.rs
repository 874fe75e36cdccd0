//! Provider listings and the live search backends that return them

pub mod backend;
pub mod http;
pub mod models;

pub use backend::{FnBackend, SearchBackend, SearchError, SearchQuery, backend_fn};
pub use http::{HttpSearchBackend, parse_search_response};
pub use models::ProviderRecord;
