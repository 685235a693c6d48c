//! `bundlepick-search`
//!
//! **Responsibility:** everything between the picker's search box and the
//! remote product catalog.
//!
//! This crate provides:
//! - the [`CatalogSource`] seam and its `reqwest` implementation
//! - search configuration (endpoint, API key, page size, debounce window)
//! - request sequencing so stale responses never overwrite fresher results
//! - a debouncer for typed search text

pub mod config;
pub mod debounce;
pub mod error;
pub mod http;
pub mod remote;
pub mod source;
pub mod state;

pub use config::SearchConfig;
pub use debounce::spawn_debouncer;
pub use error::SearchError;
pub use http::HttpCatalogSource;
pub use source::{CatalogSource, PageQuery};
pub use state::{PageOutcome, PageRequest, PageResponse, SearchState};
