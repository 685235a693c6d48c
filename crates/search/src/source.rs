//! The remote catalog seam.

use bundlepick_catalog::Product;
use serde::Serialize;

use crate::error::SearchError;

/// Parameters of one catalog page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    /// Free-text search; empty lists everything.
    pub search: String,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

/// Where catalog pages come from.
///
/// Implementations return products with every checkbox cleared; the caller
/// decides whether the page replaces or extends the catalog.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, query: &PageQuery) -> Result<Vec<Product>, SearchError>;
}
