//! `reqwest`-backed catalog source.

use bundlepick_catalog::Product;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::remote::parse_products;
use crate::source::{CatalogSource, PageQuery};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for `GET {base_url}/products/search`.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCatalogSource {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/products/search", self.base_url)
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn search(&self, query: &PageQuery) -> Result<Vec<Product>, SearchError> {
        let url = self.endpoint();
        tracing::debug!(%url, search = %query.search, page = query.page, "fetching catalog page");

        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        parse_products(&body)
    }
}
