//! Wire shape of the product search endpoint.
//!
//! ```text
//! [ { "id": 77, "title": "...", "variants": [ { "id": 1, "product_id": 77, "title": "...", "price": "20.00" } ] } ]
//! ```
//!
//! The endpoint answers `null` for an empty page and sometimes omits
//! `variants`; both normalize to empty sequences.

use serde::Deserialize;

use bundlepick_catalog::{Price, Product, Variant};
use bundlepick_core::{ProductId, VariantId};

use crate::error::SearchError;

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteVariant {
    pub id: u64,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Price,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProduct {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<RemoteVariant>>,
}

impl RemoteProduct {
    pub fn into_product(self) -> Product {
        let product_id = ProductId::new(self.id);
        let variants = self
            .variants
            .unwrap_or_default()
            .into_iter()
            .map(|v| {
                if v.product_id.is_some_and(|owner| owner != self.id) {
                    tracing::debug!(
                        variant_id = v.id,
                        %product_id,
                        "variant reports a different owner; re-parenting"
                    );
                }
                Variant::new(
                    VariantId::new(v.id),
                    product_id,
                    v.title.unwrap_or_default(),
                    v.price,
                )
            })
            .collect();

        Product::new(product_id, self.title.unwrap_or_default(), variants)
    }
}

/// Decode a response body into catalog products.
pub fn parse_products(body: &str) -> Result<Vec<Product>, SearchError> {
    let page: Option<Vec<RemoteProduct>> =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;
    Ok(page
        .unwrap_or_default()
        .into_iter()
        .map(RemoteProduct::into_product)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typical_page() {
        let body = r#"[
            {"id": 77, "title": "Fog Linen Chambray Towel", "image": {"src": "x"},
             "variants": [
                {"id": 1, "product_id": 77, "title": "XS / Silver", "price": "49"},
                {"id": 2, "product_id": 77, "title": "S / Silver", "price": 49.5}
             ]},
            {"id": 80, "title": "Orbit Terrarium"}
        ]"#;

        let products = parse_products(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].variants().len(), 2);
        assert_eq!(products[0].variants()[1].price().amount(), "49.5");
        assert!(products[1].variants().is_empty());
        assert!(products.iter().all(|p| !p.has_selection()));
    }

    #[test]
    fn null_and_empty_pages_are_empty() {
        assert!(parse_products("null").unwrap().is_empty());
        assert!(parse_products("[]").unwrap().is_empty());
    }

    #[test]
    fn null_variants_normalize_to_empty() {
        let products = parse_products(r#"[{"id": 1, "title": "Mug", "variants": null}]"#).unwrap();
        assert!(products[0].variants().is_empty());
    }

    #[test]
    fn variants_are_parented_on_their_product() {
        let products =
            parse_products(r#"[{"id": 5, "title": "Cap", "variants": [{"id": 9, "product_id": 6, "title": "Red", "price": "3"}]}]"#)
                .unwrap();
        assert_eq!(products[0].variants()[0].product_id(), ProductId::new(5));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        assert!(matches!(parse_products("{\"oops\": true}"), Err(SearchError::Parse(_))));
        assert!(matches!(parse_products("<html>"), Err(SearchError::Parse(_))));
    }
}
