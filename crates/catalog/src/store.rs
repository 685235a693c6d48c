//! Selection state of the picker modal.

use bundlepick_core::{ProductId, VariantId};

use crate::product::Product;

/// Catalog products currently shown in the picker, plus what the user checked.
///
/// The store owns its products; [`SelectionStore::commit_selection`] hands out
/// clones so the bundle never shares structure with the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    products: Vec<Product>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replace the catalog with a fresh first page. Everything starts unchecked.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = fresh(products);
        tracing::debug!(count = self.products.len(), "catalog replaced");
    }

    /// Append a further page after the existing entries.
    ///
    /// Products already present are not deduplicated; the endpoint decides
    /// what a page contains.
    pub fn append(&mut self, products: Vec<Product>) {
        let incoming = fresh(products);
        tracing::debug!(
            existing = self.products.len(),
            appended = incoming.len(),
            "catalog page appended"
        );
        self.products.extend(incoming);
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    /// Flip a product and cascade the new value to all of its variants.
    ///
    /// An indeterminate product becomes fully checked. Returns `false` when the
    /// product is not in the catalog.
    pub fn toggle_product(&mut self, product_id: ProductId) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id_typed() == product_id) else {
            return false;
        };
        let checked = !product.is_checked();
        product.set_checked(checked);
        tracing::debug!(%product_id, checked, "product toggled");
        true
    }

    /// Flip one variant; the parent's state follows from the projection.
    ///
    /// Returns `false` when either the product or the variant is unknown.
    pub fn toggle_variant(&mut self, product_id: ProductId, variant_id: VariantId) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id_typed() == product_id) else {
            return false;
        };
        let toggled = product.toggle_variant(variant_id);
        if toggled {
            tracing::debug!(
                %product_id,
                %variant_id,
                state = ?product.tri_state(),
                "variant toggled"
            );
        }
        toggled
    }

    /// Products that are fully or partially checked, in catalog order.
    ///
    /// Variants are carried over untrimmed: unchecked variants of a partial
    /// product travel along and are filtered out by whoever renders the bundle.
    pub fn commit_selection(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.has_selection())
            .cloned()
            .collect()
    }

    /// Number of products `commit_selection` would return.
    pub fn product_count(&self) -> usize {
        self.products.iter().filter(|p| p.has_selection()).count()
    }

    /// Footer label of the picker modal, e.g. `2 products selected`.
    pub fn selection_summary(&self) -> String {
        match self.product_count() {
            1 => "1 product selected".to_string(),
            n => format!("{n} products selected"),
        }
    }
}

fn fresh(products: Vec<Product>) -> Vec<Product> {
    products
        .into_iter()
        .map(|mut p| {
            p.reset_selection();
            p
        })
        .collect()
}
