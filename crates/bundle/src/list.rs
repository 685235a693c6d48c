use serde::Serialize;

use bundlepick_catalog::{Product, Variant};
use bundlepick_core::{DomainError, DomainResult, Entity, ProductId, SlotId, VariantId, reposition};

use crate::discount::Discount;

/// Cap advertised by the editor heading ("Max. 4 Products").
pub const UI_MAX_PRODUCTS: usize = 4;

/// Bundle limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BundleConfig {
    /// Hard cap on the number of rows. `None` leaves the cap to the UI copy.
    pub max_entries: Option<usize>,
}

impl BundleConfig {
    pub fn capped(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
        }
    }
}

/// How the presentation layer addresses a bundle row.
///
/// Filled rows are addressed by their product, placeholders by their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntryKey {
    Product(ProductId),
    Slot(SlotId),
}

/// Source or target of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragNode {
    /// A top-level bundle row.
    Entry(EntryKey),
    /// A variant row nested under a filled bundle row.
    Variant {
        product_id: ProductId,
        variant_id: VariantId,
    },
}

/// One row of the bundle: a placeholder or a chosen product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleEntry {
    slot: SlotId,
    product: Option<Product>,
    expanded: bool,
    discount: Option<Discount>,
}

impl BundleEntry {
    fn placeholder() -> Self {
        Self {
            slot: SlotId::new(),
            product: None,
            expanded: false,
            discount: None,
        }
    }

    fn filled(product: Product) -> Self {
        Self {
            product: Some(product),
            ..Self::placeholder()
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn key(&self) -> EntryKey {
        match &self.product {
            Some(p) => EntryKey::Product(p.id_typed()),
            None => EntryKey::Slot(self.slot),
        }
    }

    pub fn matches(&self, key: &EntryKey) -> bool {
        match key {
            EntryKey::Product(id) => self.product_id() == Some(*id),
            EntryKey::Slot(slot) => self.slot == *slot,
        }
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product.as_ref().map(Product::id_typed)
    }

    pub fn is_placeholder(&self) -> bool {
        self.product.is_none()
    }

    /// Title shown in the row; placeholders show the input's placeholder text.
    pub fn title(&self) -> &str {
        self.product.as_ref().map_or("Select Product", |p| p.title())
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// Whether the row offers a "Show Variants" toggle at all.
    pub fn has_variants(&self) -> bool {
        self.product.as_ref().is_some_and(|p| !p.variants().is_empty())
    }

    /// Variants rendered under the row: only those still checked.
    pub fn visible_variants(&self) -> impl Iterator<Item = &Variant> {
        self.product.iter().flat_map(|p| p.checked_variants())
    }
}

impl Entity for BundleEntry {
    type Id = SlotId;

    fn id(&self) -> &Self::Id {
        &self.slot
    }
}

/// Ordered bundle of chosen products.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleList {
    entries: Vec<BundleEntry>,
    config: BundleConfig,
}

impl Default for BundleList {
    fn default() -> Self {
        Self::new(BundleConfig::default())
    }
}

impl BundleList {
    /// A bundle starts with one empty row waiting to be filled.
    pub fn new(config: BundleConfig) -> Self {
        Self {
            entries: vec![BundleEntry::placeholder()],
            config,
        }
    }

    pub fn empty(config: BundleConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> BundleConfig {
        self.config
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &EntryKey) -> Option<&BundleEntry> {
        self.entries.iter().find(|e| e.matches(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Products of the filled rows, in display order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.entries.iter().filter_map(BundleEntry::product)
    }

    /// Append an empty row.
    pub fn add_placeholder(&mut self) -> DomainResult<SlotId> {
        if let Some(max) = self.config.max_entries {
            if self.entries.len() >= max {
                return Err(DomainError::capacity(max));
            }
        }
        let entry = BundleEntry::placeholder();
        let slot = entry.slot;
        self.entries.push(entry);
        tracing::debug!(%slot, len = self.entries.len(), "placeholder added");
        Ok(slot)
    }

    /// Replace the whole bundle with the committed catalog selection.
    pub fn commit(&mut self, products: Vec<Product>) -> DomainResult<()> {
        if let Some(max) = self.config.max_entries {
            if products.len() > max {
                return Err(DomainError::capacity(max));
            }
        }
        self.entries = products.into_iter().map(BundleEntry::filled).collect();
        tracing::debug!(len = self.entries.len(), "bundle committed");
        Ok(())
    }

    /// Remove every row holding `product_id`. Remaining rows keep their order.
    ///
    /// A catalog page may list a product twice, so one commit can leave
    /// duplicate rows; all of them go.
    pub fn remove_product(&mut self, product_id: ProductId) -> bool {
        self.remove_where(&EntryKey::Product(product_id))
    }

    /// Remove a row by slot, placeholder or not.
    pub fn remove_entry(&mut self, slot: SlotId) -> bool {
        self.remove_where(&EntryKey::Slot(slot))
    }

    /// Hide a variant from its row by unchecking it in the bundle copy.
    pub fn remove_variant(&mut self, product_id: ProductId, variant_id: VariantId) -> bool {
        self.product_mut(product_id)
            .is_some_and(|p| p.uncheck_variant(variant_id))
    }

    /// Apply a drag gesture.
    ///
    /// Rows move among rows; variants move among the variants of the same
    /// product. `Ok(false)` means nothing moved (same node, or an id that is
    /// not in the bundle). Variant drags across products, and drags mixing a
    /// row with a variant, are rejected.
    pub fn reorder(&mut self, dragged: DragNode, target: DragNode) -> DomainResult<bool> {
        match (dragged, target) {
            (DragNode::Entry(from), DragNode::Entry(to)) => Ok(self.reorder_entries(&from, &to)),
            (
                DragNode::Variant {
                    product_id: from_product,
                    variant_id: from_variant,
                },
                DragNode::Variant {
                    product_id: to_product,
                    variant_id: to_variant,
                },
            ) => {
                if from_product != to_product {
                    tracing::warn!(
                        %from_product,
                        %to_product,
                        "rejected variant drag across products"
                    );
                    return Err(DomainError::conflict(
                        "variants can only be reordered within their own product",
                    ));
                }
                Ok(self
                    .product_mut(from_product)
                    .is_some_and(|p| p.reorder_variant(from_variant, to_variant)))
            }
            _ => {
                tracing::warn!(?dragged, ?target, "rejected drag between a row and a variant");
                Err(DomainError::conflict(
                    "rows and variants cannot be dropped onto each other",
                ))
            }
        }
    }

    /// Flip the collapsed/expanded state of a row. Returns the new state.
    pub fn toggle_expanded(&mut self, key: &EntryKey) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.matches(key))?;
        entry.expanded = !entry.expanded;
        Some(entry.expanded)
    }

    pub fn set_discount(&mut self, key: &EntryKey, discount: Discount) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.matches(key)) else {
            return false;
        };
        entry.discount = Some(discount);
        true
    }

    pub fn clear_discount(&mut self, key: &EntryKey) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.matches(key)) else {
            return false;
        };
        entry.discount.take().is_some()
    }

    fn reorder_entries(&mut self, from: &EntryKey, to: &EntryKey) -> bool {
        let (Some(from_slot), Some(to_slot)) = (
            self.entry(from).map(BundleEntry::slot),
            self.entry(to).map(BundleEntry::slot),
        ) else {
            return false;
        };
        let moved = reposition(&mut self.entries, &from_slot, &to_slot);
        if moved {
            tracing::debug!(?from, ?to, "bundle row moved");
        }
        moved
    }

    fn remove_where(&mut self, key: &EntryKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.matches(key));
        self.entries.len() != before
    }

    fn product_mut(&mut self, product_id: ProductId) -> Option<&mut Product> {
        self.entries
            .iter_mut()
            .filter_map(|e| e.product.as_mut())
            .find(|p| p.id_typed() == product_id)
    }
}
