use serde::{Deserialize, Deserializer, Serialize, Serializer};

use bundlepick_core::{Entity, ProductId, ValueObject, VariantId, reposition};

use crate::tri_state::TriState;

/// Currency glyph used when rendering prices; the endpoint sends no currency code.
pub const CURRENCY_GLYPH: char = '₹';

/// Price as sent by the catalog endpoint, kept as decimal text.
///
/// The endpoint is inconsistent: most payloads carry `"20.00"`, some a bare
/// JSON number. Both are accepted and stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(String);

impl ValueObject for Price {}

impl Price {
    pub fn new(amount: impl Into<String>) -> Self {
        Self(amount.into())
    }

    pub fn amount(&self) -> &str {
        &self.0
    }

    /// Price with the fixed currency glyph, e.g. `₹20.00`.
    pub fn display(&self) -> String {
        format!("{CURRENCY_GLYPH}{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Price(s),
            Raw::Number(n) => Price(n.to_string()),
        })
    }
}

/// One purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    id: VariantId,
    #[serde(rename = "parentId")]
    product_id: ProductId,
    title: String,
    price: Price,
    is_checked: bool,
}

impl Variant {
    /// Create an unchecked variant.
    pub fn new(id: VariantId, product_id: ProductId, title: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            product_id,
            title: title.into(),
            price,
            is_checked: false,
        }
    }

    pub fn id_typed(&self) -> VariantId {
        self.id
    }

    /// Owning product.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn is_checked(&self) -> bool {
        self.is_checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.is_checked = checked;
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A catalog product with its ordered variants.
///
/// `is_checked` and `indeterminate` are not stored: they are projected from
/// the variants through [`TriState::project`]. The only stored flag is the
/// explicit check of a product that has no variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    title: String,
    variants: Vec<Variant>,
    explicit_checked: bool,
}

impl Product {
    /// Create an unchecked product. Variants are re-parented onto `id`.
    pub fn new(id: ProductId, title: impl Into<String>, variants: Vec<Variant>) -> Self {
        let variants = variants
            .into_iter()
            .map(|mut v| {
                v.product_id = id;
                v
            })
            .collect();

        Self {
            id,
            title: title.into(),
            variants,
            explicit_checked: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, variant_id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Variants the user kept checked; what the bundle row shows when expanded.
    pub fn checked_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| v.is_checked)
    }

    pub fn tri_state(&self) -> TriState {
        TriState::project(self.variants.iter().map(|v| v.is_checked), self.explicit_checked)
    }

    pub fn is_checked(&self) -> bool {
        self.tri_state().is_checked()
    }

    pub fn indeterminate(&self) -> bool {
        self.tri_state().is_indeterminate()
    }

    pub fn has_selection(&self) -> bool {
        self.tri_state().has_selection()
    }

    /// Check or uncheck the product and every one of its variants.
    pub fn set_checked(&mut self, checked: bool) {
        self.explicit_checked = checked;
        for variant in &mut self.variants {
            variant.is_checked = checked;
        }
    }

    /// Back to the state a freshly fetched product starts in.
    pub fn reset_selection(&mut self) {
        self.set_checked(false);
    }

    /// Flip a single variant. Returns `false` if the variant is unknown.
    pub fn toggle_variant(&mut self, variant_id: VariantId) -> bool {
        let Some(variant) = self.variants.iter_mut().find(|v| v.id == variant_id) else {
            return false;
        };
        variant.is_checked = !variant.is_checked;
        self.sync_explicit_flag();
        true
    }

    /// Uncheck a single variant. Returns `false` if the variant is unknown.
    pub fn uncheck_variant(&mut self, variant_id: VariantId) -> bool {
        let Some(variant) = self.variants.iter_mut().find(|v| v.id == variant_id) else {
            return false;
        };
        variant.is_checked = false;
        self.sync_explicit_flag();
        true
    }

    /// Move variant `dragged` to the position of `target` within this product.
    pub fn reorder_variant(&mut self, dragged: VariantId, target: VariantId) -> bool {
        reposition(&mut self.variants, &dragged, &target)
    }

    // Keeps the leaf flag meaningful if every variant later disappears.
    fn sync_explicit_flag(&mut self) {
        self.explicit_checked = self.is_checked();
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Serialize for Product {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct ProductView<'a> {
            id: ProductId,
            title: &'a str,
            is_checked: bool,
            indeterminate: bool,
            variants: &'a [Variant],
        }

        let state = self.tri_state();
        ProductView {
            id: self.id,
            title: &self.title,
            is_checked: state.is_checked(),
            indeterminate: state.is_indeterminate(),
            variants: &self.variants,
        }
        .serialize(serializer)
    }
}
