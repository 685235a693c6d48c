//! Bundle domain module.
//!
//! The curated, ordered list of products shown on the main page of the
//! bundle editor: drag reordering at product and variant granularity,
//! removal, placeholders and per-row discounts. Pure domain logic.

pub mod discount;
pub mod list;

pub use discount::{Discount, DiscountKind};
pub use list::{BundleConfig, BundleEntry, BundleList, DragNode, EntryKey, UI_MAX_PRODUCTS};
