//! Catalog domain module.
//!
//! Products and variants fetched from the remote search endpoint, the
//! tri-state checkbox projection, and the [`SelectionStore`] that tracks what
//! the user checked in the picker modal. Pure domain logic (no IO, no HTTP).

pub mod product;
pub mod store;
pub mod tri_state;

pub use product::{Price, Product, Variant};
pub use store::SelectionStore;
pub use tri_state::TriState;
