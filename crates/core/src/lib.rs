//! `bundlepick-core` — shared building blocks for the bundle picker.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP, no UI).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, position_of, reposition};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SlotId, VariantId};
pub use value_object::ValueObject;
