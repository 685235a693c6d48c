//! Tracing/logging setup shared by whatever embeds the picker.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{init, init_for_tests};
