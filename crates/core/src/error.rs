//! Domain error model.

use thiserror::Error;

/// Result type used across the picker's domain crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic failures live here (bad input, rejected moves, a full
/// bundle). Lookup misses on toggle/remove/reorder are not errors: those
/// operations report `false` and leave state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a negative discount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested entry was not found.
    #[error("not found")]
    NotFound,

    /// The requested operation conflicts with the current structure
    /// (e.g. dragging a variant onto another product's variant).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The bundle already holds the configured maximum number of entries.
    #[error("bundle is full (max {max} entries)")]
    Capacity { max: usize },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn capacity(max: usize) -> Self {
        Self::Capacity { max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            DomainError::validation("discount must not be negative").to_string(),
            "validation failed: discount must not be negative"
        );
        assert_eq!(DomainError::capacity(4).to_string(), "bundle is full (max 4 entries)");
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
