//! Per-row discount attached to a bundle entry.

use serde::{Deserialize, Serialize};

use bundlepick_core::{DomainError, DomainResult, ValueObject};

/// How the discount amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiscountKind {
    #[default]
    #[serde(rename = "% off")]
    PercentOff,
    #[serde(rename = "flat off")]
    FlatOff,
}

impl DiscountKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiscountKind::PercentOff => "% off",
            DiscountKind::FlatOff => "flat off",
        }
    }
}

/// Validated discount value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discount {
    kind: DiscountKind,
    amount: f64,
}

impl ValueObject for Discount {}

impl Discount {
    /// Validate and build a discount.
    ///
    /// Amounts must be finite and non-negative; percentages cannot exceed 100.
    pub fn new(kind: DiscountKind, amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("discount must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("discount cannot be negative"));
        }
        if kind == DiscountKind::PercentOff && amount > 100.0 {
            return Err(DomainError::validation("percentage discount cannot exceed 100"));
        }
        Ok(Self { kind, amount })
    }

    pub fn percent_off(amount: f64) -> DomainResult<Self> {
        Self::new(DiscountKind::PercentOff, amount)
    }

    pub fn flat_off(amount: f64) -> DomainResult<Self> {
        Self::new(DiscountKind::FlatOff, amount)
    }

    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_amounts() {
        assert_eq!(Discount::percent_off(100.0).unwrap().amount(), 100.0);
        assert_eq!(Discount::flat_off(250.0).unwrap().kind(), DiscountKind::FlatOff);
        assert_eq!(Discount::percent_off(0.0).unwrap().kind().label(), "% off");
    }

    #[test]
    fn rejects_invalid_amounts() {
        assert!(matches!(Discount::percent_off(-1.0), Err(DomainError::Validation(_))));
        assert!(matches!(Discount::percent_off(100.5), Err(DomainError::Validation(_))));
        assert!(matches!(Discount::flat_off(f64::NAN), Err(DomainError::Validation(_))));
    }

    #[test]
    fn kinds_use_ui_labels_on_the_wire() {
        assert_eq!(serde_json::to_string(&DiscountKind::FlatOff).unwrap(), "\"flat off\"");
        let kind: DiscountKind = serde_json::from_str("\"% off\"").unwrap();
        assert_eq!(kind, DiscountKind::PercentOff);
    }
}
