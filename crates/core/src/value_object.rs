//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values:
/// a `Discount { kind: PercentOff, amount: 10 }` is the same as any other with
/// the same fields, while two products with equal titles are still different
/// products. Replace a value object instead of mutating it.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
