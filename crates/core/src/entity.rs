//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Index of the first entity in `items` whose id equals `id`.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Move the entity `dragged` to the index currently held by `target`.
///
/// Stable array move: the dragged element is removed and reinserted, every
/// other element keeps its relative order. Returns `false` (and leaves `items`
/// untouched) when the ids are equal or either one is missing.
pub fn reposition<E: Entity>(items: &mut Vec<E>, dragged: &E::Id, target: &E::Id) -> bool {
    if dragged == target {
        return false;
    }
    let (Some(from), Some(to)) = (position_of(items, dragged), position_of(items, target)) else {
        return false;
    };
    let item = items.remove(from);
    items.insert(to, item);
    true
}
