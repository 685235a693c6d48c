//! Tri-state checkbox projection.
//!
//! A product's checkbox is never stored; it is derived from its variants every
//! time it is read.

use bundlepick_core::ValueObject;
use serde::{Deserialize, Serialize};

/// Rendered state of a parent checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl ValueObject for TriState {}

impl TriState {
    /// Project child states onto the parent.
    ///
    /// With no children the parent's own explicit flag decides. Otherwise the
    /// parent is `Checked` iff every child is checked and `Indeterminate` iff
    /// some (but not all) are.
    pub fn project<I>(children: I, explicit: bool) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut total = 0usize;
        let mut checked = 0usize;
        for child in children {
            total += 1;
            if child {
                checked += 1;
            }
        }

        match (total, checked) {
            (0, _) if explicit => TriState::Checked,
            (0, _) => TriState::Unchecked,
            (_, 0) => TriState::Unchecked,
            (t, c) if t == c => TriState::Checked,
            _ => TriState::Indeterminate,
        }
    }

    pub fn is_checked(self) -> bool {
        self == TriState::Checked
    }

    pub fn is_indeterminate(self) -> bool {
        self == TriState::Indeterminate
    }

    /// Anything other than `Unchecked` counts as a selection.
    pub fn has_selection(self) -> bool {
        self != TriState::Unchecked
    }
}
