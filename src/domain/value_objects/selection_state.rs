//! Selection state value object
//!
//! - `Selected`: the node and every descendant are selected
//! - `Unselected`: nothing in the subtree is selected
//! - `Mixed`: some but not all descendants are selected (folders only)

use serde::{Deserialize, Serialize};

/// Tri-state selection of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SelectionState {
    /// Node and all descendants selected (●)
    Selected,
    /// Nothing selected (○)
    #[default]
    Unselected,
    /// Partially selected (◐)
    Mixed,
}

impl SelectionState {
    /// Returns true unless the state is `Unselected`
    pub fn is_any_selected(&self) -> bool {
        !matches!(self, SelectionState::Unselected)
    }

    /// State a user toggle moves to: selected goes to unselected, anything
    /// else goes to selected.
    pub fn toggled(&self) -> Self {
        match self {
            SelectionState::Selected => SelectionState::Unselected,
            SelectionState::Unselected | SelectionState::Mixed => SelectionState::Selected,
        }
    }

    /// Derive a parent state from its children's states.
    ///
    /// Returns `None` for an empty iterator (leaves keep their own state).
    pub fn combine<I>(states: I) -> Option<Self>
    where
        I: IntoIterator<Item = SelectionState>,
    {
        let mut combined: Option<SelectionState> = None;
        for state in states {
            combined = match (combined, state) {
                (None, s) => Some(s),
                (Some(SelectionState::Mixed), _) | (_, SelectionState::Mixed) => {
                    return Some(SelectionState::Mixed)
                }
                (Some(prev), s) if prev == s => Some(prev),
                _ => return Some(SelectionState::Mixed),
            };
        }
        combined
    }
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionState::Selected => write!(f, "selected"),
            SelectionState::Unselected => write!(f, "unselected"),
            SelectionState::Mixed => write!(f, "mixed"),
        }
    }
}
