//! Selection invariant: at most four puzzle items are ever selected.

use super::Invariant;
use crate::engine::PuzzleState;
use crate::engine::state::MAX_SELECTION;

/// Invariant: the selection holds at most four items of the puzzle.
pub struct SelectionBoundedInvariant;

impl Invariant<PuzzleState> for SelectionBoundedInvariant {
    fn holds(state: &PuzzleState) -> bool {
        state.selected.len() <= MAX_SELECTION
            && state
                .selected
                .iter()
                .all(|id| state.definition.item(id).is_some())
    }

    fn description() -> &'static str {
        "Selection holds at most four puzzle items"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::tests::{fresh, select};
    use crate::types::ItemId;

    #[test]
    fn test_full_selection_holds() {
        let state = select(&fresh(), &["s1", "s5", "s9", "s13"]);
        assert!(SelectionBoundedInvariant::holds(&state));
    }

    #[test]
    fn test_oversized_selection_violates() {
        let mut state = select(&fresh(), &["s1", "s5", "s9", "s13"]);
        state.selected.insert(ItemId::new("s2"));
        assert!(!SelectionBoundedInvariant::holds(&state));
    }

    #[test]
    fn test_unknown_selected_item_violates() {
        let mut state = select(&fresh(), &["s1"]);
        state.selected.insert(ItemId::new("stranger"));
        assert!(!SelectionBoundedInvariant::holds(&state));
    }
}
