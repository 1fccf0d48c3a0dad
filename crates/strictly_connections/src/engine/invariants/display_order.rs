//! Board invariant: the board shows every item once, solved groups first.

use super::Invariant;
use crate::engine::PuzzleState;
use std::collections::HashSet;

/// Invariant: the display order is a permutation of the puzzle's items and
/// starts with the solved groups' items, grouped in solve order.
pub struct DisplayOrderInvariant;

impl Invariant<PuzzleState> for DisplayOrderInvariant {
    fn holds(state: &PuzzleState) -> bool {
        let shown: HashSet<_> = state.display_order.iter().collect();
        let permutation = state.display_order.len() == state.definition.items.len()
            && shown.len() == state.display_order.len()
            && state.definition.items.iter().all(|item| shown.contains(&item.id));
        if !permutation {
            return false;
        }

        let prefix = &state.display_order[..state.solved_prefix_len()];
        let expected_len: usize = state.solved_groups().map(|group| group.members.len()).sum();
        if prefix.len() != expected_len {
            return false;
        }

        let mut rows = prefix.iter();
        state.solved_groups().all(|group| {
            rows.by_ref()
                .take(group.members.len())
                .all(|id| group.members.contains(id))
        })
    }

    fn description() -> &'static str {
        "Board shows each item once with solved groups first"
    }
}
