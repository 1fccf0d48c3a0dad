//! Mistake invariant: lives, the mistake log and the status agree.

use super::Invariant;
use crate::engine::PuzzleState;
use crate::engine::state::{INITIAL_MISTAKES, PuzzleStatus};

/// Invariant: every lost life has a logged guess, and the status follows
/// from the remaining lives and solved groups.
pub struct MistakeAccountingInvariant;

impl Invariant<PuzzleState> for MistakeAccountingInvariant {
    fn holds(state: &PuzzleState) -> bool {
        let used = usize::from(INITIAL_MISTAKES - state.remaining_mistakes.min(INITIAL_MISTAKES));
        if used != state.mistake_log.len() {
            return false;
        }

        let all_solved = state.solved_group_ids.len() == state.definition.groups.len();
        match state.status {
            PuzzleStatus::Won => all_solved,
            PuzzleStatus::Lost => state.remaining_mistakes == 0 && !all_solved,
            PuzzleStatus::InProgress => state.remaining_mistakes > 0 && !all_solved,
        }
    }

    fn description() -> &'static str {
        "Mistake log, remaining mistakes and status agree"
    }
}
