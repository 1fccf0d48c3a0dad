//! Player actions as first-class values.
//!
//! A front end turns input into a [`PuzzleAction`] and hands it to
//! [`PuzzleState::apply`]; the resulting [`Transition`] says what changed.

use super::state::{GuessResult, PuzzleState};
use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Something a player can do to the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum PuzzleAction {
    /// Select or deselect one item.
    #[display("toggle {_0}")]
    Toggle(ItemId),
    /// Check the selected four items.
    #[display("submit")]
    Submit,
    /// Reorder the unsolved items.
    #[display("shuffle")]
    Shuffle,
    /// Clear the selection.
    #[display("deselect all")]
    DeselectAll,
    /// Start the same puzzle over.
    #[display("reset")]
    Reset,
}

/// What applying an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The state changed.
    Applied,
    /// The action had no effect.
    Ignored,
    /// A guess was submitted.
    Guess(GuessResult),
}

/// New state after an action, plus what the action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the action.
    pub state: PuzzleState,
    /// What the action did.
    pub outcome: ActionOutcome,
}

impl PuzzleState {
    /// Applies one player action.
    ///
    /// Submitting a selection that repeats an earlier wrong guess yields
    /// [`GuessResult::AlreadyGuessed`] and leaves the state as it was.
    #[instrument(skip_all, fields(action = %action))]
    pub fn apply(&self, action: &PuzzleAction) -> Transition {
        let (state, outcome) = match action {
            PuzzleAction::Submit if self.is_duplicate_guess() && !self.status().is_terminal() => {
                debug!("Repeated guess");
                (self.clone(), ActionOutcome::Guess(GuessResult::AlreadyGuessed))
            }
            PuzzleAction::Submit => {
                let outcome = self.submit_guess();
                (outcome.state, ActionOutcome::Guess(outcome.result))
            }
            PuzzleAction::Toggle(item_id) => self.changed(self.toggle_selection(item_id)),
            PuzzleAction::Shuffle => self.changed(self.shuffle_display()),
            PuzzleAction::DeselectAll => self.changed(self.deselect_all()),
            PuzzleAction::Reset => (self.reset(), ActionOutcome::Applied),
        };
        Transition { state, outcome }
    }

    fn changed(&self, next: PuzzleState) -> (PuzzleState, ActionOutcome) {
        let outcome = if &next == self {
            ActionOutcome::Ignored
        } else {
            ActionOutcome::Applied
        };
        (next, outcome)
    }
}
