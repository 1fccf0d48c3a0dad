//! The puzzle engine: an immutable state machine for one play-through.

mod action;
pub mod invariants;
pub(crate) mod state;

pub use action::{ActionOutcome, PuzzleAction, Transition};
pub use state::{
    GuessOutcome, GuessResult, INITIAL_MISTAKES, MAX_SELECTION, Mistake, PuzzleState, PuzzleStatus,
};
