//! Strictly Connections - pure logic for shareable word-grouping puzzles
//!
//! Sixteen items hide four groups of four. A player selects four items at a
//! time and submits them as a guess; four wrong guesses lose the puzzle.
//!
//! # Architecture
//!
//! - **Types**: puzzle definitions, groups, items and difficulty tiers
//! - **Validation**: structural checks for authored puzzles
//! - **Codec**: compact (`g`) and legacy (`game`) URL tokens
//! - **Link**: shareable links and launch parameters
//! - **Engine**: immutable play state, transitions and invariants
//! - **Share**: result summaries for finished puzzles
//!
//! # Example
//!
//! ```
//! use strictly_connections::{CompactCodec, Difficulty, GroupSpec, PuzzleCodec, PuzzleDefinition, PuzzleState};
//!
//! let words = |w: [&str; 4]| -> Vec<String> { w.iter().map(|s| s.to_string()).collect() };
//! let definition = PuzzleDefinition::from_groups([
//!     GroupSpec::new(Difficulty::Yellow, "Pets".into(), words(["DOG", "CAT", "FISH", "BIRD"])),
//!     GroupSpec::new(Difficulty::Green, "Shades".into(), words(["RED", "BLUE", "TAN", "GREY"])),
//!     GroupSpec::new(Difficulty::Blue, "Digits".into(), words(["ONE", "TWO", "SIX", "TEN"])),
//!     GroupSpec::new(Difficulty::Purple, "Meals".into(), words(["PIE", "SOUP", "STEW", "RICE"])),
//! ]);
//!
//! let token = CompactCodec.encode(&definition).unwrap();
//! let decoded = CompactCodec.decode(&token).unwrap();
//! let state = PuzzleState::new(decoded);
//! assert_eq!(state.remaining_mistakes(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod engine;
mod link;
mod share;
mod types;
mod validation;

// Crate-level exports - Domain types
pub use types::{
    Difficulty, GROUP_COUNT, Group, GroupId, GroupSpec, ITEM_COUNT, ITEMS_PER_GROUP, Item, ItemId,
    PuzzleDefinition,
};

// Crate-level exports - Validation
pub use validation::{ValidationError, validate};

// Crate-level exports - Tokens
pub use codec::{
    CompactCodec, DecodeError, EncodeError, LegacyCodec, PuzzleCodec, resolve_puzzle_from_tokens,
};

// Crate-level exports - Links
pub use link::{ADMIN_PARAM, LaunchParams, LinkError, admin_link, legacy_share_link, share_link};

// Crate-level exports - Engine
pub use engine::invariants::{
    DisplayOrderInvariant, Invariant, InvariantSet, InvariantViolation, MistakeAccountingInvariant,
    PuzzleInvariants, SelectionBoundedInvariant,
};
pub use engine::{
    ActionOutcome, GuessOutcome, GuessResult, INITIAL_MISTAKES, MAX_SELECTION, Mistake, PuzzleAction,
    PuzzleState, PuzzleStatus, Transition,
};

// Crate-level exports - Sharing
pub use share::{
    GridRows, RevealedGroup, SUMMARY_TITLE, format_summary, format_summary_rows,
    format_summary_with_link, reveal, with_link,
};
