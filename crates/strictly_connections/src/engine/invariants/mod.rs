//! First-class invariants for puzzle play.
//!
//! Invariants are properties every reachable [`PuzzleState`] satisfies.
//! Transitions assert them in debug builds, and each one is testable on its
//! own against hand-corrupted states.

mod display_order;
mod mistake_accounting;
mod selection_bounded;

pub use display_order::DisplayOrderInvariant;
pub use mistake_accounting::MistakeAccountingInvariant;
pub use selection_bounded::SelectionBoundedInvariant;

use super::PuzzleState;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks every invariant in the set, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// All puzzle invariants as a composable set.
pub type PuzzleInvariants = (
    SelectionBoundedInvariant,
    DisplayOrderInvariant,
    MistakeAccountingInvariant,
);

/// Asserts that all puzzle invariants hold (panics on violation in debug builds).
pub(crate) fn assert_invariants(state: &PuzzleState) {
    if cfg!(debug_assertions)
        && let Err(violations) = PuzzleInvariants::check_all(state)
    {
        for violation in &violations {
            warn!(description = %violation.description, "Puzzle invariant violated");
        }
        panic!("Puzzle invariants violated: {violations:?}");
    }
}
