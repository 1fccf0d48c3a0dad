//! One player's session: the current puzzle state plus transient feedback.

use std::sync::Arc;
use std::time::{Duration, Instant};
use strictly_connections::{
    ActionOutcome, GuessResult, PuzzleAction, PuzzleDefinition, PuzzleState,
};
use tracing::{debug, info, instrument};

/// How long a feedback message stays on screen.
pub const FEEDBACK_TTL: Duration = Duration::from_secs(2);

/// Short message shown after a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum FeedbackKind {
    /// A wrong guess had three items from one group.
    #[display("One away...")]
    OneAway,
    /// The selection repeats an earlier wrong guess.
    #[display("Already guessed!")]
    AlreadyGuessed,
}

/// A feedback message and when it appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    kind: FeedbackKind,
    shown_at: Instant,
}

impl Feedback {
    /// Whether the message is still visible at `now`.
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < FEEDBACK_TTL
    }
}

/// Drives a [`PuzzleState`] from player actions.
#[derive(Debug, Clone)]
pub struct PlaySession {
    state: PuzzleState,
    feedback: Option<Feedback>,
    hints: bool,
}

impl PlaySession {
    /// Starts a session on a freshly shuffled board.
    #[instrument(skip(definition))]
    pub fn new(definition: impl Into<Arc<PuzzleDefinition>>, hints: bool) -> Self {
        Self::from_state(PuzzleState::new(definition), hints)
    }

    /// Wraps an existing state.
    pub fn from_state(state: PuzzleState, hints: bool) -> Self {
        Self {
            state,
            feedback: None,
            hints,
        }
    }

    /// The current puzzle state.
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Applies an action and updates the feedback message.
    ///
    /// Toggling an item or resetting clears any message.
    #[instrument(skip_all, fields(action = %action))]
    pub fn dispatch(&mut self, action: &PuzzleAction, now: Instant) -> ActionOutcome {
        let transition = self.state.apply(action);
        let was_terminal = self.state.status().is_terminal();
        self.state = transition.state;

        match (&transition.outcome, action) {
            (ActionOutcome::Guess(GuessResult::AlreadyGuessed), _) => {
                self.show(FeedbackKind::AlreadyGuessed, now);
            }
            (ActionOutcome::Guess(GuessResult::Incorrect { one_away: true }), _) if self.hints => {
                self.show(FeedbackKind::OneAway, now);
            }
            (_, PuzzleAction::Toggle(_) | PuzzleAction::Reset) => self.feedback = None,
            _ => {}
        }

        if !was_terminal && self.state.status().is_terminal() {
            info!(
                status = %self.state.status(),
                mistakes = self.state.mistake_log().len(),
                "Puzzle finished"
            );
        }
        transition.outcome
    }

    fn show(&mut self, kind: FeedbackKind, now: Instant) {
        debug!(%kind, "Showing feedback");
        self.feedback = Some(Feedback { kind, shown_at: now });
    }

    /// The message visible at `now`, if any.
    pub fn feedback(&self, now: Instant) -> Option<FeedbackKind> {
        self.feedback
            .filter(|feedback| feedback.is_live(now))
            .map(|feedback| feedback.kind)
    }
}
