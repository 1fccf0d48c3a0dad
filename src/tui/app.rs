//! Play view state and key handling.

use super::input::move_cursor;
use crate::session::PlaySession;
use crossterm::event::KeyCode;
use std::time::Instant;
use strictly_connections::{GridRows, ItemId, PuzzleAction, format_summary_rows, with_link};
use tracing::{debug, instrument};

/// The interactive board: a session, a cursor over unsolved items and the
/// link appended to the summary.
#[derive(Debug, Clone)]
pub struct PlayApp {
    session: PlaySession,
    cursor: usize,
    share_link: Option<String>,
    should_quit: bool,
}

impl PlayApp {
    /// Creates the view for a session.
    pub fn new(session: PlaySession, share_link: Option<String>) -> Self {
        Self {
            session,
            cursor: 0,
            share_link,
            should_quit: false,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    /// Index of the highlighted item among [`PlayApp::unsolved_items`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Items still on the board, in display order.
    pub fn unsolved_items(&self) -> &[ItemId] {
        let state = self.session.state();
        &state.display_order()[state.solved_prefix_len()..]
    }

    /// Share text for a finished puzzle, with the link when configured.
    pub fn summary(&self) -> Option<String> {
        let summary = format_summary_rows(self.session.state(), GridRows::SolvedAndMistakes)?;
        Some(match &self.share_link {
            Some(link) => with_link(&summary, link),
            None => summary,
        })
    }

    /// Handles one key press.
    ///
    /// Arrows move, space toggles, enter submits, `s` shuffles, `d`
    /// deselects, `r` starts over and `q` or escape quits.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        let action = match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key, self.unsolved_items().len());
                return;
            }
            KeyCode::Char(' ') => match self.unsolved_items().get(self.cursor) {
                Some(id) => PuzzleAction::Toggle(id.clone()),
                None => return,
            },
            KeyCode::Enter => PuzzleAction::Submit,
            KeyCode::Char('s') => PuzzleAction::Shuffle,
            KeyCode::Char('d') => PuzzleAction::DeselectAll,
            KeyCode::Char('r') => PuzzleAction::Reset,
            _ => return,
        };

        let outcome = self.session.dispatch(&action, now);
        debug!(?outcome, "Key handled");
        self.cursor = self.cursor.min(self.unsolved_items().len().saturating_sub(1));
    }
}
