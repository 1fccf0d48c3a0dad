//! Shareable result text for finished puzzles.
//!
//! ```text
//! Connections
//! Mistakes: 2/4
//!
//! 🟩🟩🟩🟩
//! 🟨🟨🟨🟨
//! ```

use crate::engine::{INITIAL_MISTAKES, PuzzleState};
use crate::types::{Difficulty, GroupId, ITEMS_PER_GROUP};
use derive_getters::Getters;
use std::fmt;
use tracing::instrument;

/// First line of every summary.
pub const SUMMARY_TITLE: &str = "Connections";

/// Which rows the emoji grid carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridRows {
    /// One row per solved group, in solve order.
    #[default]
    Solved,
    /// Solved rows, then one row per wrong guess showing its tiers.
    SolvedAndMistakes,
}

/// Result summary of a finished puzzle; `None` while still in progress.
pub fn format_summary(state: &PuzzleState) -> Option<String> {
    format_summary_rows(state, GridRows::Solved)
}

/// Result summary followed by a blank line and `link`.
pub fn format_summary_with_link(state: &PuzzleState, link: &str) -> Option<String> {
    format_summary(state).map(|summary| with_link(&summary, link))
}

/// Result summary with the chosen grid rows; `None` while still in progress.
#[instrument(skip(state), fields(status = %state.status()))]
pub fn format_summary_rows(state: &PuzzleState, rows: GridRows) -> Option<String> {
    if !state.status().is_terminal() {
        return None;
    }

    let mistakes = state.mistake_log().len();
    let score = if mistakes == 0 {
        "Perfect!".to_string()
    } else {
        format!("Mistakes: {mistakes}/{INITIAL_MISTAKES}")
    };

    let mut lines: Vec<String> = state
        .solved_groups()
        .map(|group| group.difficulty.glyph().repeat(ITEMS_PER_GROUP))
        .collect();
    if rows == GridRows::SolvedAndMistakes {
        lines.extend(
            state
                .mistake_log()
                .iter()
                .map(|mistake| mistake.difficulties().iter().map(|tier| tier.glyph()).collect()),
        );
    }

    Some(format!("{SUMMARY_TITLE}\n{score}\n\n{}", lines.join("\n")))
}

/// Appends a link to share text after a blank line.
pub fn with_link(text: &str, link: &str) -> String {
    format!("{text}\n\n{link}")
}

/// One group as shown once the puzzle is over.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RevealedGroup {
    /// Group id.
    id: GroupId,
    /// Tier of the group.
    difficulty: Difficulty,
    /// The group's connection.
    connection: String,
    /// Member texts, in member order.
    items: Vec<String>,
    /// Whether the player found it.
    #[getter(skip)]
    solved: bool,
}

impl RevealedGroup {
    /// Whether the player found this group.
    pub fn solved(&self) -> bool {
        self.solved
    }
}

impl fmt::Display for RevealedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.difficulty.glyph(),
            self.connection,
            self.items.join(", ")
        )?;
        if !self.solved {
            write!(f, " (missed)")?;
        }
        Ok(())
    }
}

/// Every group with its answer, in definition order.
pub fn reveal(state: &PuzzleState) -> Vec<RevealedGroup> {
    let definition = state.definition();
    definition
        .groups
        .iter()
        .map(|group| RevealedGroup {
            id: group.id.clone(),
            difficulty: group.difficulty,
            connection: group.connection.clone(),
            items: definition
                .member_texts(group)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            solved: state.is_group_solved(&group.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::tests::{fresh, select};

    fn play(guesses: &[[&str; 4]]) -> PuzzleState {
        guesses
            .iter()
            .fold(fresh(), |state, guess| select(&state, guess).submit_guess().state)
    }

    #[test]
    fn test_no_summary_while_in_progress() {
        let state = play(&[["s1", "s2", "s3", "s4"]]);
        assert_eq!(format_summary(&state), None);
        assert_eq!(format_summary_with_link(&state, "http://x/"), None);
    }

    #[test]
    fn test_perfect_game() {
        let state = play(&[
            ["s5", "s6", "s7", "s8"],
            ["s1", "s2", "s3", "s4"],
            ["s13", "s14", "s15", "s16"],
            ["s9", "s10", "s11", "s12"],
        ]);
        assert_eq!(
            format_summary(&state).unwrap(),
            "Connections\nPerfect!\n\n🟩🟩🟩🟩\n🟨🟨🟨🟨\n🟪🟪🟪🟪\n🟦🟦🟦🟦"
        );
    }

    #[test]
    fn test_lost_game_lists_only_solved_rows() {
        let state = play(&[
            ["s1", "s2", "s3", "s4"],
            ["s5", "s9", "s13", "s6"],
            ["s5", "s9", "s13", "s7"],
            ["s5", "s9", "s13", "s8"],
            ["s5", "s9", "s13", "s10"],
        ]);
        assert_eq!(
            format_summary(&state).unwrap(),
            "Connections\nMistakes: 4/4\n\n🟨🟨🟨🟨"
        );
    }

    #[test]
    fn test_mistake_rows_follow_solved_rows() {
        let state = play(&[
            ["s1", "s5", "s9", "s13"],
            ["s1", "s2", "s3", "s4"],
            ["s5", "s6", "s7", "s8"],
            ["s9", "s10", "s11", "s12"],
            ["s13", "s14", "s15", "s16"],
        ]);
        let summary = format_summary_rows(&state, GridRows::SolvedAndMistakes).unwrap();
        assert_eq!(
            summary,
            "Connections\nMistakes: 1/4\n\n🟨🟨🟨🟨\n🟩🟩🟩🟩\n🟦🟦🟦🟦\n🟪🟪🟪🟪\n🟨🟪🟩🟦"
        );
    }

    #[test]
    fn test_summary_with_link() {
        let state = play(&[
            ["s1", "s2", "s3", "s4"],
            ["s5", "s6", "s7", "s8"],
            ["s9", "s10", "s11", "s12"],
            ["s13", "s14", "s15", "s16"],
        ]);
        let text = format_summary_with_link(&state, "http://localhost:3000/?g=abc").unwrap();
        assert!(text.ends_with("🟪🟪🟪🟪\n\nhttp://localhost:3000/?g=abc"));
    }

    #[test]
    fn test_reveal_marks_missed_groups() {
        let state = play(&[
            ["s9", "s10", "s11", "s12"],
            ["s1", "s5", "s6", "s13"],
            ["s2", "s5", "s13", "s14"],
            ["s3", "s5", "s13", "s15"],
            ["s4", "s5", "s13", "s16"],
        ]);
        let groups = reveal(&state);

        assert_eq!(groups.len(), 4);
        assert_eq!(groups[2].connection(), "Numbers");
        assert!(groups[2].solved());
        assert_eq!(groups[2].to_string(), "🟦 Numbers: Text9, Text10, Text11, Text12");
        assert_eq!(groups[0].difficulty(), &Difficulty::Yellow);
        assert!(!groups[0].solved());
        assert_eq!(groups[0].to_string(), "🟨 Animals: Text1, Text2, Text3, Text4 (missed)");
    }
}
