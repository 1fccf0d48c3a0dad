//! Immutable puzzle state and its transitions.
//!
//! Every transition borrows the current state and returns a new one, so a
//! UI can keep old snapshots around and tests can compare states directly.

use super::invariants::assert_invariants;
use crate::types::{Difficulty, Group, GroupId, ITEMS_PER_GROUP, ItemId, PuzzleDefinition};
use derive_getters::Getters;
use derive_new::new;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Wrong guesses allowed before the puzzle is lost.
pub const INITIAL_MISTAKES: u8 = 4;

/// Most items that can be selected at once.
pub const MAX_SELECTION: usize = ITEMS_PER_GROUP;

/// Where the puzzle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum PuzzleStatus {
    /// Guesses are still being taken.
    #[strum(to_string = "in progress")]
    InProgress,
    /// All four groups were found.
    #[strum(to_string = "won")]
    Won,
    /// The mistakes ran out.
    #[strum(to_string = "lost")]
    Lost,
}

impl PuzzleStatus {
    /// Returns true once the puzzle is won or lost.
    pub fn is_terminal(self) -> bool {
        !matches!(self, PuzzleStatus::InProgress)
    }
}

/// A logged wrong guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Mistake {
    /// The four guessed items.
    item_ids: Vec<ItemId>,
    /// Tier of each guessed item, in the same order.
    difficulties: Vec<Difficulty>,
}

impl Mistake {
    /// Whether this guess covered exactly the given items, in any order.
    pub fn covers(&self, selection: &BTreeSet<ItemId>) -> bool {
        self.item_ids.len() == selection.len() && self.item_ids.iter().all(|id| selection.contains(id))
    }
}

/// What a guess submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    /// Nothing happened: not four items selected, the puzzle is over, or
    /// the four items are a group that is already solved.
    Ignored,
    /// The same four items were already guessed wrong; nothing changed.
    AlreadyGuessed,
    /// The guess solved a group.
    Correct {
        /// The group that was solved.
        group_id: GroupId,
    },
    /// The guess was wrong and cost a mistake.
    Incorrect {
        /// Three of the four items shared a group.
        one_away: bool,
    },
}

/// New state after a guess, plus what the guess did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// State after the guess.
    pub state: PuzzleState,
    /// What the guess did.
    pub result: GuessResult,
}

/// A snapshot of one play-through of a puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    pub(crate) definition: Arc<PuzzleDefinition>,
    pub(crate) display_order: Vec<ItemId>,
    pub(crate) selected: BTreeSet<ItemId>,
    pub(crate) solved_group_ids: Vec<GroupId>,
    pub(crate) remaining_mistakes: u8,
    pub(crate) status: PuzzleStatus,
    pub(crate) mistake_log: Vec<Mistake>,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl PuzzleState {
    /// Starts a fresh play-through with a randomly ordered board.
    pub fn new(definition: impl Into<Arc<PuzzleDefinition>>) -> Self {
        Self::new_with_rng(definition, &mut rand::rng())
    }

    /// Starts a fresh play-through, shuffling with the given generator.
    #[instrument(skip_all)]
    pub fn new_with_rng<R: Rng + ?Sized>(definition: impl Into<Arc<PuzzleDefinition>>, rng: &mut R) -> Self {
        let definition = definition.into();
        let mut display_order: Vec<ItemId> = definition.items.iter().map(|item| item.id.clone()).collect();
        display_order.shuffle(rng);

        info!(items = display_order.len(), "Starting puzzle");
        Self {
            definition,
            display_order,
            selected: BTreeSet::new(),
            solved_group_ids: Vec::new(),
            remaining_mistakes: INITIAL_MISTAKES,
            status: PuzzleStatus::InProgress,
            mistake_log: Vec::new(),
        }
    }

    /// Starts over on the same puzzle with a freshly shuffled board.
    pub fn reset(&self) -> Self {
        Self::new(Arc::clone(&self.definition))
    }

    /// Starts over on the same puzzle, shuffling with the given generator.
    pub fn reset_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self::new_with_rng(Arc::clone(&self.definition), rng)
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl PuzzleState {
    /// The puzzle being played.
    pub fn definition(&self) -> &PuzzleDefinition {
        &self.definition
    }

    /// Item ids in board order: solved groups first, in solve order.
    pub fn display_order(&self) -> &[ItemId] {
        &self.display_order
    }

    /// Currently selected items.
    pub fn selected(&self) -> &BTreeSet<ItemId> {
        &self.selected
    }

    /// Solved groups, in the order they were solved.
    pub fn solved_group_ids(&self) -> &[GroupId] {
        &self.solved_group_ids
    }

    /// Wrong guesses still allowed.
    pub fn remaining_mistakes(&self) -> u8 {
        self.remaining_mistakes
    }

    /// Where the puzzle stands.
    pub fn status(&self) -> PuzzleStatus {
        self.status
    }

    /// Wrong guesses so far, oldest first.
    pub fn mistake_log(&self) -> &[Mistake] {
        &self.mistake_log
    }

    /// Whether the group has been solved.
    pub fn is_group_solved(&self, group_id: &GroupId) -> bool {
        self.solved_group_ids.contains(group_id)
    }

    /// Whether the item belongs to a solved group.
    pub fn is_item_solved(&self, item_id: &ItemId) -> bool {
        self.definition
            .item(item_id)
            .is_some_and(|item| self.is_group_solved(&item.group_id))
    }

    /// Solved groups, in solve order.
    pub fn solved_groups(&self) -> impl Iterator<Item = &Group> {
        self.solved_group_ids
            .iter()
            .filter_map(|id| self.definition.group(id))
    }

    /// Groups not yet solved, in definition order.
    pub fn unsolved_groups(&self) -> impl Iterator<Item = &Group> {
        self.definition
            .groups
            .iter()
            .filter(|group| !self.is_group_solved(&group.id))
    }

    /// Number of items pinned to the front of the board.
    pub fn solved_prefix_len(&self) -> usize {
        self.display_order
            .iter()
            .take_while(|id| self.is_item_solved(id))
            .count()
    }
}

// ─────────────────────────────────────────────────────────────
//  Selection
// ─────────────────────────────────────────────────────────────

impl PuzzleState {
    /// Selects or deselects an item.
    ///
    /// Selecting a fifth item or an id the puzzle does not have does
    /// nothing, as does any toggle once the puzzle is over.
    #[instrument(skip(self), fields(selected = self.selected.len()))]
    pub fn toggle_selection(&self, item_id: &ItemId) -> Self {
        if self.status.is_terminal() {
            return self.clone();
        }

        let mut next = self.clone();
        if next.selected.remove(item_id) {
            debug!("Deselected item");
        } else if next.selected.len() < MAX_SELECTION && self.definition.item(item_id).is_some() {
            next.selected.insert(item_id.clone());
            debug!("Selected item");
        } else {
            debug!("Selection unchanged");
        }

        assert_invariants(&next);
        next
    }

    /// Clears the selection.
    pub fn deselect_all(&self) -> Self {
        if self.status.is_terminal() {
            return self.clone();
        }
        let mut next = self.clone();
        next.selected.clear();
        next
    }
}

// ─────────────────────────────────────────────────────────────
//  Guessing
// ─────────────────────────────────────────────────────────────

impl PuzzleState {
    fn selected_groups(&self) -> HashMap<&GroupId, usize> {
        let mut counts = HashMap::new();
        for item in self.selected.iter().filter_map(|id| self.definition.item(id)) {
            *counts.entry(&item.group_id).or_insert(0) += 1;
        }
        counts
    }

    /// Whether four items are selected and exactly three share a group.
    pub fn is_one_away_from_group(&self) -> bool {
        self.selected.len() == MAX_SELECTION && self.selected_groups().values().any(|&count| count == 3)
    }

    /// Whether the current selection matches a wrong guess already made.
    pub fn is_duplicate_guess(&self) -> bool {
        self.mistake_log.iter().any(|mistake| mistake.covers(&self.selected))
    }

    /// Checks the selected four items against the hidden groups.
    ///
    /// Does nothing unless exactly four items are selected and the puzzle
    /// is in progress, or when the four items form a group that is already
    /// solved. Repeating an earlier wrong guess is not detected here; see
    /// [`PuzzleState::is_duplicate_guess`].
    #[instrument(skip(self), fields(solved = self.solved_group_ids.len(), remaining = self.remaining_mistakes))]
    pub fn submit_guess(&self) -> GuessOutcome {
        if self.selected.len() != MAX_SELECTION || self.status.is_terminal() {
            debug!(selected = self.selected.len(), status = %self.status, "Guess ignored");
            return GuessOutcome {
                state: self.clone(),
                result: GuessResult::Ignored,
            };
        }

        let groups = self.selected_groups();
        let outcome = match groups.keys().next() {
            Some(&group_id) if groups.len() == 1 && self.is_group_solved(group_id) => {
                debug!(%group_id, "Group already solved");
                return GuessOutcome {
                    state: self.clone(),
                    result: GuessResult::Ignored,
                };
            }
            Some(&group_id) if groups.len() == 1 => self.solve(group_id.clone()),
            _ => self.miss(),
        };

        assert_invariants(&outcome.state);
        outcome
    }

    fn solve(&self, group_id: GroupId) -> GuessOutcome {
        let mut next = self.clone();
        next.solved_group_ids.push(group_id.clone());
        next.selected.clear();

        // Solved items move to the front in solve order; the rest keep their order.
        let (solved, unsolved): (Vec<_>, Vec<_>) = self
            .display_order
            .iter()
            .cloned()
            .partition(|id| next.is_item_solved(id));
        let mut display_order = Vec::with_capacity(self.display_order.len());
        for solved_group in &next.solved_group_ids {
            display_order.extend(solved.iter().filter(|id| {
                next.definition
                    .item(id)
                    .is_some_and(|item| &item.group_id == solved_group)
            }).cloned());
        }
        display_order.extend(unsolved);
        next.display_order = display_order;

        if next.solved_group_ids.len() == next.definition.groups.len() {
            next.status = PuzzleStatus::Won;
            info!("Puzzle won");
        }

        debug!(%group_id, "Group solved");
        GuessOutcome {
            state: next,
            result: GuessResult::Correct { group_id },
        }
    }

    fn miss(&self) -> GuessOutcome {
        let one_away = self.is_one_away_from_group();
        let item_ids: Vec<ItemId> = self.selected.iter().cloned().collect();
        let difficulties = item_ids
            .iter()
            .filter_map(|id| self.definition.item(id))
            .map(|item| item.difficulty)
            .collect();

        let mut next = self.clone();
        next.remaining_mistakes = self.remaining_mistakes.saturating_sub(1);
        next.mistake_log.push(Mistake::new(item_ids, difficulties));
        next.selected.clear();

        if next.remaining_mistakes == 0 {
            next.status = PuzzleStatus::Lost;
            info!("Puzzle lost");
        }

        debug!(one_away, remaining = next.remaining_mistakes, "Wrong guess");
        GuessOutcome {
            state: next,
            result: GuessResult::Incorrect { one_away },
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Board order
// ─────────────────────────────────────────────────────────────

impl PuzzleState {
    /// Randomly reorders the unsolved part of the board.
    pub fn shuffle_display(&self) -> Self {
        self.shuffle_display_with_rng(&mut rand::rng())
    }

    /// Reorders the unsolved part of the board with the given generator.
    ///
    /// Solved groups stay pinned at the front.
    pub fn shuffle_display_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        if self.status.is_terminal() {
            return self.clone();
        }

        let mut next = self.clone();
        let prefix = self.solved_prefix_len();
        next.display_order[prefix..].shuffle(rng);

        assert_invariants(&next);
        next
    }
}
