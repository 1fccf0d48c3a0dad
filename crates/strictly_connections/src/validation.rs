//! Structural checks for author-constructed puzzles.
//!
//! Rules are checked in a fixed order and the first violation wins, so the
//! same broken draft always produces the same message.

use crate::types::{Difficulty, GROUP_COUNT, ITEM_COUNT, ITEMS_PER_GROUP, PuzzleDefinition};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// First rule a puzzle definition breaks.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ValidationError {
    /// The puzzle does not have four groups.
    #[display("Game must have exactly 4 groups")]
    GroupCount,

    /// A group does not have four members.
    #[display("Group \"{connection}\" must have exactly 4 squares")]
    GroupSize {
        /// Connection label of the offending group.
        connection: String,
    },

    /// The puzzle does not have sixteen items.
    #[display("Game must have exactly 16 squares")]
    ItemCount,

    /// Two items share an id.
    #[display("All square IDs must be unique")]
    DuplicateItemId,

    /// An item is not listed by any group.
    #[display("Square \"{text}\" is not assigned to any group")]
    Unassigned {
        /// Text of the orphaned item.
        text: String,
    },

    /// A tier is used twice, so another is missing.
    #[display("Missing group with difficulty \"{_0}\"")]
    MissingDifficulty(Difficulty),

    /// An item's own group reference disagrees with the group listing it.
    #[display("Square \"{text}\" does not match the group that lists it")]
    Inconsistent {
        /// Text of the inconsistent item.
        text: String,
    },
}

impl std::error::Error for ValidationError {}

/// Checks a definition, returning the first violated rule.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the earliest rule that fails.
#[instrument(skip(definition), fields(groups = definition.groups.len(), items = definition.items.len()))]
pub fn validate(definition: &PuzzleDefinition) -> Result<(), ValidationError> {
    if definition.groups.len() != GROUP_COUNT {
        return reject(ValidationError::GroupCount);
    }

    if let Some(group) = definition
        .groups
        .iter()
        .find(|group| group.members.len() != ITEMS_PER_GROUP)
    {
        return reject(ValidationError::GroupSize {
            connection: group.connection.clone(),
        });
    }

    if definition.items.len() != ITEM_COUNT {
        return reject(ValidationError::ItemCount);
    }

    let ids: HashSet<_> = definition.items.iter().map(|item| &item.id).collect();
    if ids.len() != ITEM_COUNT {
        return reject(ValidationError::DuplicateItemId);
    }

    let assigned: HashSet<_> = definition
        .groups
        .iter()
        .flat_map(|group| group.members.iter())
        .collect();
    if let Some(item) = definition.items.iter().find(|item| !assigned.contains(&item.id)) {
        return reject(ValidationError::Unassigned {
            text: item.text.clone(),
        });
    }

    let used: HashSet<_> = definition.groups.iter().map(|group| group.difficulty).collect();
    if let Some(missing) = Difficulty::ALL.into_iter().find(|tier| !used.contains(tier)) {
        return reject(ValidationError::MissingDifficulty(missing));
    }

    for group in &definition.groups {
        for id in &group.members {
            let consistent = definition
                .item(id)
                .is_some_and(|item| item.group_id == group.id && item.difficulty == group.difficulty);
            if !consistent {
                let text = definition.item(id).map(|item| item.text.clone()).unwrap_or_default();
                return reject(ValidationError::Inconsistent { text });
            }
        }
    }

    Ok(())
}

fn reject(error: ValidationError) -> Result<(), ValidationError> {
    debug!(%error, "Puzzle definition rejected");
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, GroupId, Item, ItemId};

    fn fixture() -> PuzzleDefinition {
        let tiers = Difficulty::ALL;
        let groups = (0..4)
            .map(|g| Group {
                id: GroupId::new(format!("g{}", g + 1)),
                difficulty: tiers[g],
                connection: ["Animals", "Colors", "Numbers", "Food"][g].to_string(),
                members: (0..4).map(|i| ItemId::new(format!("s{}", g * 4 + i + 1))).collect(),
            })
            .collect();
        let items = (0..16)
            .map(|i| Item {
                id: ItemId::new(format!("s{}", i + 1)),
                text: format!("Text{}", i + 1),
                group_id: GroupId::new(format!("g{}", i / 4 + 1)),
                difficulty: tiers[i / 4],
            })
            .collect();
        PuzzleDefinition { groups, items }
    }

    #[test]
    fn test_accepts_valid_definition() {
        assert_eq!(validate(&fixture()), Ok(()));
    }

    #[test]
    fn test_accepts_empty_draft() {
        assert_eq!(validate(&PuzzleDefinition::empty_draft()), Ok(()));
    }

    #[test]
    fn test_rejects_wrong_group_count() {
        let mut definition = fixture();
        definition.groups.truncate(3);
        let error = validate(&definition).unwrap_err();
        assert_eq!(error, ValidationError::GroupCount);
        assert_eq!(error.to_string(), "Game must have exactly 4 groups");
    }

    #[test]
    fn test_rejects_short_group() {
        let mut definition = fixture();
        definition.groups[3].members.pop();
        let error = validate(&definition).unwrap_err();
        assert_eq!(error.to_string(), "Group \"Food\" must have exactly 4 squares");
    }

    #[test]
    fn test_rejects_wrong_item_count() {
        let mut definition = fixture();
        definition.items.pop();
        assert_eq!(
            validate(&definition).unwrap_err().to_string(),
            "Game must have exactly 16 squares"
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut definition = fixture();
        definition.items[1].id = ItemId::new("s1");
        assert_eq!(validate(&definition), Err(ValidationError::DuplicateItemId));
    }

    #[test]
    fn test_rejects_unassigned_item() {
        let mut definition = fixture();
        for group in &mut definition.groups {
            group.members[3] = ItemId::new("extra-id");
        }
        assert_eq!(
            validate(&definition).unwrap_err().to_string(),
            "Square \"Text4\" is not assigned to any group"
        );
    }

    #[test]
    fn test_duplicate_difficulty_names_first_missing_tier() {
        let mut definition = fixture();
        definition.groups[1].difficulty = Difficulty::Yellow;
        definition.groups[2].difficulty = Difficulty::Yellow;
        assert_eq!(
            validate(&definition).unwrap_err().to_string(),
            "Missing group with difficulty \"green\""
        );
    }

    #[test]
    fn test_group_count_wins_over_later_rules() {
        let mut definition = fixture();
        definition.groups.truncate(2);
        definition.items.truncate(3);
        assert_eq!(validate(&definition), Err(ValidationError::GroupCount));
    }

    #[test]
    fn test_rejects_cross_inconsistent_item() {
        let mut definition = fixture();
        definition.items[0].group_id = GroupId::new("g2");
        assert_eq!(
            validate(&definition),
            Err(ValidationError::Inconsistent {
                text: "Text1".to_string()
            })
        );
    }
}
