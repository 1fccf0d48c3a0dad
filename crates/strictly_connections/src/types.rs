//! Core domain types for word-grouping puzzles.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of hidden groups in a puzzle.
pub const GROUP_COUNT: usize = 4;

/// Number of items in each group.
pub const ITEMS_PER_GROUP: usize = 4;

/// Number of items on the board.
pub const ITEM_COUNT: usize = GROUP_COUNT * ITEMS_PER_GROUP;

/// Identifier of an item on the board.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthetic id for the item at `index`, as assigned by the decoders.
    pub fn positional(index: usize) -> Self {
        Self(format!("square-{index}"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a group.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a group id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthetic id for the group at `index`, as assigned by the decoders.
    pub fn positional(index: usize) -> Self {
        Self(format!("group-{index}"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Difficulty tier of a group, doubling as its color.
///
/// The declaration order is the canonical order: yellow is the easiest,
/// purple the hardest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Most straightforward group.
    Yellow,
    /// Second tier.
    Green,
    /// Third tier.
    Blue,
    /// Trickiest group.
    Purple,
}

impl Difficulty {
    /// All tiers in canonical order.
    pub const ALL: [Difficulty; GROUP_COUNT] =
        [Difficulty::Yellow, Difficulty::Green, Difficulty::Blue, Difficulty::Purple];

    /// Position of the tier in canonical order (0-3).
    pub fn index(self) -> u8 {
        match self {
            Difficulty::Yellow => 0,
            Difficulty::Green => 1,
            Difficulty::Blue => 2,
            Difficulty::Purple => 3,
        }
    }

    /// Tier at the given canonical position, if it is in range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Colored square used in the share grid.
    pub fn glyph(self) -> &'static str {
        match self {
            Difficulty::Yellow => "🟨",
            Difficulty::Green => "🟩",
            Difficulty::Blue => "🟦",
            Difficulty::Purple => "🟪",
        }
    }
}

/// One of the sixteen texts placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id.
    pub id: ItemId,
    /// Text shown on the board.
    pub text: String,
    /// Group the item belongs to.
    pub group_id: GroupId,
    /// Tier of the item's group.
    pub difficulty: Difficulty,
}

/// A hidden group of four items sharing a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group id.
    pub id: GroupId,
    /// Tier of the group.
    pub difficulty: Difficulty,
    /// The theme that links the members.
    pub connection: String,
    /// Member item ids, in authoring order.
    pub members: Vec<ItemId>,
}

/// Authoring description of one group, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct GroupSpec {
    /// Tier of the group.
    pub difficulty: Difficulty,
    /// The theme that links the members.
    pub connection: String,
    /// Item texts, in board order.
    pub items: Vec<String>,
}

/// A complete puzzle: four groups partitioning sixteen items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// The hidden groups.
    pub groups: Vec<Group>,
    /// The items, in board order.
    pub items: Vec<Item>,
}

impl PuzzleDefinition {
    /// Builds a definition from group specs, assigning positional ids.
    ///
    /// Items are numbered across groups in order, so the first group's items
    /// become `square-0..square-3`. Counts are not checked here; run
    /// [`crate::validate`] on the result.
    #[instrument(skip(specs))]
    pub fn from_groups(specs: impl IntoIterator<Item = GroupSpec>) -> Self {
        let mut groups = Vec::with_capacity(GROUP_COUNT);
        let mut items = Vec::with_capacity(ITEM_COUNT);

        for (group_index, spec) in specs.into_iter().enumerate() {
            let group_id = GroupId::positional(group_index);
            let mut members = Vec::with_capacity(spec.items.len());

            for text in spec.items {
                let id = ItemId::positional(items.len());
                members.push(id.clone());
                items.push(Item {
                    id,
                    text,
                    group_id: group_id.clone(),
                    difficulty: spec.difficulty,
                });
            }

            groups.push(Group {
                id: group_id,
                difficulty: spec.difficulty,
                connection: spec.connection,
                members,
            });
        }

        Self { groups, items }
    }

    /// Blank authoring draft: one group per tier in canonical order, each
    /// with four empty items.
    pub fn empty_draft() -> Self {
        Self::from_groups(Difficulty::ALL.into_iter().map(|difficulty| {
            GroupSpec::new(difficulty, String::new(), vec![String::new(); ITEMS_PER_GROUP])
        }))
    }

    /// Returns the item with the given id.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Returns the group with the given id.
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == id)
    }

    /// Returns the group with the given tier.
    pub fn group_by_difficulty(&self, difficulty: Difficulty) -> Option<&Group> {
        self.groups.iter().find(|group| group.difficulty == difficulty)
    }

    /// Texts of a group's members, in member order.
    pub fn member_texts(&self, group: &Group) -> Vec<&str> {
        group
            .members
            .iter()
            .filter_map(|id| self.item(id))
            .map(|item| item.text.as_str())
            .collect()
    }

    /// Describes the definition as group specs, in group order.
    pub fn group_specs(&self) -> Vec<GroupSpec> {
        self.groups
            .iter()
            .map(|group| {
                GroupSpec::new(
                    group.difficulty,
                    group.connection.clone(),
                    self.member_texts(group).into_iter().map(str::to_owned).collect(),
                )
            })
            .collect()
    }

    /// Returns a copy with one item's text replaced.
    ///
    /// Unknown ids leave the copy unchanged.
    pub fn with_item_text(&self, id: &ItemId, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(item) = next.items.iter_mut().find(|item| &item.id == id) {
            item.text = text.into();
        }
        next
    }

    /// Returns a copy with one group's connection replaced.
    ///
    /// Unknown ids leave the copy unchanged.
    pub fn with_connection(&self, id: &GroupId, connection: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(group) = next.groups.iter_mut().find(|group| &group.id == id) {
            group.connection = connection.into();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_canonical_order_matches_declaration() {
        let iterated: Vec<_> = Difficulty::iter().collect();
        assert_eq!(iterated, Difficulty::ALL.to_vec());
        for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
            assert_eq!(usize::from(difficulty.index()), index);
            assert_eq!(Difficulty::from_index(difficulty.index()), Some(*difficulty));
        }
        assert_eq!(Difficulty::from_index(4), None);
    }

    #[test]
    fn test_difficulty_displays_lowercase() {
        assert_eq!(Difficulty::Purple.to_string(), "purple");
    }

    #[test]
    fn test_empty_draft_structure() {
        let draft = PuzzleDefinition::empty_draft();

        assert_eq!(draft.groups.len(), GROUP_COUNT);
        assert_eq!(draft.items.len(), ITEM_COUNT);
        for (group, difficulty) in draft.groups.iter().zip(Difficulty::ALL) {
            assert_eq!(group.difficulty, difficulty);
            assert_eq!(group.members.len(), ITEMS_PER_GROUP);
            for id in &group.members {
                let item = draft.item(id).expect("member exists");
                assert_eq!(item.group_id, group.id);
                assert_eq!(item.difficulty, group.difficulty);
                assert!(item.text.is_empty());
            }
        }
        assert_eq!(draft.items[5].id, ItemId::new("square-5"));
        assert_eq!(draft.groups[2].id, GroupId::new("group-2"));
    }

    #[test]
    fn test_edits_return_new_definition() {
        let draft = PuzzleDefinition::empty_draft();
        let edited = draft
            .with_item_text(&ItemId::new("square-3"), "TROUT")
            .with_connection(&GroupId::new("group-0"), "FISH");

        assert!(draft.items[3].text.is_empty());
        assert_eq!(edited.items[3].text, "TROUT");
        assert_eq!(edited.groups[0].connection, "FISH");
    }

    #[test]
    fn test_unknown_edit_is_ignored() {
        let draft = PuzzleDefinition::empty_draft();
        assert_eq!(draft.with_item_text(&ItemId::new("nope"), "X"), draft);
    }

    #[test]
    fn test_group_specs_reflect_member_order() {
        let definition = PuzzleDefinition::from_groups(vec![GroupSpec::new(
            Difficulty::Blue,
            "LANGUAGES".to_string(),
            vec!["RUST".to_string(), "GO".to_string()],
        )]);
        let specs = definition.group_specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].items, vec!["RUST", "GO"]);
        assert_eq!(specs[0].difficulty, Difficulty::Blue);
    }
}
