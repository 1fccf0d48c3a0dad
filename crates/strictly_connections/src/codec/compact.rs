//! Compact token format: lz-string compressed JSON.
//!
//! ```json
//! {"t":["item", ...16], "g":"0123012301230123", "c":["connection", ...4]}
//! ```
//!
//! `g` holds each item's group as a digit. Group `i` always has the `i`-th
//! tier in canonical order, so digits are tier indices. `c` may be missing
//! in tokens from the labelless first version of the format.

use super::{DecodeError, EncodeError, PuzzleCodec};
use crate::types::{Difficulty, GROUP_COUNT, Group, GroupId, ITEM_COUNT, Item, ItemId, PuzzleDefinition};
use crate::validation::validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Serialize, Deserialize)]
struct CompactPayload {
    t: Vec<String>,
    g: String,
    #[serde(default)]
    c: Option<Vec<String>>,
}

/// Compressed format carried by the `g` parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactCodec;

impl PuzzleCodec for CompactCodec {
    const PARAM: &'static str = "g";

    #[instrument(skip_all)]
    fn encode(&self, definition: &PuzzleDefinition) -> Result<String, EncodeError> {
        validate(definition)?;

        // Validation guarantees every item's group exists and every tier is used once.
        let g = definition
            .items
            .iter()
            .filter_map(|item| definition.group(&item.group_id))
            .map(|group| char::from(b'0' + group.difficulty.index()))
            .collect();
        let c = Difficulty::ALL
            .into_iter()
            .map(|tier| {
                definition
                    .group_by_difficulty(tier)
                    .map(|group| group.connection.clone())
                    .unwrap_or_default()
            })
            .collect();

        let payload = CompactPayload {
            t: definition.items.iter().map(|item| item.text.clone()).collect(),
            g,
            c: Some(c),
        };

        let json = serde_json::to_string(&payload)?;
        Ok(lz_str::compress_to_encoded_uri_component(json.as_str()))
    }

    #[instrument(skip_all, fields(len = token.len()))]
    fn try_decode(&self, token: &str) -> Result<PuzzleDefinition, DecodeError> {
        let wide = lz_str::decompress_from_encoded_uri_component(token)
            .filter(|wide| !wide.is_empty())
            .ok_or(DecodeError::Decompress)?;
        let json = String::from_utf16(&wide).map_err(|_| DecodeError::Decompress)?;

        let payload: CompactPayload =
            serde_json::from_str(&json).map_err(|e| DecodeError::Json(e.to_string()))?;

        if payload.t.len() != ITEM_COUNT {
            return Err(DecodeError::Shape("expected 16 items"));
        }
        let assignments = payload
            .g
            .chars()
            .map(|digit| {
                digit
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(Difficulty::from_index)
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(DecodeError::Shape("group digits must be 0-3"))?;
        if assignments.len() != ITEM_COUNT {
            return Err(DecodeError::Shape("expected 16 group digits"));
        }
        let connections = match payload.c {
            Some(connections) if connections.len() != GROUP_COUNT => {
                return Err(DecodeError::Shape("expected 4 connections"));
            }
            Some(connections) => connections,
            None => vec![String::new(); GROUP_COUNT],
        };

        let mut groups: Vec<Group> = Difficulty::ALL
            .into_iter()
            .zip(connections)
            .enumerate()
            .map(|(index, (difficulty, connection))| Group {
                id: GroupId::positional(index),
                difficulty,
                connection,
                members: Vec::new(),
            })
            .collect();

        let mut items = Vec::with_capacity(ITEM_COUNT);
        for (position, (text, tier)) in payload.t.into_iter().zip(assignments).enumerate() {
            let group = &mut groups[usize::from(tier.index())];
            let id = ItemId::positional(position);
            group.members.push(id.clone());
            items.push(Item {
                id,
                text,
                group_id: group.id.clone(),
                difficulty: group.difficulty,
            });
        }

        Ok(PuzzleDefinition { groups, items })
    }
}
