//! Legacy token format: base64-encoded JSON with implicit grouping.
//!
//! ```json
//! {"g":[{"c":"connection","d":0}, ...4], "s":["item", ...16]}
//! ```
//!
//! Items `4i..4i+3` belong to group `i`; `d` is the tier's canonical index.

use super::{DecodeError, EncodeError, PuzzleCodec};
use crate::types::{Difficulty, GROUP_COUNT, GroupSpec, ITEM_COUNT, ITEMS_PER_GROUP, PuzzleDefinition};
use crate::validation::validate;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, alphabet};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Standard alphabet, padding optional on decode.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Serialize, Deserialize)]
struct LegacyGroup {
    c: String,
    d: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct LegacyPayload {
    g: Vec<LegacyGroup>,
    s: Vec<String>,
}

/// Base64 JSON format carried by the `game` parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCodec;

impl PuzzleCodec for LegacyCodec {
    const PARAM: &'static str = "game";

    #[instrument(skip_all)]
    fn encode(&self, definition: &PuzzleDefinition) -> Result<String, EncodeError> {
        validate(definition)?;

        // Items are written group by group so position implies membership.
        let payload = LegacyPayload {
            g: definition
                .groups
                .iter()
                .map(|group| LegacyGroup {
                    c: group.connection.clone(),
                    d: group.difficulty.index(),
                })
                .collect(),
            s: definition
                .groups
                .iter()
                .flat_map(|group| definition.member_texts(group))
                .map(str::to_owned)
                .collect(),
        };

        let json = serde_json::to_string(&payload)?;
        Ok(ENGINE.encode(json))
    }

    #[instrument(skip_all, fields(len = token.len()))]
    fn try_decode(&self, token: &str) -> Result<PuzzleDefinition, DecodeError> {
        // Form decoding turns an unescaped '+' into a space.
        let token = token.trim().replace(' ', "+");
        let bytes = ENGINE
            .decode(token)
            .map_err(|e| DecodeError::Base64(e.to_string()))?;

        // Browser-made tokens are Latin-1 rather than UTF-8.
        let json = String::from_utf8(bytes)
            .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect());

        let payload: LegacyPayload =
            serde_json::from_str(&json).map_err(|e| DecodeError::Json(e.to_string()))?;

        if payload.g.len() != GROUP_COUNT {
            return Err(DecodeError::Shape("expected 4 groups"));
        }
        if payload.s.len() != ITEM_COUNT {
            return Err(DecodeError::Shape("expected 16 items"));
        }

        let mut texts = payload.s.into_iter();
        let specs = payload
            .g
            .into_iter()
            .map(|group| {
                let difficulty = Difficulty::from_index(group.d)
                    .ok_or(DecodeError::Shape("difficulty index out of range"))?;
                let items = texts.by_ref().take(ITEMS_PER_GROUP).collect();
                Ok(GroupSpec::new(difficulty, group.c, items))
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(PuzzleDefinition::from_groups(specs))
    }
}
