//! Shareable puzzle tokens.
//!
//! Two self-contained formats turn a [`PuzzleDefinition`] into a URL-safe
//! string and back. The compact format is preferred; the legacy format is
//! still decoded so old links keep working.
//!
//! Decoding never fails loudly: every malformed token collapses to `None`
//! through [`PuzzleCodec::decode`]. [`PuzzleCodec::try_decode`] keeps the
//! reason for logs and tests.

mod compact;
mod legacy;

pub use compact::CompactCodec;
pub use legacy::LegacyCodec;

use crate::types::PuzzleDefinition;
use crate::validation::ValidationError;
use tracing::{debug, instrument};

/// Why a token could not be turned back into a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DecodeError {
    /// The token is not valid base64.
    #[display("Token is not valid base64: {_0}")]
    Base64(String),

    /// Decompression failed or produced nothing.
    #[display("Token could not be decompressed")]
    Decompress,

    /// The payload is not JSON of the expected types.
    #[display("Token payload is not valid JSON: {_0}")]
    Json(String),

    /// The JSON parsed but has the wrong shape.
    #[display("Token payload has the wrong shape: {_0}")]
    Shape(&'static str),
}

impl std::error::Error for DecodeError {}

/// Why a puzzle could not be turned into a token.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EncodeError {
    /// Only valid puzzles can be shared.
    #[display("Puzzle is not valid: {_0}")]
    Invalid(ValidationError),

    /// Serializing the payload failed.
    #[display("Failed to serialize puzzle: {_0}")]
    #[from(ignore)]
    Json(String),
}

impl std::error::Error for EncodeError {}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// One token format.
pub trait PuzzleCodec {
    /// URL query parameter that carries tokens of this format.
    const PARAM: &'static str;

    /// Encodes a valid puzzle into a token. Same input, same token.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Invalid`] if the puzzle fails validation.
    fn encode(&self, definition: &PuzzleDefinition) -> Result<String, EncodeError>;

    /// Decodes a token, reporting why it was rejected.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] hit while unpacking the token.
    fn try_decode(&self, token: &str) -> Result<PuzzleDefinition, DecodeError>;

    /// Decodes a token, collapsing every failure to `None`.
    fn decode(&self, token: &str) -> Option<PuzzleDefinition> {
        match self.try_decode(token) {
            Ok(definition) => Some(definition),
            Err(error) => {
                debug!(param = Self::PARAM, %error, "Rejected puzzle token");
                None
            }
        }
    }
}

/// Resolves a puzzle from the tokens found in a link.
///
/// A compact token takes precedence; the legacy token is only consulted when
/// no compact token is present. Empty tokens count as absent. `None` means
/// the caller should fall back to its own default puzzle.
#[instrument(skip_all, fields(compact = compact.is_some(), legacy = legacy.is_some()))]
pub fn resolve_puzzle_from_tokens(
    compact: Option<&str>,
    legacy: Option<&str>,
) -> Option<PuzzleDefinition> {
    if let Some(token) = compact.filter(|token| !token.is_empty()) {
        return CompactCodec.decode(token);
    }

    if let Some(token) = legacy.filter(|token| !token.is_empty()) {
        return LegacyCodec.decode(token);
    }

    debug!("No puzzle token present");
    None
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_token_wins() {
        let mut other = fixtures::sample();
        other.groups[0].connection = "Pets".to_string();

        let compact = CompactCodec.encode(&fixtures::sample()).unwrap();
        let legacy = LegacyCodec.encode(&other).unwrap();

        let resolved = resolve_puzzle_from_tokens(Some(&compact), Some(&legacy)).unwrap();
        assert_eq!(resolved.groups[0].connection, "Animals");
    }

    #[test]
    fn test_falls_back_to_legacy_token() {
        let legacy = LegacyCodec.encode(&fixtures::sample()).unwrap();
        let resolved = resolve_puzzle_from_tokens(None, Some(&legacy));
        assert_eq!(resolved, Some(fixtures::sample()));
    }

    #[test]
    fn test_broken_compact_token_does_not_fall_back() {
        let legacy = LegacyCodec.encode(&fixtures::sample()).unwrap();
        assert_eq!(resolve_puzzle_from_tokens(Some("garbage"), Some(&legacy)), None);
    }

    #[test]
    fn test_empty_tokens_count_as_absent() {
        let legacy = LegacyCodec.encode(&fixtures::sample()).unwrap();
        assert!(resolve_puzzle_from_tokens(Some(""), Some(&legacy)).is_some());
        assert_eq!(resolve_puzzle_from_tokens(None, None), None);
    }

    #[test]
    fn test_invalid_puzzle_is_not_encoded() {
        let mut definition = fixtures::sample();
        definition.groups.pop();
        assert_eq!(
            CompactCodec.encode(&definition),
            Err(EncodeError::Invalid(ValidationError::GroupCount))
        );
        assert!(LegacyCodec.encode(&definition).is_err());
    }
}
