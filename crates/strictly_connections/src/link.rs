//! Shareable links and the launch parameters read back out of them.
//!
//! A link carries at most one puzzle token: `g` for the compact format or
//! `game` for the legacy format. `admin=true` asks for the authoring view.

use crate::codec::{CompactCodec, EncodeError, LegacyCodec, PuzzleCodec, resolve_puzzle_from_tokens};
use crate::types::PuzzleDefinition;
use crate::validation::validate;
use derive_getters::Getters;
use tracing::{debug, instrument, warn};
use url::Url;

/// Query parameter requesting the authoring view.
pub const ADMIN_PARAM: &str = "admin";

/// Error turning a puzzle into a link.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum LinkError {
    /// The base URL could not be parsed.
    #[display("Invalid base URL: {_0}")]
    BaseUrl(url::ParseError),

    /// The puzzle could not be encoded.
    #[display("{_0}")]
    Encode(EncodeError),
}

impl std::error::Error for LinkError {}

/// What a page was opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct LaunchParams {
    /// Token in the compact format.
    compact_token: Option<String>,
    /// Token in the legacy format.
    legacy_token: Option<String>,
    /// Whether the authoring view was requested.
    #[getter(skip)]
    admin: bool,
}

impl LaunchParams {
    /// Reads launch parameters from a full URL.
    ///
    /// Empty token parameters count as absent.
    #[instrument(skip_all, fields(url = %url))]
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            if key == CompactCodec::PARAM && !value.is_empty() {
                params.compact_token.get_or_insert_with(|| value.into_owned());
            } else if key == LegacyCodec::PARAM && !value.is_empty() {
                params.legacy_token.get_or_insert_with(|| value.into_owned());
            } else if key == ADMIN_PARAM {
                params.admin = value == "true";
            }
        }
        debug!(?params, "Parsed launch parameters");
        params
    }

    /// Reads launch parameters from either a full link or a bare token.
    ///
    /// Anything that does not parse as a URL is treated as a compact token.
    pub fn from_link_or_token(input: &str) -> Self {
        let input = input.trim();
        match Url::parse(input) {
            Ok(url) => Self::from_url(&url),
            Err(_) => Self {
                compact_token: Some(input.to_string()).filter(|token| !token.is_empty()),
                ..Self::default()
            },
        }
    }

    /// Whether the authoring view was requested.
    pub fn admin(&self) -> bool {
        self.admin
    }

    /// Resolves the puzzle these parameters carry, compact format first.
    pub fn puzzle(&self) -> Option<PuzzleDefinition> {
        resolve_puzzle_from_tokens(self.compact_token.as_deref(), self.legacy_token.as_deref())
    }

    /// Resolves the puzzle these parameters carry, keeping it only if it
    /// passes validation.
    ///
    /// The compact format accepts any tier digits, so a token can decode to
    /// a board with lopsided groups that can never be finished.
    #[instrument(skip_all)]
    pub fn playable_puzzle(&self) -> Option<PuzzleDefinition> {
        let definition = self.puzzle()?;
        match validate(&definition) {
            Ok(()) => Some(definition),
            Err(error) => {
                warn!(%error, "Decoded puzzle is not playable");
                None
            }
        }
    }
}

/// Strips the query and trailing path slash from a page address.
fn page_base(base: &str) -> Result<Url, LinkError> {
    let mut url = Url::parse(base)?;
    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn build_link<C: PuzzleCodec>(
    codec: &C,
    base: &str,
    definition: &PuzzleDefinition,
    admin: bool,
) -> Result<Url, LinkError> {
    let token = codec.encode(definition)?;
    let mut url = page_base(base)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair(C::PARAM, &token);
        if admin {
            query.append_pair(ADMIN_PARAM, "true");
        }
    }
    Ok(url)
}

/// Builds a compact-format link to `definition` on the page at `base`.
///
/// # Errors
///
/// Fails if `base` is not a URL or the puzzle is not valid.
#[instrument(skip(definition))]
pub fn share_link(base: &str, definition: &PuzzleDefinition, admin: bool) -> Result<Url, LinkError> {
    build_link(&CompactCodec, base, definition, admin)
}

/// Builds a legacy-format link to `definition` on the page at `base`.
///
/// # Errors
///
/// Fails if `base` is not a URL or the puzzle is not valid.
#[instrument(skip(definition))]
pub fn legacy_share_link(
    base: &str,
    definition: &PuzzleDefinition,
    admin: bool,
) -> Result<Url, LinkError> {
    build_link(&LegacyCodec, base, definition, admin)
}

/// Link that opens the authoring view on the page at `base`.
///
/// # Errors
///
/// Fails if `base` is not a URL.
pub fn admin_link(base: &str) -> Result<Url, LinkError> {
    let mut url = page_base(base)?;
    url.query_pairs_mut().append_pair(ADMIN_PARAM, "true");
    Ok(url)
}
