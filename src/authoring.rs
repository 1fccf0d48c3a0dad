//! Authoring puzzles as TOML drafts.
//!
//! ```toml
//! [[groups]]
//! difficulty = "yellow"
//! connection = "TYPES OF FISH"
//! items = ["BASS", "FLOUNDER", "SALMON", "TROUT"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_connections::{
    GroupSpec, LinkError, PuzzleDefinition, ValidationError, legacy_share_link, share_link, validate,
};
use tracing::{debug, info, instrument};
use url::Url;

/// Error loading, checking or publishing a draft.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum DraftError {
    /// The draft file could not be read or written.
    #[display("Failed to access draft file: {_0}")]
    #[from(ignore)]
    Io(String),

    /// The draft is not valid TOML of the expected shape.
    #[display("Failed to parse draft: {_0}")]
    #[from(ignore)]
    Parse(String),

    /// The draft could not be written as TOML.
    #[display("Failed to write draft: {_0}")]
    #[from(ignore)]
    Serialize(String),

    /// The draft breaks a puzzle rule.
    #[display("{_0}")]
    Invalid(ValidationError),

    /// No link could be built.
    #[display("{_0}")]
    Link(LinkError),
}

impl std::error::Error for DraftError {}

/// Token format used for a published link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkFormat {
    /// Compressed `g` token.
    #[default]
    Compact,
    /// Base64 `game` token.
    Legacy,
}

/// A puzzle as written by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFile {
    /// The four groups, each with its tier, connection and items.
    pub groups: Vec<GroupSpec>,
}

impl DraftFile {
    /// Blank draft: one group per tier, four empty items each.
    pub fn empty() -> Self {
        Self::from_definition(&PuzzleDefinition::empty_draft())
    }

    /// Describes an existing puzzle as a draft.
    pub fn from_definition(definition: &PuzzleDefinition) -> Self {
        Self {
            groups: definition.group_specs(),
        }
    }

    /// Builds the puzzle the draft describes. Nothing is checked here.
    pub fn to_definition(&self) -> PuzzleDefinition {
        PuzzleDefinition::from_groups(self.groups.iter().cloned())
    }

    /// Reads a draft from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DraftError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| DraftError::Io(e.to_string()))?;
        let draft = Self::from_toml(&content)?;
        debug!(groups = draft.groups.len(), "Draft loaded");
        Ok(draft)
    }

    /// Parses a draft from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, DraftError> {
        toml::from_str(content).map_err(|e| DraftError::Parse(e.to_string()))
    }

    /// Renders the draft as TOML.
    pub fn to_toml(&self) -> Result<String, DraftError> {
        toml::to_string_pretty(self).map_err(|e| DraftError::Serialize(e.to_string()))
    }

    /// Checks the draft against the puzzle rules.
    pub fn validate(&self) -> Result<PuzzleDefinition, DraftError> {
        let definition = self.to_definition();
        validate(&definition)?;
        Ok(definition)
    }

    /// Validates the draft and builds a link to play it.
    #[instrument(skip(self))]
    pub fn publish(&self, base_url: &str, format: LinkFormat, admin: bool) -> Result<Url, DraftError> {
        let definition = self.validate()?;
        let url = match format {
            LinkFormat::Compact => share_link(base_url, &definition, admin)?,
            LinkFormat::Legacy => legacy_share_link(base_url, &definition, admin)?,
        };
        info!(len = url.as_str().len(), "Draft published");
        Ok(url)
    }
}
