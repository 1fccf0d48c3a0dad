//! Strictly Connections CLI library - terminal front end for word-grouping puzzles
//!
//! The puzzle logic lives in the `strictly_connections` crate; this crate adds
//! everything around it.
//!
//! # Architecture
//!
//! - **Config**: `connections.toml` plus environment overrides
//! - **Authoring**: TOML drafts validated and published as links
//! - **Session**: a puzzle state with transient feedback messages
//! - **TUI**: the interactive board

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod authoring;
mod config;
mod default_puzzle;
mod session;
mod tui;

// Crate-level exports - Configuration
pub use config::{AppConfig, BASE_URL_ENV, ConfigError, DEFAULT_CONFIG_FILE};

// Crate-level exports - Authoring
pub use authoring::{DraftError, DraftFile, LinkFormat};
pub use default_puzzle::{default_puzzle, puzzle_for_launch};

// Crate-level exports - Play
pub use session::{FEEDBACK_TTL, Feedback, FeedbackKind, PlaySession};
pub use tui::{PlayApp, run_play};
