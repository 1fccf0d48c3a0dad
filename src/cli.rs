//! Command-line interface for the connections front end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Connections - shareable word-grouping puzzles in the terminal
#[derive(Parser, Debug)]
#[command(name = "connections")]
#[command(about = "Play and author shareable word-grouping puzzles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = strictly_connections_cli::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a puzzle from a link, or the built-in puzzle
    Play {
        /// Puzzle link or bare compact token
        #[arg(short, long)]
        link: Option<String>,
    },

    /// Print an empty authoring draft as TOML
    Draft,

    /// Validate a TOML draft and print its shareable link
    Create {
        /// Path to the draft file
        draft: PathBuf,

        /// Open the link in the authoring view
        #[arg(long)]
        admin: bool,

        /// Use the legacy `game` token format
        #[arg(long)]
        legacy: bool,
    },

    /// Print the puzzle behind a link as a TOML draft
    Decode {
        /// Puzzle link or bare compact token
        link: String,
    },
}
