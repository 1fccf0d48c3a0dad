//! Connections - Unified CLI
//!
//! Plays shareable word-grouping puzzles and turns drafts into links.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strictly_connections::{LaunchParams, share_link};
use strictly_connections_cli::{
    AppConfig, DraftFile, LinkFormat, PlayApp, PlaySession, puzzle_for_launch, run_play,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn,strictly_connections=info,strictly_connections_cli=info";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    // The board owns the terminal while playing, so logs go to a file.
    let log_file = matches!(cli.command, Command::Play { .. }).then(|| PathBuf::from(config.log_file()));
    init_tracing(log_file.as_deref())?;
    info!(config = %cli.config.display(), base_url = %config.base_url(), "Configuration ready");

    match cli.command {
        Command::Play { link } => play(&config, link.as_deref()),
        Command::Draft => print_draft(),
        Command::Create { draft, admin, legacy } => create(&config, &draft, admin, legacy),
        Command::Decode { link } => decode(&link),
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Play a puzzle on the terminal board
#[instrument(skip(config))]
fn play(config: &AppConfig, link: Option<&str>) -> Result<()> {
    let params = link.map(LaunchParams::from_link_or_token).unwrap_or_default();
    if params.admin() {
        println!("This link opens the authoring view.");
        println!("Run `connections draft > draft.toml`, fill it in, then `connections create draft.toml`.");
        return Ok(());
    }

    let definition = puzzle_for_launch(&params);

    let share = if config.share_link_enabled() {
        Some(share_link(config.base_url(), &definition, false)?.to_string())
    } else {
        None
    };

    let session = PlaySession::new(definition, config.hints_enabled());
    let app = run_play(PlayApp::new(session, share))?;

    if let Some(summary) = app.summary() {
        println!("{summary}");
    }
    Ok(())
}

/// Print a blank draft
fn print_draft() -> Result<()> {
    print!("{}", DraftFile::empty().to_toml()?);
    Ok(())
}

/// Validate a draft and print its link
#[instrument(skip(config))]
fn create(config: &AppConfig, path: &Path, admin: bool, legacy: bool) -> Result<()> {
    let format = if legacy { LinkFormat::Legacy } else { LinkFormat::Compact };
    let url = DraftFile::from_file(path)?.publish(config.base_url(), format, admin)?;
    println!("{url}");
    Ok(())
}

/// Print the puzzle behind a link as a draft
#[instrument]
fn decode(link: &str) -> Result<()> {
    let definition = LaunchParams::from_link_or_token(link)
        .puzzle()
        .ok_or_else(|| anyhow!("Link does not carry a valid puzzle"))?;
    print!("{}", DraftFile::from_definition(&definition).to_toml()?);
    Ok(())
}
