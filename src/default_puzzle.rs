//! Built-in puzzle played when no link is given.

use strictly_connections::{Difficulty, GroupSpec, LaunchParams, PuzzleDefinition};
use tracing::{info, warn};

fn spec(difficulty: Difficulty, connection: &str, items: [&str; 4]) -> GroupSpec {
    GroupSpec::new(
        difficulty,
        connection.to_string(),
        items.into_iter().map(str::to_string).collect(),
    )
}

/// The puzzle shown when a link carries no usable token.
pub fn default_puzzle() -> PuzzleDefinition {
    PuzzleDefinition::from_groups([
        spec(Difficulty::Yellow, "TYPES OF FISH", ["BASS", "FLOUNDER", "SALMON", "TROUT"]),
        spec(Difficulty::Green, "FAMOUS PAINTERS", ["MONET", "PICASSO", "DALI", "WARHOL"]),
        spec(Difficulty::Blue, "PROGRAMMING LANGUAGES", ["PYTHON", "JAVA", "RUST", "GO"]),
        spec(Difficulty::Purple, "THINGS THAT FLY", ["TIME", "KITE", "PILOT", "CROW"]),
    ])
}

/// The puzzle to play for `params`.
///
/// Falls back to [`default_puzzle`] when the parameters carry no token, or a
/// token that does not decode to a valid puzzle.
pub fn puzzle_for_launch(params: &LaunchParams) -> PuzzleDefinition {
    match params.playable_puzzle() {
        Some(definition) => {
            info!("Puzzle loaded from link");
            definition
        }
        None => {
            if params.compact_token().is_some() || params.legacy_token().is_some() {
                warn!("Link carries no usable puzzle, playing the built-in one");
            }
            default_puzzle()
        }
    }
}
