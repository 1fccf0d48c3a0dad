//! Config and draft files on disk.

use std::io::Write;
use strictly_connections::{LaunchParams, ValidationError};
use strictly_connections_cli::{AppConfig, DraftError, DraftFile, LinkFormat, default_puzzle};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_from_file() {
    let file = write_temp("base_url = \"https://puzzles.example/\"\nshare_link = false\n");
    let config = AppConfig::from_file(file.path()).unwrap();

    assert_eq!(config.base_url(), "https://puzzles.example/");
    assert!(!config.share_link_enabled());
    assert!(config.hints_enabled());
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(dir.path().join("absent.toml")).unwrap();
    let expected = AppConfig::default()
        .with_base_url_override(std::env::var(strictly_connections_cli::BASE_URL_ENV).ok());
    assert_eq!(config, expected);
}

#[test]
fn test_malformed_config_is_an_error() {
    let file = write_temp("hints = \"sometimes\"");
    let error = AppConfig::from_file(file.path()).unwrap_err();
    assert!(error.message.starts_with("Failed to parse config"));
}

#[test]
fn test_draft_file_to_link_and_back() {
    let toml = DraftFile::from_definition(&default_puzzle()).to_toml().unwrap();
    let file = write_temp(&toml);

    let draft = DraftFile::from_file(file.path()).unwrap();
    let url = draft
        .publish("http://localhost:3000/", LinkFormat::Compact, false)
        .unwrap();
    let decoded = LaunchParams::from_url(&url).puzzle().unwrap();

    assert_eq!(DraftFile::from_definition(&decoded), draft);
}

#[test]
fn test_unfinished_draft_reports_first_rule() {
    let toml = r#"
[[groups]]
difficulty = "yellow"
connection = "TYPES OF FISH"
items = ["BASS", "FLOUNDER", "SALMON"]

[[groups]]
difficulty = "green"
connection = "FAMOUS PAINTERS"
items = ["MONET", "PICASSO", "DALI", "WARHOL"]

[[groups]]
difficulty = "blue"
connection = "PROGRAMMING LANGUAGES"
items = ["PYTHON", "JAVA", "RUST", "GO"]

[[groups]]
difficulty = "purple"
connection = "THINGS THAT FLY"
items = ["TIME", "KITE", "PILOT", "CROW"]
"#;
    let draft = DraftFile::from_file(write_temp(toml).path()).unwrap();
    let error = draft.validate().unwrap_err();

    assert_eq!(
        error,
        DraftError::Invalid(ValidationError::GroupSize {
            connection: "TYPES OF FISH".to_string()
        })
    );
    assert_eq!(error.to_string(), "Group \"TYPES OF FISH\" must have exactly 4 squares");
}

#[test]
fn test_missing_draft_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        DraftFile::from_file(dir.path().join("nope.toml")),
        Err(DraftError::Io(_))
    ));
}
