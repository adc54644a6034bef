//! Loading boards from JSON files.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write;

use chutes::board::presets;
use chutes::{AnalysisError, BoardConfig, ConfigError, Game};
use tempfile::NamedTempFile;

fn write_board(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_preset_from_file() {
    let json = presets::curious_george().to_json_string().unwrap();
    let file = write_board(&json);

    let config = BoardConfig::load(file.path()).unwrap();
    assert_eq!(config, presets::curious_george());

    let game = Game::new(&config).unwrap();
    assert!((game.expected_moves() - 5.0).abs() < 1e-9);
}

#[test]
fn test_load_hand_written_board() {
    let file = write_board(
        r#"{
            "name": "Back to start",
            "squares": 5,
            "die": 2,
            "jumps": { "3": 0 }
        }"#,
    );

    let config = BoardConfig::load(file.path()).unwrap();
    assert_eq!(config.jumps.get(&3), Some(&0));
    assert!((Game::new(&config).unwrap().expected_moves() - 8.0).abs() < 1e-9);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = BoardConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_file() {
    let file = write_board(r#"{"name": "Half", "squares": 10"#);
    let err = BoardConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_out_of_range_jump_in_file() {
    let file = write_board(r#"{"name": "Off", "squares": 4, "die": 3, "jumps": {"2": 7}}"#);
    let config = BoardConfig::load(file.path()).unwrap();
    let err = Game::new(&config).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Config(ConfigError::JumpOutOfRange {
            from: 2,
            to: 7,
            squares: 4
        })
    );
}
