use std::path::{Path, PathBuf};
use std::time::Duration;

use top_down_shooter::config::*;
use top_down_shooter::error::GameError;

fn parse(source: &str) -> Result<Config, GameError> {
    Config::parse(source, Path::new("test.ron"))
}

#[test]
fn empty_config_uses_defaults() {
    let config = parse("()").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.display.width, 160);
    assert_eq!(config.display.height, 120);
    assert_eq!(config.display.fps, 30);
    assert_eq!(config.seed, None);
    assert!(config.sheet.is_none());
}

#[test]
fn partial_config_keeps_other_defaults() {
    let config = parse(
        "(display: (width: 80, height: 48), seed: Some(7), log_file: \"play.log\")",
    )
    .unwrap();
    assert_eq!(config.display.width, 80);
    assert_eq!(config.display.height, 48);
    assert_eq!(config.display.fps, 30);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.log_file, PathBuf::from("play.log"));
    assert!(config.validate().is_ok());
}

#[test]
fn malformed_config_names_the_file() {
    let err = parse("(display: (width: -3))").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }));
    assert!(err.to_string().contains("test.ron"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let err = Config::load(Some(Path::new("no/such/config.ron"))).unwrap_err();
    assert!(matches!(err, GameError::ConfigRead { .. }));
}

#[test]
fn validate_rejects_tiny_display() {
    let mut config = Config::default();
    config.display.width = 4;
    assert!(matches!(config.validate(), Err(GameError::InvalidDisplay(_))));
}

#[test]
fn validate_rejects_height_needing_more_rows_than_a_terminal_has() {
    let mut config = Config::default();
    // 131_070 pixel rows fill exactly u16::MAX terminal rows.
    config.display.height = 131_070;
    assert!(config.validate().is_ok());
    // One more pixel row needs a half-filled extra row.
    config.display.height = 131_071;
    assert!(matches!(config.validate(), Err(GameError::InvalidDisplay(_))));
}

#[test]
fn validate_rejects_zero_fps() {
    let mut config = Config::default();
    config.display.fps = 0;
    assert!(matches!(config.validate(), Err(GameError::InvalidDisplay(_))));
}

#[test]
fn frame_duration_follows_fps() {
    let display = DisplayConfig::default();
    assert_eq!(display.frame_duration(), Duration::from_nanos(33_333_333));
}
