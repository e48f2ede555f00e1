use super::Config;
use crate::error::ConfigError;
use crate::viewport::Alignment;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.band().top_percent, 20);
    assert_eq!(config.band().bottom_percent, 35);
}

#[test]
fn test_partial_file_overrides_named_fields() {
    let config = Config::parse("wrap_width = 72\nsmooth_scroll = false\n").unwrap();
    assert_eq!(config.wrap_width, 72);
    assert!(!config.smooth_scroll);
    assert_eq!(config.toc_width, 36);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("guidepost.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guidepost.toml");
    fs::write(&path, "wrap_width = \"wide\"\n").unwrap();
    assert!(matches!(
        Config::load(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_named_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("custom.toml");
    assert!(matches!(
        Config::load_required(&missing),
        Err(ConfigError::Io(_))
    ));

    fs::write(&missing, "toc_width = 40\n").unwrap();
    assert_eq!(Config::load_required(&missing).unwrap().toc_width, 40);
}

#[test]
fn test_scroll_alignment_names() {
    assert_eq!(Config::default().alignment(), Alignment::Start);
    let centred = Config::parse("scroll_align = \"Center\"\n").unwrap();
    assert_eq!(centred.alignment(), Alignment::Center);
    let end = Config::parse("scroll_align = \"end\"\n").unwrap();
    assert_eq!(end.alignment(), Alignment::End);
    let unknown = Config::parse("scroll_align = \"middle\"\n").unwrap();
    assert_eq!(unknown.alignment(), Alignment::Start);
}
