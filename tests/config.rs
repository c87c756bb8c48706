//! Config persistence tests

use codeblock::config::EditorConfig;
use tempfile::tempdir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = EditorConfig {
        default_language: Some("rust".to_string()),
        preserve_indent_on_newline: false,
        exit_on_double_newline: false,
        gutter_start: 0,
    };

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(EditorConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = EditorConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "gutter_start: [not, a, number]\n").unwrap();

    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

#[test]
fn test_null_language_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "default_language: null\n").unwrap();

    let config = EditorConfig::load_from(&path);
    assert_eq!(config.default_language, None);
    assert_eq!(config.gutter_start, 1);
}
