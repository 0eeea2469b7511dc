//! Integration tests for Settings config loading.
//!
//! These tests load an explicit config file from a temp directory; fields
//! the file leaves out fall back to the compiled defaults.

use std::fs;

use tempfile::TempDir;

use diomindmap::application::ApplicationError;
use diomindmap::config::Settings;

#[test]
fn given_config_file_when_load_then_overrides_specified_fields_only() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("diomindmap.toml");
    fs::write(
        &path,
        r##"
max_brightness_offset = 25
colors = ["#000000", "#808080"]

[layout]
node_width = 200
"##,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.max_brightness_offset, 25);
    assert_eq!(settings.colors, vec!["#000000", "#808080"]);
    assert_eq!(settings.layout.node_width, 200);
    assert_eq!(settings.layout.node_height, 60);
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("nope.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "max_brightness_offset = \"ten").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("broken.toml"), "{err}");
}

#[test]
fn given_empty_color_list_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "colors = []\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_written_to_file_when_load_then_equals_defaults_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("template.toml");
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(&path)).expect("template loads");

    assert_eq!(settings.layout, Settings::default().layout);
}
