//! Tests for MindMapService

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use diomindmap::application::services::{GenerateOptions, MindMapService};
use diomindmap::application::ApplicationError;
use diomindmap::config::Settings;
use diomindmap::domain::DomainError;
use diomindmap::infrastructure::di::ServiceContainer;
use diomindmap::infrastructure::traits::RealFileSystem;

fn create_outline(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write outline");
    path
}

fn service() -> MindMapService {
    MindMapService::new(Arc::new(RealFileSystem), Arc::new(Settings::default()))
}

#[test]
fn given_outline_file_when_generating_then_writes_drawio_document() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_outline(&temp, "notes.txt", "Root\n A\n  A1\n B\n");
    let output = temp.path().join("out").join("notes.drawio");

    // Act
    let stats = service()
        .generate(&input, &output, &GenerateOptions::default())
        .unwrap();

    // Assert
    let xml = std::fs::read_to_string(&output).unwrap();
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.nodes, 4);
    assert!(xml.starts_with("<mxfile"));
    assert!(xml.contains(r#"<diagram id="page-0" name="Root">"#));
    assert!(xml.contains(r#"id="node_2" value="A1""#));
    assert!(xml.contains("fillColor=#f02355"));
    assert!(xml.contains(r#"source="node_1" target="node_2""#));
}

#[test]
fn given_option_overrides_when_generating_then_they_win_over_settings() {
    let temp = TempDir::new().unwrap();
    let input = create_outline(&temp, "notes.txt", "Root\n A\n  A1\n");
    let output = temp.path().join("notes.drawio");
    let options = GenerateOptions {
        max_brightness_offset: Some(0),
        colors: Some(vec!["#123456".into()]),
    };

    service().generate(&input, &output, &options).unwrap();

    let xml = std::fs::read_to_string(&output).unwrap();
    assert_eq!(xml.matches("fillColor=#123456").count(), 2);
}

#[test]
fn given_missing_input_when_generating_then_input_not_found() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.drawio");

    let result = service().generate(
        &temp.path().join("missing.txt"),
        &output,
        &GenerateOptions::default(),
    );

    assert!(matches!(result, Err(ApplicationError::InputNotFound(_))));
    assert!(!output.exists());
}

#[test]
fn given_empty_color_override_when_generating_then_config_error() {
    let temp = TempDir::new().unwrap();
    let input = create_outline(&temp, "notes.txt", "Root\n A\n");
    let options = GenerateOptions {
        max_brightness_offset: None,
        colors: Some(vec![]),
    };

    let result = service().generate(&input, &temp.path().join("o.drawio"), &options);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_color_when_generating_then_domain_format_error_and_no_output() {
    let temp = TempDir::new().unwrap();
    let input = create_outline(&temp, "notes.txt", "Root\n A\n  A1\n");
    let output = temp.path().join("o.drawio");
    let options = GenerateOptions {
        max_brightness_offset: None,
        colors: Some(vec!["#12345".into()]),
    };

    let result = service().generate(&input, &output, &options);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidColor { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn given_empty_outline_when_rendering_then_document_has_no_pages() {
    let rendered = service()
        .render("\n  \n", &GenerateOptions::default())
        .unwrap();

    assert_eq!(rendered.stats.nodes, 0);
    assert!(!rendered.xml.contains("<diagram"));
}

#[test]
fn given_container_when_building_service_then_uses_container_settings() {
    let settings = Settings {
        colors: vec!["#abcdef".into()],
        ..Settings::default()
    };
    let container = ServiceContainer::new(settings);

    let rendered = container
        .mindmap_service()
        .render("Root\n A\n", &GenerateOptions::default())
        .unwrap();

    assert!(rendered.xml.contains("fillColor=#abcdef"));
}

#[test]
fn given_outline_file_when_reading_outline_then_returns_normalized_tree() {
    let temp = TempDir::new().unwrap();
    let input = create_outline(&temp, "notes.txt", "\tRoot\n\t\tA\n");

    let tree = service().outline(&input).unwrap();

    let levels: Vec<usize> = tree.iter().map(|(_, n)| n.data.level).collect();
    assert_eq!(levels, vec![0, 1, 2]);
}
