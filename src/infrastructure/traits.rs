//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations and the diagram engine,
//! allowing services to be tested with mock implementations.

use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Diagram engine the composer emits directives into.
///
/// The engine owns visual layout and the serialized document format.
pub trait DiagramEngine {
    /// Register a new page; following nodes and links land on it.
    fn add_diagram(&mut self, name: &str);

    /// Add a node with a label and a draw.io style string.
    fn add_node(&mut self, id: &str, label: &str, style: &str);

    /// Add a directed link between two node ids.
    fn add_link(&mut self, source: &str, target: &str);

    /// Run the automatic tree layout over every page.
    fn layout(&mut self);

    /// Serialize the whole diagram.
    fn dump_xml(&self) -> String;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}
