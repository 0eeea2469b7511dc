//! Mind map generation service
//!
//! Reads an indented outline, builds the tree and writes a draw.io document.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::composer::{ComposeStats, DiagramComposer};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{OutlineTree, Palette, TreeBuilder};
use crate::infrastructure::traits::{DiagramEngine, FileSystem};
use crate::infrastructure::DrawioDiagram;

/// Per-run overrides taking precedence over the loaded settings.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub max_brightness_offset: Option<i32>,
    pub colors: Option<Vec<String>>,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    pub stats: ComposeStats,
    /// Serialized draw.io document
    pub xml: String,
}

/// Service for turning outline files into draw.io mind maps.
pub struct MindMapService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl MindMapService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Parse the outline file into a normalized tree.
    #[instrument(level = "debug", skip(self))]
    pub fn outline(&self, input: &Path) -> ApplicationResult<OutlineTree> {
        if !self.fs.exists(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        let text = self
            .fs
            .read_to_string(input)
            .with_path_context("read outline", input)?;
        let tree = TreeBuilder::build(&text);
        debug!("outline: {} nodes, depth {}", tree.len() - 1, tree.depth());
        Ok(tree)
    }

    /// Compose the tree into any diagram engine.
    pub fn compose_into(
        &self,
        tree: &OutlineTree,
        options: &GenerateOptions,
        engine: &mut dyn DiagramEngine,
    ) -> ApplicationResult<ComposeStats> {
        let palette = self.palette(options)?;
        let max_brightness_offset = options
            .max_brightness_offset
            .unwrap_or(self.settings.max_brightness_offset);

        let composer = DiagramComposer::new(&palette, max_brightness_offset);
        Ok(composer.compose(tree, tree.root(), engine)?)
    }

    /// Build the draw.io document for an outline text.
    pub fn render(&self, text: &str, options: &GenerateOptions) -> ApplicationResult<GenerateOutput> {
        let tree = TreeBuilder::build(text);
        let mut diagram = DrawioDiagram::new(self.settings.layout.clone());
        let stats = self.compose_into(&tree, options, &mut diagram)?;
        Ok(GenerateOutput {
            stats,
            xml: diagram.dump_xml(),
        })
    }

    /// Read `input`, generate the mind map and write it to `output`.
    #[instrument(level = "debug", skip(self, options))]
    pub fn generate(
        &self,
        input: &Path,
        output: &Path,
        options: &GenerateOptions,
    ) -> ApplicationResult<ComposeStats> {
        let tree = self.outline(input)?;
        let mut diagram = DrawioDiagram::new(self.settings.layout.clone());
        let stats = self.compose_into(&tree, options, &mut diagram)?;

        self.fs
            .ensure_parent(output)
            .with_path_context("create output directory", output)?;
        self.fs
            .write(output, &diagram.dump_xml())
            .with_path_context("write diagram", output)?;

        info!(
            "generated {} pages, {} nodes -> {}",
            stats.pages,
            stats.nodes,
            output.display()
        );
        Ok(stats)
    }

    fn palette(&self, options: &GenerateOptions) -> ApplicationResult<Palette> {
        let colors = options
            .colors
            .clone()
            .unwrap_or_else(|| self.settings.colors.clone());
        Palette::new(colors).ok_or_else(|| ApplicationError::Config {
            message: "color palette must contain at least one color".to_string(),
        })
    }
}
