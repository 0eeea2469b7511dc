//! Diagram composer: walks the outline and emits draw.io directives.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::style::DEFAULT_VALUE;
use crate::domain::{
    adjust_brightness, brightness_offset, DomainError, NodeStyle, OutlineTree, Palette, TreeNode,
};
use crate::infrastructure::traits::DiagramEngine;

/// Counts of emitted directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    pub pages: usize,
    pub nodes: usize,
    pub links: usize,
}

/// Turns a normalized outline into pages, styled nodes and links.
///
/// Level 1 nodes become page roots (bold, default fill). Level 2 nodes take
/// a palette color by sibling index. Deeper nodes are their parent's fill
/// shifted by a brightness offset that grows with the level.
#[derive(Debug, Clone)]
pub struct DiagramComposer<'a> {
    palette: &'a Palette,
    max_brightness_offset: i32,
}

impl<'a> DiagramComposer<'a> {
    pub fn new(palette: &'a Palette, max_brightness_offset: i32) -> Self {
        Self {
            palette,
            max_brightness_offset,
        }
    }

    /// Emit the whole tree below `start` and run the engine's layout.
    ///
    /// `start` must be the tree root; nothing is emitted otherwise.
    #[instrument(level = "debug", skip(self, tree, engine))]
    pub fn compose(
        &self,
        tree: &OutlineTree,
        start: Index,
        engine: &mut dyn DiagramEngine,
    ) -> Result<ComposeStats, DomainError> {
        let root = tree.get_node(start).ok_or_else(|| DomainError::NotRoot {
            id: format!("{start:?}"),
        })?;
        if !root.data.is_root {
            return Err(DomainError::NotRoot {
                id: root.data.id.clone(),
            });
        }

        let mut stats = ComposeStats::default();
        let mut page_depth = 0;

        // pre-order: a parent's fill is recorded before its children read it
        for (idx, node) in tree.iter_from(start).filter(|(_, n)| !n.data.is_root) {
            if node.data.level == 1 {
                page_depth = tree.depth_of(idx);
                debug!("page {:?}: depth {}", node.data.text, page_depth);
                engine.add_diagram(&node.data.text);
                stats.pages += 1;
            }

            let style = self.style_for(tree, node, page_depth)?;
            trace!("node {}: {}", node.data.id, style);
            engine.add_node(&node.data.id, &node.data.text, &style.to_string());
            stats.nodes += 1;

            if node.data.level > 1 {
                if let Some(parent) = node.parent.and_then(|p| tree.get_node(p)) {
                    engine.add_link(&parent.data.id, &node.data.id);
                    stats.links += 1;
                }
            }
        }

        engine.layout();
        debug!(?stats, "composed diagram");
        Ok(stats)
    }

    fn style_for(
        &self,
        tree: &OutlineTree,
        node: &TreeNode,
        page_depth: usize,
    ) -> Result<NodeStyle, DomainError> {
        let mut style = NodeStyle::base();
        match node.data.level {
            0 | 1 => {
                style.set_bold();
            }
            2 => {
                let color = self.palette.pick(node.data.sibling_index);
                let recorded = node.data.style.record_fill_color(color);
                debug_assert!(recorded, "fill of {} written twice", node.data.id);
                style.set_fill_color(color);
            }
            level => {
                let parent_fill = node
                    .parent
                    .and_then(|p| tree.get_node(p))
                    .and_then(|p| p.data.style.fill_color())
                    .unwrap_or(DEFAULT_VALUE);
                let offset = brightness_offset(self.max_brightness_offset, page_depth, level);
                let color = adjust_brightness(parent_fill, offset)?;
                let recorded = node.data.style.record_fill_color(color.as_str());
                debug_assert!(recorded, "fill of {} written twice", node.data.id);
                style.set_fill_color(color);
            }
        }
        Ok(style)
    }
}
