//! Tree builder turning indented outline lines into an `OutlineTree`.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, OutlineTree};

/// Constructs outline trees where indentation decides nesting.
///
/// Indentation is compared as a raw count of leading whitespace characters,
/// so tabs and spaces both count as one. Only relative depth matters: the
/// tree is normalized after attachment.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: OutlineTree,
    pending: Vec<Index>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and normalize the tree for a whole outline text.
    #[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
    pub fn build(text: &str) -> OutlineTree {
        let mut builder = Self::new();
        for (idx, line) in text.lines().enumerate() {
            builder.push_line(idx, line);
        }
        builder.finish()
    }

    /// Register one source line. Blank lines are skipped but still consume
    /// their index, so node ids follow source line numbers.
    pub fn push_line(&mut self, idx: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let node = self
            .tree
            .insert_detached(NodeData::from_line(format!("node_{idx}"), line));
        self.pending.push(node);
    }

    /// Attach all pending nodes under the root and normalize levels.
    pub fn finish(mut self) -> OutlineTree {
        let root = self.tree.root();
        let consumed = self.attach_children(root, 0);
        debug!(
            nodes = self.pending.len(),
            consumed, "attached outline nodes"
        );
        self.tree.normalize_levels();
        self.tree
    }

    fn raw_level(&self, idx: Index) -> Option<usize> {
        self.tree.get_node(idx).and_then(|n| n.data.raw_level)
    }

    /// Attach `pending[cursor..]` below `parent` and return the cursor
    /// position of the first node that belongs to an ancestor.
    ///
    /// The first pending node fixes the child level for this frame. Deeper
    /// nodes descend into the most recent child; nodes at or above the
    /// parent's own level end the frame.
    fn attach_children(&mut self, parent: Index, mut cursor: usize) -> usize {
        let Some(child_level) = self.pending.get(cursor).and_then(|&n| self.raw_level(n)) else {
            return cursor;
        };
        let parent_level = self.raw_level(parent);
        let mut last_child: Option<Index> = None;

        while let Some(&node) = self.pending.get(cursor) {
            let level = self.raw_level(node).unwrap_or(0);

            if level > child_level {
                if let Some(last) = last_child {
                    cursor = self.attach_children(last, cursor);
                    continue;
                }
            } else if level != child_level && parent_level.is_some_and(|p| level <= p) {
                return cursor;
            }

            // Same level, or shallower than the first sibling while still
            // deeper than the parent: both become siblings in this frame.
            trace!(parent = ?parent, node = ?node, level, child_level, "attach");
            self.tree.attach(parent, node);
            last_child = Some(node);
            cursor += 1;
        }
        cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tree: &OutlineTree, idx: Index) -> Vec<String> {
        tree.get_node(idx)
            .unwrap()
            .children
            .iter()
            .map(|&c| tree.get_node(c).unwrap().data.text.clone())
            .collect()
    }

    #[test]
    fn given_simple_outline_when_building_then_nests_by_indentation() {
        let tree = TreeBuilder::build("Root\n A\n  A1\n B\n");

        let root = tree.root();
        assert_eq!(texts(&tree, root), vec!["Root"]);
        let top = tree.get_node(root).unwrap().children[0];
        assert_eq!(texts(&tree, top), vec!["A", "B"]);
        let a = tree.get_node(top).unwrap().children[0];
        assert_eq!(texts(&tree, a), vec!["A1"]);
    }

    #[test]
    fn given_blank_lines_when_building_then_skips_them_but_keeps_line_ids() {
        let tree = TreeBuilder::build("A\n\n   \n B\n");

        let ids: Vec<_> = tree.iter().map(|(_, n)| n.data.id.clone()).collect();
        assert_eq!(ids, vec!["root", "node_0", "node_3"]);
    }

    #[test]
    fn given_empty_text_when_building_then_only_root() {
        let tree = TreeBuilder::build("");
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn given_shallower_line_than_first_sibling_when_building_then_attaches_as_sibling() {
        // child level is 4, "C" at 2 is still deeper than its parent "A" at 0
        let tree = TreeBuilder::build("A\n    B\n  C\n");

        let a = tree.get_node(tree.root()).unwrap().children[0];
        assert_eq!(texts(&tree, a), vec!["B", "C"]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_first_line_indented_when_building_then_later_shallower_line_stays_top_level() {
        let tree = TreeBuilder::build("    A\nB\n");
        assert_eq!(texts(&tree, tree.root()), vec!["A", "B"]);
    }
}
