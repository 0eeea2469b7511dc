use generational_arena::{Arena, Index};
use std::cell::OnceCell;
use std::fmt;
use tracing::instrument;

/// Identifier reserved for the synthetic root node.
pub const ROOT_ID: &str = "root";

/// Derived rendering attributes of a node.
///
/// Written at most once by the composer while visiting the node, and read
/// by the node's direct children afterwards.
#[derive(Debug, Default)]
pub struct StyleData {
    fill_color: OnceCell<String>,
}

impl StyleData {
    /// Resolved fill color, `None` while unset (or for page roots).
    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.get().map(String::as_str)
    }

    /// Record the resolved fill color. A second write is ignored and
    /// reported as `false`.
    #[must_use]
    pub fn record_fill_color(&self, color: impl Into<String>) -> bool {
        self.fill_color.set(color.into()).is_ok()
    }
}

/// Data payload for outline nodes.
#[derive(Debug)]
pub struct NodeData {
    /// Unique identifier used in link directives
    pub id: String,
    /// Trimmed content of the source line
    pub text: String,
    /// Leading whitespace character count; `None` for the root
    pub raw_level: Option<usize>,
    /// Tree depth after normalization (root = 0)
    pub level: usize,
    /// Zero-based position among siblings, assigned on attachment
    pub sibling_index: usize,
    /// Exactly one node per tree has this set
    pub is_root: bool,
    pub style: StyleData,
}

impl NodeData {
    /// Node for one indented source line.
    pub fn from_line(id: impl Into<String>, line: &str) -> Self {
        let trimmed = line.trim_start();
        let raw_level = line.chars().count() - trimmed.chars().count();
        Self {
            id: id.into(),
            text: line.trim().to_string(),
            raw_level: Some(raw_level),
            level: raw_level,
            sibling_index: 0,
            is_root: false,
            style: StyleData::default(),
        }
    }

    pub fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            text: ROOT_ID.to_string(),
            raw_level: None,
            level: 0,
            sibling_index: 0,
            is_root: true,
            style: StyleData::default(),
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Tree node in the arena-based outline.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in source order
    pub children: Vec<Index>,
}

/// Arena-based outline tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Nodes are never removed individually; the whole tree is dropped at once.
#[derive(Debug)]
pub struct OutlineTree {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for OutlineTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineTree {
    /// Tree holding only the synthetic root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData::root(),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Store a node that is not attached to any parent yet.
    #[instrument(level = "trace", skip(self, data), fields(id = %data.id))]
    pub fn insert_detached(&mut self, data: NodeData) -> Index {
        self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Append `child` to `parent`, recording its sibling index.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index) {
        let Some(sibling_index) = self.arena.get(parent).map(|p| p.children.len()) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
            node.data.sibling_index = sibling_index;
        }
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(child);
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.arena.get(self.root).map_or(true, |r| r.children.is_empty())
    }

    /// Depth-first pre-order walk starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Depth-first pre-order walk of the subtree at `start`.
    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, start)
    }

    /// Longest chain from `node_idx` down to a leaf, counting a leaf as 1.
    #[instrument(level = "trace", skip(self))]
    pub fn depth_of(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.depth_of(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    /// Reassign levels so the root is 0 and every child is parent + 1.
    #[instrument(level = "debug", skip(self))]
    pub fn normalize_levels(&mut self) {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((idx, level)) = stack.pop() {
            if let Some(node) = self.arena.get_mut(idx) {
                node.data.level = level;
                for &child in node.children.iter().rev() {
                    stack.push((child, level + 1));
                }
            }
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a OutlineTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a OutlineTree, start: Index) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Debug rendering: `parent -> (text) -> N children`.
pub struct NodeSummary<'a> {
    tree: &'a OutlineTree,
    idx: Index,
}

impl OutlineTree {
    pub fn summary(&self, idx: Index) -> NodeSummary<'_> {
        NodeSummary { tree: self, idx }
    }
}

impl fmt::Display for NodeSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.tree.get_node(self.idx) else {
            return write!(f, "<detached>");
        };
        if let Some(parent) = node.parent.and_then(|p| self.tree.get_node(p)) {
            write!(f, "{} -> ", parent.data.text)?;
        }
        write!(f, "({}) -> {} children", node.data.text, node.children.len())
    }
}
