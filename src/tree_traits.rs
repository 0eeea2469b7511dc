//! Text rendering of outline trees via termtree.

use generational_arena::Index;
use termtree::Tree;

use crate::domain::OutlineTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for OutlineTree {
    /// Root shown as `root`, every other node as `text [level]`.
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &OutlineTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree =
                            Tree::new(format!("{} [{}]", child.data.text, child.data.level));
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let root_idx = self.root();
        let label = self
            .get_node(root_idx)
            .map(|n| n.data.id.clone())
            .unwrap_or_default();
        let mut tree = Tree::new(label);
        build_tree(self, root_idx, &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeBuilder;

    #[test]
    fn given_outline_when_rendered_then_shows_levels() {
        let tree = TreeBuilder::build("Root\n  A\n    A1\n  B\n");

        let rendered = tree.to_tree_string().to_string();

        assert!(rendered.starts_with("root\n"));
        assert!(rendered.contains("Root [1]"));
        assert!(rendered.contains("A1 [3]"));
        assert!(rendered.contains("B [2]"));
    }
}
