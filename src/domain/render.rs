use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::{DecisionTree, TreeNode};

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

fn node_text(node: &TreeNode, edge: Option<&str>) -> String {
    let marker = if node.is_leaf() { "=>" } else { "?" };
    match edge {
        Some(edge) => format!("{}: [{}] {} {}", edge, node.id, marker, node.label),
        None => format!("[{}] {} {}", node.id, marker, node.label),
    }
}

impl TreeRender for DecisionTree {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &DecisionTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get_node(node_idx) {
                let edges = [("no", node.left), ("yes", node.right)];
                for (edge, child_idx) in edges {
                    let Some(child_idx) = child_idx else { continue };
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(node_text(child, Some(edge)));
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let mut root = Tree::new(node_text(self.root_node(), None));
        build_tree(self, self.root(), &mut root);
        root
    }
}
