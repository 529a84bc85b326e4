use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::DomainError;

/// Identifier read from the tree file. The root is always 0, every data line
/// gets the next sequential id.
pub type NodeId = usize;

/// Id of the root node.
pub const ROOT_ID: NodeId = 0;

/// Child slot a node was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Taken on a "no" answer, filled first.
    Left,
    /// Taken on a "yes" answer.
    Right,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Left => write!(f, "left"),
            Slot::Right => write!(f, "right"),
        }
    }
}

/// Reason an attach was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    ParentNotFound,
    ParentFull,
}

/// Tree node in the arena-based decision tree.
#[derive(Debug)]
pub struct TreeNode {
    /// Node id as assigned during loading
    pub id: NodeId,
    /// Question for decision nodes, answer for leaves
    pub label: String,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Child followed on "no"
    pub left: Option<Index>,
    /// Child followed on "yes"
    pub right: Option<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Children in left, right order.
    pub fn children(&self) -> impl Iterator<Item = Index> + '_ {
        self.left.into_iter().chain(self.right)
    }
}

/// Arena-based binary decision tree.
///
/// Nodes are only ever added, never removed, so arena order is insertion
/// order. The tree is read-only once loading has finished.
#[derive(Debug)]
pub struct DecisionTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node
    root: Index,
}

// Never empty: the root is inserted on construction.
#[allow(clippy::len_without_is_empty)]
impl DecisionTree {
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            id: ROOT_ID,
            label: root_label.into(),
            parent: None,
            left: None,
            right: None,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode {
        &self.arena[self.root]
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Depth-first search for the node carrying `id`, left subtree fully
    /// before the right one.
    #[instrument(level = "trace", skip(self))]
    pub fn find_node(&self, id: NodeId) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.id == id)
            .map(|(idx, _)| idx)
    }

    /// Attaches a new node under `parent_id` in the first free slot, left
    /// before right.
    #[instrument(level = "trace", skip(self, label))]
    pub fn attach(
        &mut self,
        parent_id: NodeId,
        id: NodeId,
        label: impl Into<String>,
    ) -> Result<(Index, Slot), AttachError> {
        let parent_idx = self.find_node(parent_id).ok_or(AttachError::ParentNotFound)?;
        let slot = {
            let parent = &self.arena[parent_idx];
            match (parent.left, parent.right) {
                (None, _) => Slot::Left,
                (Some(_), None) => Slot::Right,
                (Some(_), Some(_)) => return Err(AttachError::ParentFull),
            }
        };

        let node_idx = self.arena.insert(TreeNode {
            id,
            label: label.into(),
            parent: Some(parent_idx),
            left: None,
            right: None,
        });
        let parent = &mut self.arena[parent_idx];
        match slot {
            Slot::Left => parent.left = Some(node_idx),
            Slot::Right => parent.right = Some(node_idx),
        }
        Ok((node_idx, slot))
    }

    /// Pre-order iterator, left before right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                for child in node.children() {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Labels of all leaves, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label.as_str())
            .collect()
    }

    /// Serializes the tree back into the line format, in insertion order.
    ///
    /// Ids are renumbered sequentially so lines skipped during loading
    /// leave no gaps.
    #[instrument(level = "debug", skip(self))]
    pub fn to_source_lines(&self) -> Result<Vec<String>, DomainError> {
        let mut renumbered = std::collections::HashMap::with_capacity(self.len());
        let mut lines = Vec::with_capacity(self.len());

        for (position, (idx, node)) in self.arena.iter().enumerate() {
            renumbered.insert(idx, position);
            match node.parent {
                None => lines.push(node.label.clone()),
                Some(parent_idx) => {
                    let parent_id = renumbered[&parent_idx];
                    if parent_id > 9 {
                        return Err(DomainError::UnencodableParent(parent_id));
                    }
                    lines.push(format!("{},{}", parent_id, node.label));
                }
            }
        }
        Ok(lines)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a DecisionTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DecisionTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Right first so left is popped first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}
