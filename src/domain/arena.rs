//! Arena-backed decision tree storage and its lazy traversals.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// The decision recorded on the edge from a branch to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    /// Continue without the element.
    Exclude(T),
    /// Continue with the element appended (or, for insertion trees, placed).
    Include(T),
    /// Consume one candidate of a choose-next step.
    Pick(T),
    /// Insert the element at `position` of the accumulated object.
    Insert { element: T, position: usize },
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Exclude(e) => write!(f, "-{}", e),
            Choice::Include(e) => write!(f, "+{}", e),
            Choice::Pick(e) => write!(f, "{}", e),
            Choice::Insert { element, position } => write!(f, "{}@{}", element, position),
        }
    }
}

/// A choice point or a completed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionNode<T> {
    /// Children in construction order, each tagged with the decision that produced it.
    Branch { children: Vec<(Choice<T>, Index)> },
    /// Completed object and its formatted label.
    Leaf { value: Vec<T>, label: String },
}

/// Tree node in the arena.
#[derive(Debug)]
pub struct TreeNode<T> {
    pub node: DecisionNode<T>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Distance from the root (root = 0)
    pub depth: usize,
}

impl<T> TreeNode<T> {
    pub fn is_leaf(&self) -> bool {
        matches!(self.node, DecisionNode::Leaf { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match &self.node {
            DecisionNode::Leaf { label, .. } => Some(label),
            DecisionNode::Branch { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&[T]> {
        match &self.node {
            DecisionNode::Leaf { value, .. } => Some(value),
            DecisionNode::Branch { .. } => None,
        }
    }

    pub fn children(&self) -> &[(Choice<T>, Index)] {
        match &self.node {
            DecisionNode::Branch { children } => children,
            DecisionNode::Leaf { .. } => &[],
        }
    }
}

/// Arena-based decision tree.
///
/// Nodes are inserted bottom-up: children first, then the branch that
/// adopts them. The tree is never mutated once `set_root` has been called
/// by the builder.
#[derive(Debug)]
pub struct DecisionArena<T> {
    arena: Arena<TreeNode<T>>,
    root: Option<Index>,
}

impl<T> Default for DecisionArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DecisionArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip_all, fields(depth = depth))]
    pub fn insert_leaf(&mut self, value: Vec<T>, label: String, depth: usize) -> Index {
        self.arena.insert(TreeNode {
            node: DecisionNode::Leaf { value, label },
            parent: None,
            depth,
        })
    }

    /// Insert a branch and adopt `children`, which must already be in the arena.
    #[instrument(level = "trace", skip_all, fields(depth = depth, children = children.len()))]
    pub fn insert_branch(&mut self, children: Vec<(Choice<T>, Index)>, depth: usize) -> Index {
        let child_indices: Vec<Index> = children.iter().map(|(_, idx)| *idx).collect();
        let node_idx = self.arena.insert(TreeNode {
            node: DecisionNode::Branch { children },
            parent: None,
            depth,
        });

        for child_idx in child_indices {
            if let Some(child) = self.arena.get_mut(child_idx) {
                child.parent = Some(node_idx);
            }
        }

        node_idx
    }

    pub(crate) fn set_root(&mut self, root: Option<Index>) {
        self.root = root;
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of nodes stored, branches and leaves alike.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The decision that produced `idx`, looked up on its parent's edge.
    pub fn choice_of(&self, idx: Index) -> Option<&Choice<T>> {
        let parent = self.get_node(self.get_node(idx)?.parent?)?;
        parent
            .children()
            .iter()
            .find(|(_, child)| *child == idx)
            .map(|(choice, _)| choice)
    }

    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    pub fn iter_inorder(&self) -> InOrderIterator<'_, T> {
        InOrderIterator::new(self)
    }

    /// Number of levels; a root-only tree has depth 1, an empty tree 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children()
                .iter()
                .map(|&(_, child)| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Depth-first search for a leaf labelled `label`, stopping at the first hit.
    pub fn contains_label(&self, label: &str) -> bool {
        match self.root {
            Some(root) => self.search_from(root, label),
            None => false,
        }
    }

    fn search_from(&self, node_idx: Index, label: &str) -> bool {
        let Some(node) = self.get_node(node_idx) else {
            return false;
        };

        match &node.node {
            DecisionNode::Leaf { label: leaf, .. } => leaf == label,
            DecisionNode::Branch { children } => children
                .iter()
                .any(|&(_, child)| self.search_from(child, label)),
        }
    }
}

/// Pre-order traversal: node, then children left to right.
pub struct TreeIterator<'a, T> {
    arena: &'a DecisionArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(arena: &'a DecisionArena<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &(_, child) in node.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order traversal: children left to right, then the node.
pub struct PostOrderIterator<'a, T> {
    arena: &'a DecisionArena<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(arena: &'a DecisionArena<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &(_, child) in node.children().iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

/// In-order traversal: first child, the node, then the remaining children.
///
/// Only meaningful for binary trees; `DecisionTree::walk` refuses it otherwise.
pub struct InOrderIterator<'a, T> {
    arena: &'a DecisionArena<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> InOrderIterator<'a, T> {
    fn new(arena: &'a DecisionArena<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for InOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, expanded)) = self.stack.pop() {
            let Some(node) = self.arena.get_node(current_idx) else {
                continue;
            };
            let children = node.children();
            if expanded || children.is_empty() {
                return Some((current_idx, node));
            }
            for &(_, child) in children[1..].iter().rev() {
                self.stack.push((child, false));
            }
            self.stack.push((current_idx, true));
            self.stack.push((children[0].1, false));
        }
        None
    }
}
