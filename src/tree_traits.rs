//! Conversion of decision trees into printable `termtree` trees.

use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DecisionArena, DecisionTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Node text: the choice on the incoming edge, followed by the label for leaves.
pub fn node_text<T: Display>(arena: &DecisionArena<T>, idx: Index) -> String {
    let choice = arena.choice_of(idx).map(|c| c.to_string());
    let label = arena.get_node(idx).and_then(|n| n.label());
    match (choice, label) {
        (Some(choice), Some(label)) => format!("{choice}: {label}"),
        (Some(choice), None) => choice,
        (None, Some(label)) => label.to_string(),
        (None, None) => "root".to_string(),
    }
}

fn build_tree<T: Display>(arena: &DecisionArena<T>, node_idx: Index, parent_tree: &mut Tree<String>) {
    if let Some(node) = arena.get_node(node_idx) {
        for &(_, child_idx) in node.children() {
            let mut child_tree = Tree::new(node_text(arena, child_idx));
            build_tree(arena, child_idx, &mut child_tree);
            parent_tree.push(child_tree);
        }
    }
}

impl<T: Display> TreeNodeConvert for DecisionTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let title = format!("{} ({} leaves)", self.variant(), self.count());
        let mut tree = Tree::new(title);
        if let Some(root_idx) = self.root() {
            if self.arena().get_node(root_idx).is_some_and(|n| n.is_leaf()) {
                tree.push(Tree::new(node_text(self.arena(), root_idx)));
            } else {
                build_tree(self.arena(), root_idx, &mut tree);
            }
        }
        tree
    }
}
