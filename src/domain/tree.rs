//! The built decision tree and its read-only operations.

use std::sync::OnceLock;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{
    DecisionArena, InOrderIterator, PostOrderIterator, TreeIterator, TreeNode,
};
use crate::domain::collector::collect_leaves;
use crate::domain::entities::{Order, Universe, Variant};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::search::LeafIndex;

/// Counters gathered while building one tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    /// Leaves skipped because their label was already emitted
    pub duplicates_pruned: usize,
    /// Choice points where no candidate was admissible
    pub dead_ends: usize,
}

/// A decision tree built once from an immutable universe.
///
/// Owns its arena exclusively. The leaf sequence is derived at construction
/// and cached; the label index is built on first use.
#[derive(Debug)]
pub struct DecisionTree<T> {
    variant: Variant,
    universe: Universe<T>,
    arena: DecisionArena<T>,
    leaves: Vec<String>,
    stats: BuildStats,
    index: OnceLock<LeafIndex>,
}

impl<T> DecisionTree<T> {
    pub(crate) fn new(
        variant: Variant,
        universe: Universe<T>,
        arena: DecisionArena<T>,
        stats: BuildStats,
    ) -> Self {
        let leaves = collect_leaves(&arena);
        Self {
            variant,
            universe,
            arena,
            leaves,
            stats,
            index: OnceLock::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn universe(&self) -> &Universe<T> {
        &self.universe
    }

    pub fn arena(&self) -> &DecisionArena<T> {
        &self.arena
    }

    pub fn root(&self) -> Option<Index> {
        self.arena.root()
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Leaf labels in traversal order.
    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    pub fn count(&self) -> usize {
        self.leaves.len()
    }

    /// Closed-form leaf count for this tree's variant and universe size.
    pub fn expected_count(&self) -> Option<u128> {
        self.variant.expected_leaf_count(self.universe.len())
    }

    /// Completed objects in traversal order.
    pub fn values(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.arena.iter().filter_map(|(_, node)| node.value())
    }

    /// Tree-walk membership test, short-circuiting on the first matching leaf.
    #[instrument(level = "debug", skip(self))]
    pub fn contains(&self, label: &str) -> bool {
        self.arena.contains_label(label)
    }

    /// Label index over the cached leaf sequence, built once.
    pub fn index(&self) -> &LeafIndex {
        self.index.get_or_init(|| LeafIndex::from_leaves(&self.leaves))
    }

    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    /// Lazy traversal of all nodes.
    ///
    /// In-order is only defined for binary trees.
    pub fn walk(&self, order: Order) -> DomainResult<Walk<'_, T>> {
        match order {
            Order::Pre => Ok(Walk::Pre(self.arena.iter())),
            Order::Post => Ok(Walk::Post(self.arena.iter_postorder())),
            Order::In if self.variant.is_binary() => Ok(Walk::In(self.arena.iter_inorder())),
            Order::In => Err(DomainError::UnsupportedOrder {
                order,
                variant: self.variant,
            }),
        }
    }
}

/// A lazy walk in one of the supported orders.
pub enum Walk<'a, T> {
    Pre(TreeIterator<'a, T>),
    In(InOrderIterator<'a, T>),
    Post(PostOrderIterator<'a, T>),
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Walk::Pre(iter) => iter.next(),
            Walk::In(iter) => iter.next(),
            Walk::Post(iter) => iter.next(),
        }
    }
}
