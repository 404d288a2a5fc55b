//! Enumerator: recursive, bottom-up construction of decision trees.
//!
//! Leaf count grows as 2^n, n! or worse with the universe size. Nothing here
//! caps the input; check `Variant::expected_leaf_count` before building.

use std::collections::HashSet;
use std::fmt::Display;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Choice, DecisionArena};
use crate::domain::collector::format_label;
use crate::domain::constraint::{queens, Constraint, Unconstrained};
use crate::domain::entities::{Bracket, Universe, Variant};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{BuildStats, DecisionTree};

/// What happens to a candidate after it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidates {
    /// Removed from the pool (permutations)
    Consume,
    /// Stays available; the constraint decides (N-Queens)
    Reuse,
}

/// Fixed parameters of one choose-next expansion.
struct ChooseNext<'a, T, C> {
    pool: &'a [T],
    goal: usize,
    policy: Candidates,
    constraint: &'a C,
}

/// Builds decision trees over a universe.
///
/// Per-build state (arena, seen labels, statistics) is reset on every call,
/// so one builder can be reused without trees influencing each other.
pub struct TreeBuilder<T> {
    arena: DecisionArena<T>,
    seen_labels: HashSet<String>,
    stats: BuildStats,
    bracket: Bracket,
    dedup: bool,
}

impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuilder<T> {
    pub fn new() -> Self {
        Self {
            arena: DecisionArena::new(),
            seen_labels: HashSet::new(),
            stats: BuildStats::default(),
            bracket: Bracket::Brace,
            dedup: false,
        }
    }

    fn reset(&mut self, variant: Variant) {
        self.arena = DecisionArena::new();
        self.seen_labels.clear();
        self.stats = BuildStats::default();
        self.bracket = variant.bracket();
        self.dedup = variant.suppresses_duplicates();
    }

    fn branch(&mut self, children: Vec<(Choice<T>, Index)>, depth: usize) -> Option<Index> {
        if children.is_empty() {
            return None;
        }
        Some(self.arena.insert_branch(children, depth))
    }

    fn finish(
        &mut self,
        variant: Variant,
        universe: Universe<T>,
        root: Option<Index>,
    ) -> DecisionTree<T> {
        let mut arena = std::mem::take(&mut self.arena);
        arena.set_root(root);
        let stats = std::mem::take(&mut self.stats);
        self.seen_labels.clear();

        let tree = DecisionTree::new(variant, universe, arena, stats);
        debug!(
            variant = %variant,
            nodes = tree.node_count(),
            leaves = tree.count(),
            duplicates_pruned = stats.duplicates_pruned,
            dead_ends = stats.dead_ends,
            "built decision tree"
        );
        tree
    }
}

impl<T: Clone + Display> TreeBuilder<T> {
    /// Build the complete tree of `variant` over `universe`.
    ///
    /// N-Queens is sized by a board, not a universe: use `build_n_queens`.
    #[instrument(level = "debug", skip_all, fields(variant = %variant, size = universe.len()))]
    pub fn build(&mut self, variant: Variant, universe: Universe<T>) -> DomainResult<DecisionTree<T>> {
        self.reset(variant);
        let root = match variant {
            Variant::Subsets => self.include_exclude(universe.elements(), &[], 0),
            Variant::Permutations | Variant::ColorPermutations => {
                let positions: Vec<usize> = (0..universe.len()).collect();
                let step = ChooseNext {
                    pool: universe.elements(),
                    goal: universe.len(),
                    policy: Candidates::Consume,
                    constraint: &Unconstrained,
                };
                self.choose_next(&step, &positions, &[], 0)
            }
            Variant::SubsetPermutations => self.insertions(universe.elements(), &[], 0),
            Variant::NQueens => return Err(DomainError::BoardVariant(variant)),
        };
        Ok(self.finish(variant, universe, root))
    }

    fn leaf(&mut self, value: Vec<T>, depth: usize) -> Option<Index> {
        let label = format_label(&value, self.bracket);
        if self.dedup && !self.seen_labels.insert(label.clone()) {
            self.stats.duplicates_pruned += 1;
            return None;
        }
        Some(self.arena.insert_leaf(value, label, depth))
    }

    /// Exclude the next element, then include it. Complete binary tree.
    fn include_exclude(&mut self, remaining: &[T], acc: &[T], depth: usize) -> Option<Index> {
        let Some((element, rest)) = remaining.split_first() else {
            return self.leaf(acc.to_vec(), depth);
        };

        let mut children = Vec::with_capacity(2);
        if let Some(excluded) = self.include_exclude(rest, acc, depth + 1) {
            children.push((Choice::Exclude(element.clone()), excluded));
        }

        let mut next = acc.to_vec();
        next.push(element.clone());
        if let Some(included) = self.include_exclude(rest, &next, depth + 1) {
            children.push((Choice::Include(element.clone()), included));
        }

        self.branch(children, depth)
    }

    /// One child per admissible candidate still in `remaining` (pool positions).
    fn choose_next<C: Constraint<T>>(
        &mut self,
        step: &ChooseNext<'_, T, C>,
        remaining: &[usize],
        acc: &[T],
        depth: usize,
    ) -> Option<Index> {
        if acc.len() == step.goal {
            return self.leaf(acc.to_vec(), depth);
        }

        let mut children = Vec::new();
        for (slot, &position) in remaining.iter().enumerate() {
            let candidate = &step.pool[position];
            if !step.constraint.admits(acc, candidate) {
                continue;
            }

            let consumed: Vec<usize>;
            let rest = match step.policy {
                Candidates::Reuse => remaining,
                Candidates::Consume => {
                    consumed = remaining
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != slot)
                        .map(|(_, &p)| p)
                        .collect();
                    &consumed
                }
            };

            let mut next = acc.to_vec();
            next.push(candidate.clone());
            if let Some(child) = self.choose_next(step, rest, &next, depth + 1) {
                children.push((Choice::Pick(candidate.clone()), child));
            }
        }

        if children.is_empty() {
            self.stats.dead_ends += 1;
        }
        self.branch(children, depth)
    }

    /// Exclude the next element, or include it at every position of `acc`.
    ///
    /// The include child is a branch of its own, one child per insertion
    /// position `0..=acc.len()`. Leaves whose label was already emitted in
    /// this build are never created; branches left without children vanish.
    fn insertions(&mut self, remaining: &[T], acc: &[T], depth: usize) -> Option<Index> {
        let Some((element, rest)) = remaining.split_first() else {
            return self.leaf(acc.to_vec(), depth);
        };

        let mut children = Vec::with_capacity(2);
        if let Some(excluded) = self.insertions(rest, acc, depth + 1) {
            children.push((Choice::Exclude(element.clone()), excluded));
        }

        let mut placements = Vec::with_capacity(acc.len() + 1);
        for position in 0..=acc.len() {
            let mut next = acc.to_vec();
            next.insert(position, element.clone());
            if let Some(child) = self.insertions(rest, &next, depth + 2) {
                placements.push((
                    Choice::Insert {
                        element: element.clone(),
                        position,
                    },
                    child,
                ));
            }
        }
        if let Some(included) = self.branch(placements, depth + 1) {
            children.push((Choice::Include(element.clone()), included));
        }

        self.branch(children, depth)
    }
}

impl TreeBuilder<usize> {
    /// All placements of `board_size` non-attacking queens, one per row.
    ///
    /// Rows without an admissible column are pruned, so boards without a
    /// solution (2 and 3) give a tree without root.
    #[instrument(level = "debug", skip(self))]
    pub fn build_n_queens(&mut self, board_size: usize) -> DomainResult<DecisionTree<usize>> {
        if board_size == 0 {
            return Err(DomainError::InvalidBoardSize(board_size));
        }

        self.reset(Variant::NQueens);
        let universe = Universe::columns(board_size);
        let constraint = queens();
        let step = ChooseNext {
            pool: universe.elements(),
            goal: board_size,
            policy: Candidates::Reuse,
            constraint: &constraint,
        };
        let columns: Vec<usize> = (0..board_size).collect();
        let root = self.choose_next(&step, &columns, &[], 0);
        Ok(self.finish(Variant::NQueens, universe, root))
    }
}

/// Build `variant` over `universe` with a fresh builder.
pub fn build<T: Clone + Display>(
    variant: Variant,
    universe: impl Into<Universe<T>>,
) -> DomainResult<DecisionTree<T>> {
    TreeBuilder::new().build(variant, universe.into())
}

/// Build the N-Queens tree for `board_size` with a fresh builder.
pub fn build_n_queens(board_size: usize) -> DomainResult<DecisionTree<usize>> {
    TreeBuilder::new().build_n_queens(board_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_universe_yields_single_empty_leaf() {
        for variant in [Variant::Subsets, Variant::Permutations, Variant::SubsetPermutations] {
            let tree = build::<i32>(variant, vec![]).unwrap();
            assert_eq!(tree.count(), 1, "{variant}");
            assert_eq!(tree.node_count(), 1, "{variant}");
            assert_eq!(tree.depth(), 1, "{variant}");
        }
        let tree = build::<i32>(Variant::Subsets, vec![]).unwrap();
        assert_eq!(tree.leaves(), ["{}"]);
    }

    #[test]
    fn test_subsets_exclude_before_include() {
        let tree = build(Variant::Subsets, vec![1, 2]).unwrap();
        assert_eq!(tree.leaves(), ["{}", "{2}", "{1}", "{1, 2}"]);
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_permutations_follow_universe_order() {
        let tree = build(Variant::Permutations, vec!['a', 'b', 'c']).unwrap();
        assert_eq!(
            tree.leaves(),
            ["[a, b, c]", "[a, c, b]", "[b, a, c]", "[b, c, a]", "[c, a, b]", "[c, b, a]"]
        );
    }

    #[test]
    fn test_subset_permutations_construction_order() {
        let tree = build(Variant::SubsetPermutations, vec!["A", "B"]).unwrap();
        assert_eq!(tree.leaves(), ["{}", "{B}", "{A}", "{B, A}", "{A, B}"]);
        assert_eq!(tree.stats().duplicates_pruned, 0);
    }

    #[test]
    fn test_subset_permutations_prune_repeated_labels() {
        let tree = build(Variant::SubsetPermutations, vec!["A", "A"]).unwrap();
        assert_eq!(tree.leaves(), ["{}", "{A}", "{A, A}"]);
        assert_eq!(tree.stats().duplicates_pruned, 2);
        // no branch survives without children
        assert!(tree
            .arena()
            .iter()
            .all(|(_, node)| node.is_leaf() || !node.children().is_empty()));
    }

    #[test]
    fn test_duplicates_kept_as_distinct_positions() {
        let tree = build(Variant::Permutations, vec![1, 1]).unwrap();
        assert_eq!(tree.leaves(), ["[1, 1]", "[1, 1]"]);
    }

    #[test]
    fn test_n_queens_four() {
        let tree = build_n_queens(4).unwrap();
        assert_eq!(tree.leaves(), ["[1, 3, 0, 2]", "[2, 0, 3, 1]"]);
        assert!(tree.stats().dead_ends > 0);
    }

    #[test]
    fn test_n_queens_without_solution_has_no_root() {
        let tree = build_n_queens(3).unwrap();
        assert!(tree.root().is_none());
        assert_eq!(tree.count(), 0);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_n_queens_rejects_empty_board() {
        assert_eq!(build_n_queens(0).unwrap_err(), DomainError::InvalidBoardSize(0));
    }

    #[test]
    fn test_generic_build_refuses_board_variant() {
        let result = build(Variant::NQueens, vec![0usize, 1]);
        assert_eq!(result.unwrap_err(), DomainError::BoardVariant(Variant::NQueens));
    }

    #[test]
    fn test_builder_reuse_does_not_leak_seen_labels() {
        let mut builder = TreeBuilder::new();
        let first = builder
            .build(Variant::SubsetPermutations, Universe::new(vec!["A", "B"]))
            .unwrap();
        let second = builder
            .build(Variant::SubsetPermutations, Universe::new(vec!["A", "B"]))
            .unwrap();
        assert_eq!(first.leaves(), second.leaves());
    }
}
