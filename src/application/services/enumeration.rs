//! Enumeration service
//!
//! Guards tree construction against oversized inputs and answers
//! membership queries with the configured search strategy.

use std::fmt::Display;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{lookup, DecisionTree, SearchStrategy, TreeBuilder, Universe, Variant};

/// Result of a membership query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub label: String,
    pub found: bool,
    pub strategy: SearchStrategy,
    /// Number of leaves the query was answered against
    pub leaves: usize,
}

/// Builds decision trees within the configured size limit.
#[derive(Debug, Clone)]
pub struct EnumerationService {
    max_leaves: u64,
    search: SearchStrategy,
}

impl EnumerationService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            max_leaves: settings.max_leaves,
            search: settings.search,
        }
    }

    /// Refuse a build whose closed-form leaf count exceeds `max_leaves`.
    ///
    /// An unknown or overflowing count is refused as well. Returns the
    /// expected count otherwise.
    pub fn check_size(&self, variant: Variant, size: usize) -> ApplicationResult<u128> {
        let expected = variant.expected_leaf_count(size);
        match expected {
            Some(count) if count <= u128::from(self.max_leaves) => Ok(count),
            _ => Err(ApplicationError::TooLarge {
                variant,
                size,
                expected,
                limit: self.max_leaves,
            }),
        }
    }

    /// Build `variant` over `elements` after the size check.
    #[instrument(level = "debug", skip(self, elements), fields(size = elements.len()))]
    pub fn enumerate<T: Clone + Display>(
        &self,
        variant: Variant,
        elements: Vec<T>,
    ) -> ApplicationResult<DecisionTree<T>> {
        let expected = self.check_size(variant, elements.len())?;
        debug!(expected = %expected, "size check passed");

        let tree = TreeBuilder::new().build(variant, Universe::new(elements))?;
        info!(variant = %variant, leaves = tree.count(), "enumerated");
        Ok(tree)
    }

    /// Build the N-Queens tree after the size check.
    #[instrument(level = "debug", skip(self))]
    pub fn queens(&self, board_size: usize) -> ApplicationResult<DecisionTree<usize>> {
        let expected = self.check_size(Variant::NQueens, board_size)?;
        debug!(expected = %expected, "size check passed");

        let tree = TreeBuilder::new().build_n_queens(board_size)?;
        info!(board_size, solutions = tree.count(), "placed queens");
        Ok(tree)
    }

    /// Whether `label` is a leaf of the tree over `elements`.
    #[instrument(level = "debug", skip(self, elements))]
    pub fn search(
        &self,
        variant: Variant,
        label: &str,
        elements: Vec<String>,
    ) -> ApplicationResult<SearchOutcome> {
        let tree = self.enumerate(variant, elements)?;
        Ok(self.answer(&tree, label))
    }

    /// Whether `label` is a solution of the N-Queens board of `board_size`.
    #[instrument(level = "debug", skip(self))]
    pub fn search_queens(&self, label: &str, board_size: usize) -> ApplicationResult<SearchOutcome> {
        let tree = self.queens(board_size)?;
        Ok(self.answer(&tree, label))
    }

    fn answer<T>(&self, tree: &DecisionTree<T>, label: &str) -> SearchOutcome {
        let found = lookup(tree, label, self.search);
        debug!(found, strategy = %self.search, "lookup");
        SearchOutcome {
            label: label.to_string(),
            found,
            strategy: self.search,
            leaves: tree.count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(max_leaves: u64) -> EnumerationService {
        EnumerationService::new(&Settings {
            max_leaves,
            ..Settings::default()
        })
    }

    #[test]
    fn given_limit_when_checking_size_then_boundary_is_inclusive() {
        let service = service(16);
        assert_eq!(service.check_size(Variant::Subsets, 4).unwrap(), 16);
        assert!(matches!(
            service.check_size(Variant::Subsets, 5),
            Err(ApplicationError::TooLarge { expected: Some(32), limit: 16, .. })
        ));
    }

    #[test]
    fn given_untabulated_board_when_checking_size_then_refuses() {
        let service = service(u64::MAX);
        assert!(matches!(
            service.check_size(Variant::NQueens, 25),
            Err(ApplicationError::TooLarge { expected: None, .. })
        ));
    }

    #[test]
    fn given_zero_board_when_placing_queens_then_domain_error() {
        let result = service(1000).queens(0);
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }
}
