//! Membership queries against the enumerated leaves.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::tree::DecisionTree;

/// How `lookup` answers a membership query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Depth-first walk of the tree, stopping at the first match.
    TreeWalk,
    /// Hash lookup in an index built once from the leaf sequence.
    #[default]
    Index,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::TreeWalk => f.write_str("tree-walk"),
            SearchStrategy::Index => f.write_str("index"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree-walk" => Ok(SearchStrategy::TreeWalk),
            "index" => Ok(SearchStrategy::Index),
            other => Err(format!("unknown search strategy: {other}")),
        }
    }
}

/// Set of formatted leaf labels. Exact string equality, no normalization.
#[derive(Debug, Clone, Default)]
pub struct LeafIndex {
    labels: HashSet<String>,
}

impl LeafIndex {
    pub fn from_leaves(leaves: &[String]) -> Self {
        Self {
            labels: leaves.iter().cloned().collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Answer "is `label` one of the tree's leaves?" with the given strategy.
pub fn lookup<T>(tree: &DecisionTree<T>, label: &str, strategy: SearchStrategy) -> bool {
    match strategy {
        SearchStrategy::TreeWalk => tree.contains(label),
        SearchStrategy::Index => tree.index().contains(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_uses_exact_labels() {
        let index = LeafIndex::from_leaves(&["{A, B}".to_string(), "{}".to_string()]);
        assert!(index.contains("{A, B}"));
        assert!(!index.contains("{B, A}"));
        assert!(!index.contains("{A,B}"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_strategy_parses_and_displays() {
        assert_eq!("tree-walk".parse(), Ok(SearchStrategy::TreeWalk));
        assert_eq!(SearchStrategy::Index.to_string(), "index");
        assert_eq!(SearchStrategy::default(), SearchStrategy::Index);
    }
}
