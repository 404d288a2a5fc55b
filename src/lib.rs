//! Combinatorial decision trees.
//!
//! Builds explicit trees whose branches are choices (include or exclude an
//! element, pick the next one, place a queen) and whose leaves are the
//! completed objects: subsets, permutations, ordered selections and N-Queens
//! boards.
//!
//! ```
//! use combtree::domain::{build, Variant};
//!
//! let tree = build(Variant::Subsets, vec![1, 2]).unwrap();
//! assert_eq!(tree.leaves(), ["{}", "{2}", "{1}", "{1, 2}"]);
//! assert!(tree.contains("{1, 2}"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
