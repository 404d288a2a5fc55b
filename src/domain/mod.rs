//! Domain layer: decision trees and the enumeration logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod collector;
pub mod constraint;
pub mod entities;
pub mod error;
pub mod search;
pub mod tree;

pub use arena::{Choice, DecisionArena, DecisionNode, TreeNode};
pub use builder::{build, build_n_queens, TreeBuilder};
pub use collector::format_label;
pub use constraint::{is_valid_placement, Constraint};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use search::{lookup, LeafIndex, SearchStrategy};
pub use tree::{BuildStats, DecisionTree, Walk};
