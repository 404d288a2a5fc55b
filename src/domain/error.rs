//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::{Order, Variant};

/// Domain errors reject invalid input before any recursion starts.
///
/// Construction itself cannot fail once inputs are validated, and a search
/// for an unknown label is a plain `false`, never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid board size: {0} (must be at least 1)")]
    InvalidBoardSize(usize),

    #[error("{0} enumerates a board, not a universe of elements")]
    BoardVariant(Variant),

    #[error("{order} traversal is not defined for {variant} trees")]
    UnsupportedOrder { order: Order, variant: Variant },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
