//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, Variant};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error(
        "{variant} of size {size} would produce {} leaves, limit is {limit}",
        .expected.map_or_else(|| "too many".to_string(), |n| n.to_string())
    )]
    TooLarge {
        variant: Variant,
        size: usize,
        /// Closed-form leaf count, None when it overflows
        expected: Option<u128>,
        limit: u64,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_overflowing_count_when_displayed_then_says_too_many() {
        let err = ApplicationError::TooLarge {
            variant: Variant::Permutations,
            size: 50,
            expected: None,
            limit: 1000,
        };
        assert_eq!(
            err.to_string(),
            "permutations of size 50 would produce too many leaves, limit is 1000"
        );
    }
}
