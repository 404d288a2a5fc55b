//! Admissibility predicates for choose-next enumeration.
//!
//! Constraints compose as decorators: each wraps an inner constraint and only
//! runs its own check when the inner one admits the candidate.

/// Decides whether `candidate` may extend the partial choice sequence `placed`.
pub trait Constraint<T> {
    fn admits(&self, placed: &[T], candidate: &T) -> bool;
}

/// Admits everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconstrained;

impl<T> Constraint<T> for Unconstrained {
    fn admits(&self, _placed: &[T], _candidate: &T) -> bool {
        true
    }
}

/// Rejects a column already used by an earlier row.
#[derive(Debug, Default, Clone, Copy)]
pub struct DistinctColumns<C> {
    inner: C,
}

impl<C> DistinctColumns<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Constraint<usize>> Constraint<usize> for DistinctColumns<C> {
    fn admits(&self, placed: &[usize], candidate: &usize) -> bool {
        self.inner.admits(placed, candidate) && !placed.contains(candidate)
    }
}

/// Rejects a column attacked diagonally by a queen in an earlier row.
///
/// Row `i` holds `placed[i]`; the candidate goes to row `placed.len()`.
/// `|row - i| == |candidate - placed[i]|` covers both diagonal directions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagonalAttack<C> {
    inner: C,
}

impl<C> NoDiagonalAttack<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Constraint<usize>> Constraint<usize> for NoDiagonalAttack<C> {
    fn admits(&self, placed: &[usize], candidate: &usize) -> bool {
        if !self.inner.admits(placed, candidate) {
            return false;
        }

        let row = placed.len();
        placed
            .iter()
            .enumerate()
            .all(|(i, &column)| row.abs_diff(i) != candidate.abs_diff(column))
    }
}

/// The N-Queens safety check: column uniqueness, then the diagonal test.
pub type QueensConstraint = NoDiagonalAttack<DistinctColumns<Unconstrained>>;

pub fn queens() -> QueensConstraint {
    NoDiagonalAttack::new(DistinctColumns::new(Unconstrained))
}

/// Whether a complete placement has no two queens attacking each other.
pub fn is_valid_placement(columns: &[usize]) -> bool {
    let constraint = queens();
    (0..columns.len()).all(|row| constraint.admits(&columns[..row], &columns[row]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_admits_everything() {
        assert!(Unconstrained.admits(&[1, 1, 1], &1));
    }

    #[test]
    fn test_distinct_columns_rejects_reused_column() {
        let constraint = DistinctColumns::new(Unconstrained);
        assert!(!constraint.admits(&[0, 2], &2));
        assert!(constraint.admits(&[0, 2], &3));
    }

    #[test]
    fn test_diagonal_rejects_both_directions() {
        let constraint = queens();
        // queen at (0, 1): (1, 0) and (1, 2) are attacked
        assert!(!constraint.admits(&[1], &0));
        assert!(!constraint.admits(&[1], &2));
        assert!(constraint.admits(&[1], &3));
        // queen at (0, 0): (2, 2) is attacked two rows down
        assert!(!constraint.admits(&[0, 3], &2));
    }

    #[test]
    fn test_valid_placement() {
        assert!(is_valid_placement(&[1, 3, 0, 2]));
        assert!(!is_valid_placement(&[0, 1, 2, 3]));
        assert!(is_valid_placement(&[]));
    }
}
