//! Domain entities: universes, variants and the small enums shared by all shapes

use std::fmt;
use std::str::FromStr;

/// Ordered, immutable input collection.
///
/// Order is significant: it fixes traversal order and tie-breaking.
/// Duplicates are kept as distinct positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe<T> {
    elements: Vec<T>,
}

impl<T> Universe<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Universe<usize> {
    /// Column indices `0..board_size` of an N-Queens board.
    pub fn columns(board_size: usize) -> Self {
        Self::new((0..board_size).collect())
    }
}

impl<T> From<Vec<T>> for Universe<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

/// Bracket style of a formatted leaf label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `{1, 2}`
    Brace,
    /// `[1, 2]`
    Square,
}

impl Bracket {
    pub fn open(self) -> char {
        match self {
            Bracket::Brace => '{',
            Bracket::Square => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Brace => '}',
            Bracket::Square => ']',
        }
    }
}

/// How a variant branches at each recursion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Two children per branch: exclude, then include.
    IncludeExclude,
    /// One child per remaining admissible candidate.
    ChooseNext,
    /// Exclude, or include at one of the insertion positions.
    InsertPosition,
}

/// Solution counts for N-Queens boards of size 0..=18.
const QUEENS_SOLUTIONS: [u128; 19] = [
    1, 1, 0, 0, 2, 10, 4, 40, 92, 352, 724, 2680, 14200, 73712, 365596, 2279184, 14772512,
    95815104, 666090624,
];

/// The combinatorial variants the enumerator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Subsets,
    Permutations,
    ColorPermutations,
    SubsetPermutations,
    NQueens,
}

impl Variant {
    pub fn shape(self) -> Shape {
        match self {
            Variant::Subsets => Shape::IncludeExclude,
            Variant::Permutations | Variant::ColorPermutations | Variant::NQueens => {
                Shape::ChooseNext
            }
            Variant::SubsetPermutations => Shape::InsertPosition,
        }
    }

    pub fn bracket(self) -> Bracket {
        match self {
            Variant::Subsets | Variant::SubsetPermutations => Bracket::Brace,
            Variant::Permutations | Variant::ColorPermutations | Variant::NQueens => {
                Bracket::Square
            }
        }
    }

    /// Whether every branch of this variant's trees has exactly two children.
    pub fn is_binary(self) -> bool {
        self.shape() == Shape::IncludeExclude
    }

    /// Whether leaves with equal labels are pruned during construction.
    pub fn suppresses_duplicates(self) -> bool {
        self == Variant::SubsetPermutations
    }

    /// Closed-form leaf count for a universe (or board) of size `n`.
    ///
    /// Returns `None` when the count overflows `u128` or, for N-Queens, is
    /// not tabulated. For subset-permutations over a universe with repeated
    /// elements this is an upper bound.
    pub fn expected_leaf_count(self, n: usize) -> Option<u128> {
        match self {
            Variant::Subsets => 2u128.checked_pow(u32::try_from(n).ok()?),
            Variant::Permutations | Variant::ColorPermutations => factorial(n),
            Variant::SubsetPermutations => {
                // sum of falling factorials n!/(n-k)! for k = 0..=n
                let mut term: u128 = 1;
                let mut total: u128 = 1;
                for k in 1..=n {
                    term = term.checked_mul((n - k + 1) as u128)?;
                    total = total.checked_add(term)?;
                }
                Some(total)
            }
            Variant::NQueens => QUEENS_SOLUTIONS.get(n).copied(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Subsets => "subsets",
            Variant::Permutations => "permutations",
            Variant::ColorPermutations => "color-permutations",
            Variant::SubsetPermutations => "subset-permutations",
            Variant::NQueens => "n-queens",
        }
    }
}

fn factorial(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subsets" => Ok(Variant::Subsets),
            "permutations" => Ok(Variant::Permutations),
            "color-permutations" | "colors" => Ok(Variant::ColorPermutations),
            "subset-permutations" => Ok(Variant::SubsetPermutations),
            "n-queens" | "queens" => Ok(Variant::NQueens),
            other => Err(format!("unknown variant: {other}")),
        }
    }
}

/// Traversal order for `walk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Pre,
    In,
    Post,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Pre => "pre-order",
            Order::In => "in-order",
            Order::Post => "post-order",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_leaf_count_closed_forms() {
        assert_eq!(Variant::Subsets.expected_leaf_count(4), Some(16));
        assert_eq!(Variant::Permutations.expected_leaf_count(0), Some(1));
        assert_eq!(Variant::Permutations.expected_leaf_count(5), Some(120));
        // 1 + 3 + 6 + 6
        assert_eq!(Variant::SubsetPermutations.expected_leaf_count(3), Some(16));
        assert_eq!(Variant::SubsetPermutations.expected_leaf_count(2), Some(5));
        assert_eq!(Variant::NQueens.expected_leaf_count(8), Some(92));
        assert_eq!(Variant::NQueens.expected_leaf_count(30), None);
    }

    #[test]
    fn test_expected_leaf_count_overflow_is_none() {
        assert_eq!(Variant::Subsets.expected_leaf_count(128), None);
        assert_eq!(Variant::Permutations.expected_leaf_count(40), None);
    }

    #[test]
    fn test_variant_round_trips_through_name() {
        for variant in [
            Variant::Subsets,
            Variant::Permutations,
            Variant::ColorPermutations,
            Variant::SubsetPermutations,
            Variant::NQueens,
        ] {
            assert_eq!(variant.name().parse::<Variant>(), Ok(variant));
        }
        assert!("bogus".parse::<Variant>().is_err());
    }
}
