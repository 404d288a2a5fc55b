//! Leaf labels and the ordered leaf sequence.

use std::fmt::Display;

use itertools::Itertools;
use tracing::instrument;

use crate::domain::arena::DecisionArena;
use crate::domain::entities::Bracket;

/// Format a completed object: `{}` / `[]` when empty, else `{a, b}` / `[a, b]`.
///
/// Labels are the equality key for search and duplicate suppression.
pub fn format_label<T: Display>(values: &[T], bracket: Bracket) -> String {
    format!(
        "{}{}{}",
        bracket.open(),
        values.iter().join(", "),
        bracket.close()
    )
}

/// Collects leaf labels in pre-order, children in construction order.
#[instrument(level = "debug", skip_all)]
pub fn collect_leaves<T>(arena: &DecisionArena<T>) -> Vec<String> {
    arena
        .iter()
        .filter_map(|(_, node)| node.label())
        .map(str::to_string)
        .collect()
}
