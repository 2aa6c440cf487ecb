//! Type aliases for a more convenient representation of fitness scores used
//! throughout the library.

/// An alias for a fitness score: the total value of all distinct books
/// scanned within the day budget.
///
/// Unlike error-like objectives, a score is maximized. The higher - the better.
pub type Score = u64;

/// A score together with the index of the solution that earned it.
pub type IndexedScore = (usize, Score);

/// Returns the first entry with the strictly greatest score, i.e. among equal
/// maxima the lowest index wins. Returns `None` for an empty input.
pub(crate) fn first_max(
  scores: impl IntoIterator<Item = IndexedScore>,
) -> Option<IndexedScore> {
  scores.into_iter().fold(None, |best, (idx, sc)| match best {
    Some((_, best_sc)) if best_sc >= sc => best,
    _ => Some((idx, sc)),
  })
}
