//! Tracking of the best solution found so far.

use crate::{population::Individual, score::Score, testing::Evaluation};

/// The best solution found so far and its score.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BestSolution {
  /// Sign-up order of the libraries.
  pub individual: Individual,
  /// Total value of the books scanned with that order.
  pub score: Score,
}

/// Keeps the best solution across generations. Its score never decreases and
/// it is only replaced by a strictly better solution.
#[derive(Clone, Default, Debug)]
pub struct Recorder {
  best: Option<BestSolution>,
}

impl Recorder {
  /// Creates an empty recorder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Offers a solution. The first offer is always accepted, later ones only if
  /// they score strictly higher. Returns `true` if `individual` was recorded.
  pub fn offer(&mut self, individual: &Individual, score: Score) -> bool {
    if self.best.as_ref().is_some_and(|best| best.score >= score) {
      return false;
    }
    self.best = Some(BestSolution {
      individual: individual.clone(),
      score,
    });
    true
  }

  /// Merges the per-batch bests of `evaluation` in batch order. Returns `true`
  /// if the recorded solution changed.
  pub fn fold(
    &mut self,
    population: &[Individual],
    evaluation: &Evaluation,
  ) -> bool {
    evaluation
      .batch_bests
      .iter()
      .fold(false, |improved, &(idx, score)| {
        self.offer(&population[idx], score) || improved
      })
  }

  /// Returns the recorded solution, if any.
  pub fn best(&self) -> Option<&BestSolution> {
    self.best.as_ref()
  }

  /// Returns the recorded score or `0` if nothing was recorded.
  pub fn score(&self) -> Score {
    self.best.as_ref().map_or(0, |best| best.score)
  }

  /// Moves the recorded solution out.
  pub fn into_best(self) -> Option<BestSolution> {
    self.best
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_only_strict_improvements_are_recorded() {
    let mut recorder = Recorder::new();
    assert_eq!(recorder.score(), 0);
    assert!(recorder.best().is_none());

    assert!(recorder.offer(&vec![0, 1], 0));
    assert!(!recorder.offer(&vec![1, 0], 0));
    assert_eq!(recorder.best().unwrap().individual, vec![0, 1]);

    assert!(recorder.offer(&vec![1, 0], 4));
    assert!(!recorder.offer(&vec![0, 1], 3));
    assert!(!recorder.offer(&vec![0, 1], 4));
    assert_eq!(
      recorder.into_best(),
      Some(BestSolution {
        individual: vec![1, 0],
        score: 4
      })
    );
  }

  #[test]
  fn test_fold_keeps_first_of_equal_batch_bests() {
    let population = vec![vec![0, 1, 2], vec![2, 1, 0], vec![1, 0, 2]];
    let evaluation = Evaluation {
      scores: vec![5, 7, 7],
      total: 19,
      batch_bests: vec![(0, 5), (1, 7), (2, 7)],
    };
    let mut recorder = Recorder::new();
    assert!(recorder.fold(&population, &evaluation));
    assert_eq!(recorder.best().unwrap().individual, vec![2, 1, 0]);
    assert_eq!(recorder.score(), 7);

    // an equally good generation changes nothing
    assert!(!recorder.fold(&population, &evaluation));
    assert_eq!(recorder.best().unwrap().individual, vec![2, 1, 0]);
  }
}
