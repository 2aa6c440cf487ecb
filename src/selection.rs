//! Selection operators and utilities.
//!
//! A [`Selection`] is chosen once, when the optimizer is configured. Every
//! generation it builds the matching [`Selector`] from the cached fitness
//! scores, draws pairs of parents from it and turns each pair into two
//! offsprings with the configured recombination and mutation operators.

use std::{cmp::Reverse, fmt};

use itertools::Itertools;
use rand::{seq::index, Rng};
use tracing::warn;

use crate::{
  mutation::Mutation,
  population::{Individual, PARENT_NUM},
  recombination::Recombination,
  score::Score,
  testing::Evaluation,
};

/// An operator that draws indices of parents from the current population.
pub trait Selector {
  /// Returns indices of `PARENT_NUM` parents.
  fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> [usize; PARENT_NUM];
}

/// Available selection strategies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Selection {
  /// Parents are drawn uniformly from the best scoring fraction of the
  /// population. See [`RankSelector`].
  Rank,
  /// Parents are drawn with probability proportional to their scores. See
  /// [`RouletteSelector`].
  RouletteWheel,
  /// Each parent is the winner of a tournament between two solutions. See
  /// [`TournamentSelector`].
  #[default]
  Tournament,
}

impl fmt::Display for Selection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Rank => "Rank",
      Self::RouletteWheel => "Roulette Wheel",
      Self::Tournament => "Tournament",
    })
  }
}

impl Selection {
  /// Creates the next generation, which is as large as `population`.
  ///
  /// `elite_count` is the size of the mating pool of [`Selection::Rank`] and
  /// is ignored by other strategies.
  ///
  /// # Panics
  ///
  /// Panics if `population` is empty, if it has less than 2 solutions for
  /// [`Selection::Tournament`], or if `elite_count` is less than 2 for
  /// [`Selection::Rank`].
  pub fn breed<Rec, Mut, R>(
    &self,
    population: &[Individual],
    evaluation: &Evaluation,
    elite_count: usize,
    recombinator: &Rec,
    mutator: &Mut,
    rng: &mut R,
  ) -> Vec<Individual>
  where
    Rec: Recombination,
    Mut: Mutation,
    R: Rng + ?Sized,
  {
    let scores = &evaluation.scores;
    match self {
      Self::Rank => breed_with(
        &RankSelector::new(scores, elite_count),
        population,
        recombinator,
        mutator,
        rng,
      ),
      Self::RouletteWheel => breed_with(
        &RouletteSelector::new(scores, evaluation.total),
        population,
        recombinator,
        mutator,
        rng,
      ),
      Self::Tournament => breed_with(
        &TournamentSelector::new(scores),
        population,
        recombinator,
        mutator,
        rng,
      ),
    }
  }
}

/// Draws `population.len() / PARENT_NUM` groups of parents with `selector`,
/// recombines each group and mutates every offspring.
pub fn breed_with<Sel, Rec, Mut, R>(
  selector: &Sel,
  population: &[Individual],
  recombinator: &Rec,
  mutator: &Mut,
  rng: &mut R,
) -> Vec<Individual>
where
  Sel: Selector,
  Rec: Recombination,
  Mut: Mutation,
  R: Rng + ?Sized,
{
  let mut next = Vec::with_capacity(population.len());
  for _ in 0..population.len() / PARENT_NUM {
    let parents = selector.select(rng).map(|idx| &population[idx]);
    for mut offspring in recombinator.recombine(parents, rng) {
      mutator.mutate(&mut offspring, rng);
      next.push(offspring);
    }
  }
  next
}

/// Draws distinct parents uniformly from the `elite_count` best solutions.
/// Solutions are ordered by their cached scores, equal scores keep their
/// population order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RankSelector {
  pool: Vec<usize>,
}

impl RankSelector {
  /// Creates a selector over the `elite_count` best of `scores`.
  pub fn new(scores: &[Score], elite_count: usize) -> Self {
    let pool = (0..scores.len())
      .sorted_by_key(|&idx| Reverse(scores[idx]))
      .take(elite_count)
      .collect();
    Self { pool }
  }

  /// Indices of the solutions parents are drawn from, best first.
  pub fn pool(&self) -> &[usize] {
    &self.pool
  }
}

impl Selector for RankSelector {
  fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> [usize; PARENT_NUM] {
    let picked = index::sample(rng, self.pool.len(), PARENT_NUM);
    std::array::from_fn(|i| self.pool[picked.index(i)])
  }
}

/// Draws each parent with probability `score / total`.
///
/// A draw `u` from `[0, 1)` selects the first solution whose cumulative
/// probability reaches `u`, so boundary draws favour lower indices. If all
/// scores are zero, parents are drawn uniformly.
#[derive(Clone, PartialEq, Debug)]
pub struct RouletteSelector {
  cumulative: Vec<f64>,
  len: usize,
}

impl RouletteSelector {
  /// Creates a selector from `scores` and their sum `total`.
  pub fn new(scores: &[Score], total: Score) -> Self {
    let cumulative = if total == 0 {
      warn!("all scores are zero, parents are drawn uniformly");
      Vec::new()
    } else {
      scores
        .iter()
        .scan(0.0, |sum, &sc| {
          *sum += sc as f64 / total as f64;
          Some(*sum)
        })
        .collect()
    };
    Self {
      cumulative,
      len: scores.len(),
    }
  }

  /// Selection probability of each solution.
  pub fn probabilities(&self) -> Vec<f64> {
    self
      .cumulative
      .iter()
      .scan(0.0, |prev, &c| Some(c - std::mem::replace(prev, c)))
      .collect()
  }

  /// Returns the index selected by the draw `u`.
  pub fn spin(&self, u: f64) -> usize {
    self
      .cumulative
      .partition_point(|&c| c < u)
      .min(self.len.saturating_sub(1))
  }
}

impl Selector for RouletteSelector {
  fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> [usize; PARENT_NUM] {
    std::array::from_fn(|_| {
      if self.cumulative.is_empty() {
        rng.gen_range(0..self.len)
      } else {
        self.spin(rng.gen())
      }
    })
  }
}

/// Each parent is the winner of a tournament between two distinct, uniformly
/// drawn solutions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TournamentSelector<'a> {
  scores: &'a [Score],
}

impl<'a> TournamentSelector<'a> {
  /// Creates a selector over `scores`.
  ///
  /// # Panics
  ///
  /// Panics if there are less than 2 scores.
  pub fn new(scores: &'a [Score]) -> Self {
    assert!(
      scores.len() >= 2,
      "tournament requires at least 2 solutions"
    );
    Self { scores }
  }

  /// The solution with strictly greater score wins, `b` wins a tie.
  pub fn winner(&self, a: usize, b: usize) -> usize {
    if self.scores[a] > self.scores[b] {
      a
    } else {
      b
    }
  }
}

impl Selector for TournamentSelector<'_> {
  fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> [usize; PARENT_NUM] {
    std::array::from_fn(|_| {
      let a = rng.gen_range(0..self.scores.len());
      let b = loop {
        let b = rng.gen_range(0..self.scores.len());
        if b != a {
          break b;
        }
      };
      self.winner(a, b)
    })
  }
}
