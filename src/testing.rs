//! Fitness scores evaluation operators and utilities.
//!
//! The fitness of a solution is obtained by simulating the scanning process
//! day by day. Libraries sign up one at a time in the order given by the
//! solution, each sign-up starting when the previous one has finished. A
//! signed up library scans its most valuable books first, up to its daily
//! throughput, and every distinct book counts only once.

use executor::TestExecutor;
use rayon::prelude::*;

use crate::{
  dataset::{Dataset, ItemId},
  execution::strategy::*,
  operator::{IntoPar, ParBatch},
  population::Individual,
  score::{first_max, IndexedScore, Score},
};

/// An operator that tests solution's fitness.
///
/// Runs on the calling thread as is, or in parallel for batches of solutions
/// once converted with `par_batch()`.
///
/// # Examples
/// ```
/// # use bookscan::{
/// #   dataset::{Container, Dataset},
/// #   operator::IntoPar,
/// #   testing::{Simulation, Test},
/// # };
/// let dataset =
///   Dataset::new(vec![4, 2], vec![Container::new(1, 1, vec![0, 1])], 2)
///     .unwrap();
/// let simulation = Simulation::new(&dataset);
/// assert_eq!(simulation.test(&vec![0]), 6);
/// let _parallel = simulation.par_batch();
/// ```
pub trait Test {
  /// Returns the fitness score of given solution. The higher - the better.
  fn test(&self, individual: &Individual) -> Score;
}

impl<T: Test> IntoPar for T {}

/// The fitness test of the book scanning problem.
#[derive(Clone, Copy, Debug)]
pub struct Simulation<'d> {
  dataset: &'d Dataset,
}

impl<'d> Simulation<'d> {
  /// Creates a simulation over `dataset`.
  pub fn new(dataset: &'d Dataset) -> Self {
    Self { dataset }
  }
}

/// A signed up library together with the books it has not scanned yet.
struct Scanner<'d> {
  remaining: &'d [ItemId],
  throughput: usize,
}

impl<'d> Scanner<'d> {
  /// Takes the books scanned today.
  fn scan(&mut self) -> &'d [ItemId] {
    let count = self.throughput.min(self.remaining.len());
    let (today, rest) = self.remaining.split_at(count);
    self.remaining = rest;
    today
  }
}

impl Test for Simulation<'_> {
  fn test(&self, individual: &Individual) -> Score {
    let dataset = self.dataset;
    let days = u64::from(dataset.days());
    if individual.is_empty() || days == 0 {
      return 0;
    }

    let mut scanned = vec![false; dataset.item_count()];
    let mut active: Vec<Scanner> = Vec::new();
    let mut score: Score = 0;
    // sum of sign-up durations of the libraries signed up so far
    let mut elapsed: u64 = 0;
    let mut next = 0;
    let ready_day = |elapsed: u64, next: usize| {
      individual.get(next).map(|&id| {
        (elapsed + u64::from(dataset.container(id).registration()))
          .saturating_sub(1)
      })
    };

    let mut day: u64 = 0;
    while day < days {
      while let Some(ready) = ready_day(elapsed, next) {
        if ready > day {
          break;
        }
        let container = dataset.container(individual[next]);
        elapsed += u64::from(container.registration());
        next += 1;
        active.push(Scanner {
          remaining: container.items(),
          throughput: container.throughput() as usize,
        });
      }

      if active.is_empty() {
        // nobody scans until the next sign-up completes
        match ready_day(elapsed, next) {
          Some(ready) => {
            day = ready;
            continue;
          }
          None => break,
        }
      }

      active.retain_mut(|scanner| {
        for &item in scanner.scan() {
          let seen = &mut scanned[item as usize];
          if !*seen {
            *seen = true;
            score += Score::from(dataset.value(item));
          }
        }
        // a library that cannot scan anything today never will
        scanner.throughput > 0 && !scanner.remaining.is_empty()
      });
      day += 1;
    }

    score
  }
}

/// Fitness scores of a whole population.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Evaluation {
  /// One score per solution, in population order.
  pub scores: Vec<Score>,
  /// Sum of all scores.
  pub total: Score,
  /// The best solution of each batch that was tested by a single worker, in
  /// batch order. Among equal scores within a batch the first one is kept.
  pub batch_bests: Vec<IndexedScore>,
}

impl Evaluation {
  fn from_batches(
    len: usize,
    batches: impl IntoIterator<Item = (Vec<Score>, Option<IndexedScore>)>,
  ) -> Self {
    let mut scores = Vec::with_capacity(len);
    let mut batch_bests = Vec::new();
    for (batch_scores, best) in batches {
      scores.extend(batch_scores);
      batch_bests.extend(best);
    }
    Self {
      total: scores.iter().sum(),
      scores,
      batch_bests,
    }
  }
}

/// Tests a batch of solutions starting at `offset` in the population.
fn test_batch<T: Test>(
  test: &T,
  offset: usize,
  batch: &[Individual],
) -> (Vec<Score>, Option<IndexedScore>) {
  let scores = batch.iter().map(|s| test.test(s)).collect::<Vec<_>>();
  let best =
    first_max(scores.iter().enumerate().map(|(i, &sc)| (offset + i, sc)));
  (scores, best)
}

/// This private module prevents exposing the `Executor` to a user.
pub(crate) mod executor {
  use super::Evaluation;
  use crate::population::Individual;

  /// An internal test executor.
  pub trait TestExecutor<ExecutionStrategy> {
    /// Executes tests optionally parallelizing operator's application.
    fn execute_tests(&self, population: &[Individual]) -> Evaluation;
  }
}

impl<T> TestExecutor<SequentialExecutionStrategy> for T
where
  T: Test,
{
  fn execute_tests(&self, population: &[Individual]) -> Evaluation {
    Evaluation::from_batches(
      population.len(),
      [test_batch(self, 0, population)],
    )
  }
}

impl<T> TestExecutor<ParallelBatchExecutionStrategy> for ParBatch<T>
where
  T: Test + Sync,
{
  fn execute_tests(&self, population: &[Individual]) -> Evaluation {
    let chunk_size = (population.len() / rayon::current_num_threads()).max(1);
    let batches = population
      .par_chunks(chunk_size)
      .enumerate()
      .map(|(i, chunk)| test_batch(self.operator(), i * chunk_size, chunk))
      .collect::<Vec<_>>();
    Evaluation::from_batches(population.len(), batches)
  }
}
