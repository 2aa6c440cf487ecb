//! A complete run: parameters and a dataset in, a report out.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
  config::Parameters,
  dataset::Dataset,
  error::Error,
  mutation::SwapMutation,
  operator::IntoPar,
  optimizer::GeneticOptimizer,
  population::initial_population,
  record::BestSolution,
  recombination::PartiallyMapped,
  report::Report,
  termination::GenerationTerminator,
  testing::{executor::TestExecutor, Simulation},
};

/// Runs the genetic algorithm on a dataset.
///
/// Fitness tests run on the current rayon thread pool, so calling
/// [`Solver::solve`] inside [`rayon::ThreadPool::install`] caps the number of
/// workers. With a single worker the tests run on the calling thread.
#[derive(Clone, Copy, Debug)]
pub struct Solver<'d> {
  dataset: &'d Dataset,
  parameters: Parameters,
}

impl<'d> Solver<'d> {
  /// Creates a solver after validating `parameters`.
  pub fn new(
    dataset: &'d Dataset,
    parameters: Parameters,
  ) -> Result<Self, Error> {
    parameters.validate()?;
    Ok(Self {
      dataset,
      parameters,
    })
  }

  /// Searches for the best sign-up order.
  ///
  /// A dataset without libraries scores `0` without running anything.
  pub fn solve(&self) -> Result<Report, Error> {
    let started = Instant::now();
    let p = &self.parameters;
    let seed = p.seed.unwrap_or_else(clock_seed);
    info!(
      books = self.dataset.item_count(),
      libraries = self.dataset.container_count(),
      days = self.dataset.days(),
      population_size = p.population_size,
      generations = p.generations,
      selection = %p.selection,
      seed,
      "starting genetic search"
    );

    let best = if self.dataset.container_count() == 0 {
      BestSolution {
        individual: vec![],
        score: 0,
      }
    } else if rayon::current_num_threads() == 1 {
      self.evolve(Simulation::new(self.dataset), seed)?
    } else {
      self.evolve(Simulation::new(self.dataset).par_batch(), seed)?
    };

    let elapsed = started.elapsed();
    info!(score = best.score, ?elapsed, "genetic search finished");
    Ok(Report {
      parameters: self.parameters,
      seed,
      item_count: self.dataset.item_count(),
      container_count: self.dataset.container_count(),
      days: self.dataset.days(),
      best,
      elapsed,
    })
  }
}

impl Solver<'_> {
  fn evolve<Tst, TstExecStrat>(
    &self,
    tester: Tst,
    seed: u64,
  ) -> Result<BestSolution, Error>
  where
    Tst: TestExecutor<TstExecStrat>,
  {
    let p = &self.parameters;
    let mut rng = StdRng::seed_from_u64(seed);
    let population = initial_population(
      self.dataset.container_count(),
      p.population_size,
      &mut rng,
    );
    GeneticOptimizer::builder()
      .population(population)
      .tester(tester)
      .selection(p.selection)
      .elite_count(p.elite_count())
      .recombinator(PartiallyMapped(p.crossover_rate))
      .mutator(SwapMutation(p.mutation_rate))
      .terminator(GenerationTerminator(p.generations))
      .rng(rng)
      .build()
      .optimize()
  }
}

/// Seed derived from the wall clock.
fn clock_seed() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_nanos() as u64)
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    config::ConfigError, dataset::Container, population::is_permutation,
    selection::Selection,
  };

  fn parameters(selection: Selection, seed: u64) -> Parameters {
    Parameters::builder()
      .population_size(20)
      .generations(10)
      .elite_percent(0.5)
      .selection(selection)
      .seed(Some(seed))
      .build()
  }

  #[test]
  fn test_invalid_parameters_are_rejected() {
    let dataset = Dataset::new(vec![], vec![], 1).unwrap();
    let parameters = Parameters::builder().population_size(3).build();
    assert!(matches!(
      Solver::new(&dataset, parameters),
      Err(Error::Config(ConfigError::PopulationSize(3)))
    ));
  }

  #[test]
  fn test_no_containers_scores_zero() {
    let dataset = Dataset::new(vec![5, 5], vec![], 10).unwrap();
    let report = Solver::new(&dataset, parameters(Selection::Rank, 1))
      .unwrap()
      .solve()
      .unwrap();
    assert_eq!(report.best.score, 0);
    assert!(report.best.individual.is_empty());
    assert_eq!(report.container_count, 0);
  }

  #[test]
  fn test_finds_the_better_order() {
    let dataset = Dataset::new(
      vec![1; 6],
      vec![
        Container::new(2, 1, vec![0, 1, 2, 3]),
        Container::new(1, 3, vec![3, 4, 5]),
      ],
      4,
    )
    .unwrap();
    for selection in
      [Selection::Rank, Selection::RouletteWheel, Selection::Tournament]
    {
      for seed in 0..3 {
        let report = Solver::new(&dataset, parameters(selection, seed))
          .unwrap()
          .solve()
          .unwrap();
        assert_eq!(report.best.score, 6);
        assert_eq!(report.best.individual, vec![0, 1]);
        assert_eq!(report.seed, seed);
      }
    }
  }

  #[test]
  fn test_same_seed_same_report() {
    let containers = (0..12)
      .map(|i| {
        let items = (i..i + 5).map(|item| item % 20).collect();
        Container::new(i % 5 + 1, i % 2 + 1, items)
      })
      .collect();
    let dataset = Dataset::new((0..20).collect(), containers, 15).unwrap();
    let solve = || {
      Solver::new(&dataset, parameters(Selection::Tournament, 11))
        .unwrap()
        .solve()
        .unwrap()
        .best
    };
    let best = solve();
    assert!(is_permutation(&best.individual, 12));
    assert_eq!(best, solve());

    // a single worker tests on the calling thread with the same outcome
    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(1)
      .build()
      .unwrap();
    assert_eq!(pool.install(solve), best);
  }
}
