//! Parameters of the genetic algorithm.

use typed_builder::TypedBuilder;

use crate::{population::PARENT_NUM, selection::Selection};

/// Errors caused by invalid parameters. They are reported before the
/// algorithm starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
  /// Population size is zero or odd.
  #[error("population size must be a positive even number, got {0}")]
  PopulationSize(usize),
  /// A probability lies outside of `[0, 1]`.
  #[error("{name} must lie within [0, 1], got {value}")]
  Rate {
    /// Name of the parameter.
    name: &'static str,
    /// Rejected value.
    value: f64,
  },
  /// Rank selection has fewer than two solutions to pick parents from.
  #[error(
    "rank selection needs at least 2 elite solutions, got {elite_count}"
  )]
  ElitePool {
    /// Size of the elite pool.
    elite_count: usize,
  },
}

/// Parameters of a run. Defaults match the values the algorithm was tuned
/// with.
///
/// # Examples
/// ```
/// # use bookscan::{config::Parameters, selection::Selection};
/// let parameters = Parameters::builder()
///   .population_size(100)
///   .generations(20)
///   .selection(Selection::Rank)
///   .seed(Some(42))
///   .build();
/// assert!(parameters.validate().is_ok());
/// assert_eq!(parameters.elite_count(), 10);
/// ```
#[derive(TypedBuilder, Clone, Copy, PartialEq, Debug)]
pub struct Parameters {
  /// Number of solutions in each generation.
  #[builder(default = 10_000)]
  pub population_size: usize,
  /// Number of generations bred after the initial one.
  #[builder(default = 50)]
  pub generations: usize,
  /// Probability that a pair of parents is crossed over.
  #[builder(default = 0.8)]
  pub crossover_rate: f64,
  /// Probability that an offspring is mutated.
  #[builder(default = 0.1)]
  pub mutation_rate: f64,
  /// Fraction of the best solutions that rank selection breeds from.
  #[builder(default = 0.1)]
  pub elite_percent: f64,
  /// Selection strategy.
  #[builder(default)]
  pub selection: Selection,
  /// Seed of the random number generator. A wall clock based seed is used if
  /// none is given.
  #[builder(default)]
  pub seed: Option<u64>,
}

impl Default for Parameters {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl Parameters {
  /// Size of the mating pool of rank selection.
  pub fn elite_count(&self) -> usize {
    (self.elite_percent * self.population_size as f64) as usize
  }

  /// Checks parameters before a run.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.population_size == 0 || self.population_size % PARENT_NUM != 0 {
      return Err(ConfigError::PopulationSize(self.population_size));
    }
    for (name, value) in [
      ("crossover rate", self.crossover_rate),
      ("mutation rate", self.mutation_rate),
      ("elite percent", self.elite_percent),
    ] {
      if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Rate { name, value });
      }
    }
    if self.selection == Selection::Rank && self.elite_count() < PARENT_NUM {
      return Err(ConfigError::ElitePool {
        elite_count: self.elite_count(),
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let parameters = Parameters::default();
    assert_eq!(parameters.population_size, 10_000);
    assert_eq!(parameters.generations, 50);
    assert_eq!(parameters.crossover_rate, 0.8);
    assert_eq!(parameters.mutation_rate, 0.1);
    assert_eq!(parameters.elite_percent, 0.1);
    assert_eq!(parameters.selection, Selection::Tournament);
    assert_eq!(parameters.seed, None);
    assert_eq!(parameters.elite_count(), 1000);
    assert_eq!(parameters.validate(), Ok(()));
  }

  #[test]
  fn test_population_size_must_be_even_and_positive() {
    for size in [0, 1, 7, 101] {
      let parameters = Parameters::builder().population_size(size).build();
      assert_eq!(
        parameters.validate(),
        Err(ConfigError::PopulationSize(size))
      );
    }
    let parameters = Parameters::builder().population_size(2).build();
    assert_eq!(parameters.validate(), Ok(()));
  }

  #[test]
  fn test_rates_must_be_probabilities() {
    let parameters = Parameters::builder().crossover_rate(1.5).build();
    assert!(matches!(
      parameters.validate(),
      Err(ConfigError::Rate {
        name: "crossover rate",
        ..
      })
    ));
    let parameters = Parameters::builder().mutation_rate(-0.1).build();
    assert!(matches!(
      parameters.validate(),
      Err(ConfigError::Rate {
        name: "mutation rate",
        ..
      })
    ));
    let parameters = Parameters::builder().elite_percent(f64::NAN).build();
    assert!(parameters.validate().is_err());
  }

  #[test]
  fn test_rank_needs_an_elite_pair() {
    let parameters = Parameters::builder()
      .population_size(10)
      .elite_percent(0.1)
      .selection(Selection::Rank)
      .build();
    assert_eq!(
      parameters.validate(),
      Err(ConfigError::ElitePool { elite_count: 1 })
    );
    // other strategies do not care about the elite
    let parameters = Parameters::builder()
      .population_size(10)
      .elite_percent(0.1)
      .build();
    assert_eq!(parameters.validate(), Ok(()));
  }
}
