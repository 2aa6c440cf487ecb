//! A generational genetic algorithm over sign-up orders.
//!
//! Each generation goes through the same steps:
//! 1. **Test** every solution. Depending on the tester this is done in
//!    parallel, every worker keeping the best solution of its own batch
//! 2. **Record** the batch bests, one batch after another, into the best
//!    solution found so far
//! 3. **Terminate** the loop if the terminator says so
//! 4. **Breed** the next generation with the configured selection,
//!    recombination and mutation operators. The next generation replaces the
//!    current one entirely
//!
//! Everything but testing runs on the calling thread, which is also the only
//! user of the random number generator.

use std::marker::PhantomData;

use rand::Rng;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::{
  error::Error,
  mutation::Mutation,
  population::Individual,
  record::{BestSolution, Recorder},
  recombination::Recombination,
  selection::Selection,
  termination::Terminator,
  testing::executor::TestExecutor,
};

/// Generational genetic algorithm.
///
/// # Examples
/// ```
/// # use bookscan::{
/// #   dataset::{Container, Dataset},
/// #   mutation::SwapMutation,
/// #   operator::IntoPar,
/// #   optimizer::GeneticOptimizer,
/// #   population::initial_population,
/// #   recombination::PartiallyMapped,
/// #   termination::GenerationTerminator,
/// #   testing::Simulation,
/// # };
/// # use rand::{rngs::StdRng, SeedableRng};
/// let dataset = Dataset::new(
///   vec![1, 2, 3],
///   vec![Container::new(1, 1, vec![0, 1]), Container::new(2, 2, vec![1, 2])],
///   3,
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let optimizer = GeneticOptimizer::builder()
///   .population(initial_population(2, 10, &mut rng))
///   .tester(Simulation::new(&dataset).par_batch())
///   .recombinator(PartiallyMapped(0.8))
///   .mutator(SwapMutation(0.1))
///   .terminator(GenerationTerminator(5))
///   .rng(rng)
///   .build();
/// let best = optimizer.optimize().unwrap();
/// assert!(best.score <= 6);
/// ```
#[derive(TypedBuilder)]
pub struct GeneticOptimizer<Tst, TstExecStrat, Rec, Mut, Ter, R> {
  /// The initial population.
  population: Vec<Individual>,
  tester: Tst,
  #[builder(default)]
  selection: Selection,
  /// Size of the mating pool of rank selection.
  #[builder(default = 0)]
  elite_count: usize,
  recombinator: Rec,
  mutator: Mut,
  terminator: Ter,
  rng: R,
  #[builder(setter(skip), default)]
  _tst_es: PhantomData<TstExecStrat>,
}

impl<Tst, TstExecStrat, Rec, Mut, Ter, R>
  GeneticOptimizer<Tst, TstExecStrat, Rec, Mut, Ter, R>
where
  Tst: TestExecutor<TstExecStrat>,
  Rec: Recombination,
  Mut: Mutation,
  Ter: Terminator,
  R: Rng,
{
  /// Runs the algorithm until the terminator stops it, then returns the best
  /// solution it has found.
  pub fn optimize(mut self) -> Result<BestSolution, Error> {
    if self.population.is_empty() {
      return Err(Error::EmptyPopulation);
    }
    let mut population = std::mem::take(&mut self.population);
    let mut recorder = Recorder::new();

    for generation in 0usize.. {
      let evaluation = self.tester.execute_tests(&population);
      let improved = recorder.fold(&population, &evaluation);
      debug!(
        generation,
        best = recorder.score(),
        total = evaluation.total,
        improved,
        "generation tested"
      );

      if self.terminator.terminate() {
        break;
      }

      let next = self.selection.breed(
        &population,
        &evaluation,
        self.elite_count,
        &self.recombinator,
        &self.mutator,
        &mut self.rng,
      );
      debug_assert_eq!(
        next.len(),
        population.len(),
        "population size must not change"
      );
      population = next;
    }

    recorder.into_best().ok_or(Error::EmptyPopulation)
  }
}
