//! **bookscan** searches for a good library sign-up order of the HashCode
//! *book scanning* problem with a genetic algorithm. Libraries sign up one at
//! a time and, once signed up, scan a limited number of books per day. The
//! goal is to scan books of the highest total value before the last day.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Workflow
//!
//! A run is made of a few abstractions:
//! - **Dataset** is the problem itself: book values, libraries and the day
//!   budget. It is parsed once and shared read-only afterwards, see
//!   [`Dataset`]
//! - **Solution** is a sign-up order, a permutation of library ids, see
//!   [`Individual`]
//! - **Operator** is a genetic operator: **test**, **selection**,
//!   **recombination**, **mutation** and **termination**
//! - **Optimizer** controls execution of each step of the genetic algorithm
//!   loop:
//!   1. **Test** solutions by simulating the scanning day by day
//!   2. **Record** the best solution found so far
//!   3. **Terminate** the loop after a fixed number of generations
//!   4. **Select** parents, **recombine** them with partially-mapped crossover
//!      and **mutate** the offspring with a random swap
//!
//! [`Solver`] glues all of the above together: it validates [`Parameters`],
//! seeds the random number generator and turns the outcome into a
//! [`Report`].
//!
//! # Selection
//!
//! Three selection strategies are available through [`Selection`]:
//! - **Rank** draws parents uniformly from the best `elite_percent` of the
//!   population
//! - **Roulette wheel** draws parents with probability proportional to their
//!   score
//! - **Tournament** picks two distinct solutions and keeps the better one,
//!   once per parent
//!
//! # Parallelization
//!
//! Only testing runs in parallel. A [`Test`] is parallelized by calling
//! [`par_batch()`] on it, which merely wraps it so that an executor applies
//! it to batches of solutions with [rayon]. Every batch keeps its own best
//! solution and the batch bests are merged in batch order afterwards, so the
//! recorded solution does not depend on thread scheduling. With a single
//! worker thread, [`Solver`] tests on the calling thread instead. Everything
//! else, including every random draw, happens on the calling thread: runs
//! with the same seed are identical.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), bookscan::Error> {
//! use bookscan::{
//!   config::Parameters, dataset::Dataset, selection::Selection,
//!   solver::Solver,
//! };
//! let dataset = Dataset::parse(
//!   "6 2 7
//!    1 2 3 6 5 4
//!    5 2 2
//!    0 1 2 3 4
//!    4 3 1
//!    3 2 5 0",
//! )?;
//! let parameters = Parameters::builder()
//!   .population_size(20)
//!   .generations(10)
//!   .selection(Selection::Tournament)
//!   .seed(Some(42))
//!   .build();
//! let report = Solver::new(&dataset, parameters)?.solve()?;
//! assert!(report.best.score > 0);
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! [`Dataset`]: crate::dataset::Dataset
//! [`Individual`]: crate::population::Individual
//! [`Solver`]: crate::solver::Solver
//! [`Parameters`]: crate::config::Parameters
//! [`Report`]: crate::report::Report
//! [`Selection`]: crate::selection::Selection
//! [`Test`]: crate::testing::Test
//! [`par_batch()`]: crate::operator::IntoPar::par_batch

#![warn(missing_docs)]

pub mod config;
pub mod dataset;
pub mod error;
mod execution;
pub mod mutation;
pub mod operator;
pub mod optimizer;
pub mod population;
pub mod recombination;
pub mod record;
pub mod report;
pub mod score;
pub mod selection;
pub mod solver;
pub mod termination;
pub mod testing;

pub use error::Error;
