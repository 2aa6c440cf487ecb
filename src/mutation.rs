//! Mutation operators and utilities.

use rand::{seq::index, Rng};

use crate::population::Individual;

/// An operator that mutates a single solution.
///
/// Mutated solutions must remain permutations.
pub trait Mutation {
  /// Mutates given solution.
  fn mutate<R: Rng + ?Sized>(&self, individual: &mut Individual, rng: &mut R);
}

/// Swaps two distinct, uniformly drawn positions with the given probability.
/// Solutions shorter than two elements are never changed.
///
/// # Panics
///
/// Panics if the rate lies outside of `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SwapMutation(pub f64);

impl Mutation for SwapMutation {
  fn mutate<R: Rng + ?Sized>(&self, individual: &mut Individual, rng: &mut R) {
    if individual.len() < 2 || !rng.gen_bool(self.0) {
      return;
    }
    let picked = index::sample(rng, individual.len(), 2);
    individual.swap(picked.index(0), picked.index(1));
  }
}
