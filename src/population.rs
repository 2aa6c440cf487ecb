//! Solution representation and the initial population.

use rand::{seq::SliceRandom, Rng};

use crate::dataset::ContainerId;

/// A solution: the order in which libraries sign up. It is always a
/// permutation of all library ids.
pub type Individual = Vec<ContainerId>;

/// Number of parents taking part in a single recombination.
pub const PARENT_NUM: usize = 2;

/// Creates `size` random permutations of library ids `0..container_count`,
/// each one shuffled with Fisher-Yates.
pub fn initial_population<R: Rng + ?Sized>(
  container_count: usize,
  size: usize,
  rng: &mut R,
) -> Vec<Individual> {
  let mut ids = (0..container_count as ContainerId).collect::<Individual>();
  (0..size)
    .map(|_| {
      ids.shuffle(rng);
      ids.clone()
    })
    .collect()
}

/// Checks that `individual` contains each id of `0..container_count` exactly
/// once.
pub fn is_permutation(
  individual: &[ContainerId],
  container_count: usize,
) -> bool {
  if individual.len() != container_count {
    return false;
  }
  let mut seen = vec![false; container_count];
  individual.iter().all(|&id| {
    seen
      .get_mut(id as usize)
      .map(|s| !std::mem::replace(s, true))
      .unwrap_or(false)
  })
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  #[test]
  fn test_initial_population_is_made_of_permutations() {
    let mut rng = StdRng::seed_from_u64(7);
    let population = initial_population(13, 40, &mut rng);
    assert_eq!(population.len(), 40);
    assert!(population.iter().all(|ind| is_permutation(ind, 13)));
    // 40 shuffles of 13 ids are virtually never all the same
    assert!(population.iter().any(|ind| ind != &population[0]));
  }

  #[test]
  fn test_initial_population_without_containers() {
    let mut rng = StdRng::seed_from_u64(7);
    let population = initial_population(0, 4, &mut rng);
    assert_eq!(population, vec![Vec::<ContainerId>::new(); 4]);
  }

  #[test]
  fn test_is_permutation() {
    assert!(is_permutation(&[], 0));
    assert!(is_permutation(&[2, 0, 1], 3));
    assert!(!is_permutation(&[2, 0, 0], 3));
    assert!(!is_permutation(&[2, 0, 3], 3));
    assert!(!is_permutation(&[0, 1], 3));
    assert!(!is_permutation(&[0, 1, 2, 3], 3));
  }
}
