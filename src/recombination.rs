//! Recombination operators and utilities.

use rand::Rng;

use crate::{
  dataset::ContainerId,
  population::{Individual, PARENT_NUM},
};

/// An operator that creates offsprings from a group of parents. Created
/// offsprings are passed to [`Mutation`](crate::mutation::Mutation).
///
/// Offsprings of permutation parents must be permutations themselves.
pub trait Recombination {
  /// Takes references to `PARENT_NUM` selected parents and returns as many
  /// offsprings.
  fn recombine<R: Rng + ?Sized>(
    &self,
    parents: [&Individual; PARENT_NUM],
    rng: &mut R,
  ) -> [Individual; PARENT_NUM];
}

/// Partially-mapped crossover (PMX) applied with the given probability.
/// Otherwise offsprings are exact copies of their parents.
///
/// A cut index `c` is drawn uniformly, then for each position `i` in `0..=c`
/// the values at `i` are exchanged between the offsprings. Each exchange is
/// repaired by a second swap inside the same offspring, at the position where
/// the incoming value used to be, so both offsprings remain permutations.
///
/// # Panics
///
/// Panics if the rate lies outside of `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PartiallyMapped(pub f64);

impl Recombination for PartiallyMapped {
  fn recombine<R: Rng + ?Sized>(
    &self,
    [a, b]: [&Individual; PARENT_NUM],
    rng: &mut R,
  ) -> [Individual; PARENT_NUM] {
    let mut a = a.clone();
    let mut b = b.clone();
    if !a.is_empty() && rng.gen_bool(self.0) {
      let cut = rng.gen_range(0..a.len());
      pmx(&mut a, &mut b, cut);
    }
    [a, b]
  }
}

/// Applies PMX to two permutations of equal length over the positions
/// `0..=cut`.
pub(crate) fn pmx(a: &mut [ContainerId], b: &mut [ContainerId], cut: usize) {
  debug_assert_eq!(a.len(), b.len(), "parents must be of equal length");
  let mut pos_a = positions(a);
  let mut pos_b = positions(b);
  for i in 0..=cut {
    // both lookups happen before either offspring changes
    let in_a = pos_a[b[i] as usize];
    let in_b = pos_b[a[i] as usize];
    swap_tracked(a, &mut pos_a, i, in_a);
    swap_tracked(b, &mut pos_b, i, in_b);
  }
}

/// Inverse of a permutation: the position of each value.
fn positions(permutation: &[ContainerId]) -> Vec<usize> {
  let mut pos = vec![0; permutation.len()];
  for (i, &id) in permutation.iter().enumerate() {
    pos[id as usize] = i;
  }
  pos
}

fn swap_tracked(
  permutation: &mut [ContainerId],
  pos: &mut [usize],
  i: usize,
  j: usize,
) {
  permutation.swap(i, j);
  pos[permutation[i] as usize] = i;
  pos[permutation[j] as usize] = j;
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::population::{initial_population, is_permutation};

  #[test]
  fn test_pmx_by_hand() {
    let mut a = vec![0, 1, 2, 3, 4];
    let mut b = vec![3, 4, 0, 1, 2];
    pmx(&mut a, &mut b, 1);
    assert_eq!(a, vec![3, 4, 2, 0, 1]);
    assert_eq!(b, vec![0, 1, 3, 4, 2]);
  }

  #[test]
  fn test_pmx_first_position_is_exchanged() {
    let mut a = vec![4, 2, 0, 3, 1, 5];
    let mut b = vec![1, 5, 3, 0, 2, 4];
    pmx(&mut a, &mut b, 0);
    assert_eq!(a, vec![1, 2, 0, 3, 4, 5]);
    assert_eq!(b, vec![4, 5, 3, 0, 2, 1]);
  }

  #[test]
  fn test_pmx_on_equal_parents() {
    let mut a = vec![2, 0, 1];
    let mut b = a.clone();
    pmx(&mut a, &mut b, 2);
    assert_eq!(a, vec![2, 0, 1]);
    assert_eq!(b, vec![2, 0, 1]);
  }

  #[test]
  fn test_zero_rate_copies_parents() {
    let mut rng = StdRng::seed_from_u64(1);
    let population = initial_population(9, 20, &mut rng);
    for pair in population.chunks(2) {
      let [x, y] =
        PartiallyMapped(0.0).recombine([&pair[0], &pair[1]], &mut rng);
      assert_eq!(x, pair[0]);
      assert_eq!(y, pair[1]);
    }
  }

  #[test]
  fn test_offsprings_are_permutations() {
    let mut rng = StdRng::seed_from_u64(2);
    let population = initial_population(17, 200, &mut rng);
    let mut changed = 0;
    for pair in population.chunks(2) {
      let [x, y] =
        PartiallyMapped(1.0).recombine([&pair[0], &pair[1]], &mut rng);
      assert!(is_permutation(&x, 17), "{x:?}");
      assert!(is_permutation(&y, 17), "{y:?}");
      if x != pair[0] || y != pair[1] {
        changed += 1;
      }
    }
    assert!(changed > 0);
  }

  #[test]
  fn test_prefix_slots_are_exchanged() {
    let mut rng = StdRng::seed_from_u64(4);
    let population = initial_population(11, 40, &mut rng);
    for pair in population.chunks(2) {
      let (mut prev_a, mut prev_b) = (pair[0].clone(), pair[1].clone());
      for cut in 0..11 {
        let (mut a, mut b) = (pair[0].clone(), pair[1].clone());
        pmx(&mut a, &mut b, cut);
        // slot `cut` takes the other offspring's value from one step earlier
        assert_eq!(a[cut], prev_b[cut], "cut {cut}: {a:?} {b:?}");
        assert_eq!(b[cut], prev_a[cut], "cut {cut}: {a:?} {b:?}");
        assert!(is_permutation(&a, 11) && is_permutation(&b, 11));
        (prev_a, prev_b) = (a, b);
      }
    }
  }

  #[test]
  fn test_repairs_may_move_earlier_slots() {
    let mut a = vec![0, 4, 3, 2, 1];
    let mut b = vec![1, 3, 2, 0, 4];
    pmx(&mut a, &mut b, 3);
    assert_eq!(a, vec![4, 3, 2, 1, 0]);
    assert_eq!(b, vec![0, 2, 1, 4, 3]);
  }

  #[test]
  fn test_agreeing_prefix_is_kept() {
    let mut a = vec![2, 0, 1, 4, 3];
    let mut b = vec![2, 0, 3, 1, 4];
    pmx(&mut a, &mut b, 1);
    assert_eq!(a, vec![2, 0, 1, 4, 3]);
    assert_eq!(b, vec![2, 0, 3, 1, 4]);
  }

  #[test]
  fn test_short_permutations() {
    let mut rng = StdRng::seed_from_u64(3);
    let empty = Individual::new();
    assert_eq!(
      PartiallyMapped(1.0).recombine([&empty, &empty], &mut rng),
      [vec![], vec![]]
    );
    let single = vec![0];
    assert_eq!(
      PartiallyMapped(1.0).recombine([&single, &single], &mut rng),
      [vec![0], vec![0]]
    );
  }
}
