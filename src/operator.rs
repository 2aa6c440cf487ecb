//! Wrappers that mark an operator for parallel execution.

/// A wrapper around an operator that marks it to
/// be executed in parallel for each **batch** of solutions by executor.
#[derive(Clone, Copy, Debug)]
pub struct ParBatch<O> {
  operator: O,
}

impl<O> ParBatch<O> {
  /// Returns a reference to the wrapped operator.
  pub fn operator(&self) -> &O {
    &self.operator
  }
}

/// Converts a fitness test into a parallelized one.
pub trait IntoPar: Sized {
  /// Creates a wrapper around given operator that marks it to
  /// be executed in parallel for each **batch** of solutions.
  /// The crate calculates the size of the batch in such a way as to evenly
  /// distribute the calculations across all available threads.
  ///
  /// **Parallelization is implemented with [rayon]. For small datasets the
  /// overhead may outweigh the gain. Benchmark if in doubt.**
  fn par_batch(self) -> ParBatch<Self> {
    ParBatch { operator: self }
  }
}
