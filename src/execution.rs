//! Execution strategy markers. An executor picks its implementation based on
//! the marker, so the optimizer never has to know whether fitness tests run
//! sequentially or in parallel.

pub mod strategy {
  /// Sequential execution strategy marker, i.e. no parallelization involved.
  pub enum SequentialExecutionStrategy {}

  /// Parallel execution strategy marker, parallelizes fitness testing for a
  /// **batch** of solutions. The crate tries to split the work equally for
  /// each available thread.
  pub enum ParallelBatchExecutionStrategy {}
}
