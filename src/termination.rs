//! Termination operators and utilities.

/// An operator that decides whether the algorithm should stop. It is asked
/// once per generation, right after the generation has been tested.
pub trait Terminator {
  /// If returns `true`, the algorithm is terminated.
  fn terminate(&mut self) -> bool;
}

/// A `Terminator` that terminates the algorithm as soon as a certain number of
/// generations have passed. With `GenerationTerminator(g)` the algorithm
/// tests `g + 1` generations, the initial one included.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GenerationTerminator(pub usize);

impl Terminator for GenerationTerminator {
  fn terminate(&mut self) -> bool {
    match self.0 {
      0 => true,
      _ => {
        self.0 -= 1;
        false
      }
    }
  }
}
