//! Errors of a run.

use std::path::PathBuf;

use crate::{config::ConfigError, dataset::DatasetError};

/// Any error that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The dataset could not be loaded.
  #[error(transparent)]
  Dataset(#[from] DatasetError),
  /// The parameters were rejected.
  #[error("invalid parameters: {0}")]
  Config(#[from] ConfigError),
  /// There was nothing to evolve.
  #[error("population is empty")]
  EmptyPopulation,
  /// The report could not be written.
  #[error("failed to write solution to {}: {source}", .path.display())]
  Write {
    /// Path of the solution file.
    path: PathBuf,
    /// Underlying I/O error.
    #[source]
    source: std::io::Error,
  },
}
