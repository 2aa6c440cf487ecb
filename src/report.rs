//! Fixed-format run report.

use std::{
  fmt,
  fs,
  path::{Path, PathBuf},
  time::Duration,
};

use crate::{config::Parameters, error::Error, record::BestSolution};

const RULE: &str =
  "###################################################################";
const TITLE: &str =
  "#  Genetic algorithm solution for HashCode book scanning problem  #";
const PARAMETERS: &str =
  "######################  Algorithm parameters  #####################";
const DATA_SET: &str =
  "########################  Problem data set  #######################";
const RESULTS: &str =
  "#########################  Final results  #########################";

/// Width of the label column.
const WIDTH: usize = 30;

/// Outcome of a run together with everything needed to reproduce it.
#[derive(Clone, Debug)]
pub struct Report {
  /// Parameters of the run.
  pub parameters: Parameters,
  /// Seed the random number generator was created with.
  pub seed: u64,
  /// Number of books.
  pub item_count: usize,
  /// Number of libraries.
  pub container_count: usize,
  /// Day budget.
  pub days: u32,
  /// The best sign-up order and its score.
  pub best: BestSolution,
  /// Wall clock time of the run.
  pub elapsed: Duration,
}

impl Report {
  /// Writes the report to `path`, replacing its content.
  pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    fs::write(path, self.to_string()).map_err(|source| Error::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let p = &self.parameters;
    writeln!(f, "{RULE}\n{TITLE}\n{RULE}\n{PARAMETERS}\n{RULE}")?;
    writeln!(f, "{:<WIDTH$}{}", "Population size", p.population_size)?;
    writeln!(f, "{:<WIDTH$}{}", "Number of generations", p.generations)?;
    writeln!(f, "{:<WIDTH$}{:.2}", "Crossover rate", p.crossover_rate)?;
    writeln!(f, "{:<WIDTH$}{:.2}", "Mutation rate", p.mutation_rate)?;
    writeln!(
      f,
      "{:<WIDTH$}{}%",
      "Elite pick percentage",
      (p.elite_percent * 100.0) as u16
    )?;
    writeln!(f, "{:<WIDTH$}{}", "Selection method", p.selection)?;
    writeln!(f, "{RULE}\n{DATA_SET}\n{RULE}")?;
    writeln!(f, "{:<WIDTH$}{}", "Number of books", self.item_count)?;
    writeln!(f, "{:<WIDTH$}{}", "Number of libraries", self.container_count)?;
    writeln!(f, "{:<WIDTH$}{}", "Number of days", self.days)?;
    writeln!(f, "{RULE}\n{RESULTS}\n{RULE}")?;
    writeln!(f, "{:<WIDTH$}{}", "Best score", self.best.score)?;
    writeln!(
      f,
      "{:<WIDTH$}{:.2} seconds",
      "Execution time",
      self.elapsed.as_secs_f64()
    )?;
    writeln!(f, "{RULE}")
  }
}

/// Derives the solution file path from the dataset path by replacing its
/// extension with `_solution.txt`.
///
/// # Examples
/// ```
/// # use bookscan::report::solution_path;
/// # use std::path::Path;
/// assert_eq!(
///   solution_path("data/a_example.txt"),
///   Path::new("data/a_example_solution.txt")
/// );
/// assert_eq!(solution_path("input"), Path::new("input_solution.txt"));
/// ```
pub fn solution_path(input: impl AsRef<Path>) -> PathBuf {
  let input = input.as_ref();
  let mut name = input.file_stem().unwrap_or_default().to_os_string();
  name.push("_solution.txt");
  input.with_file_name(name)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::selection::Selection;

  fn report() -> Report {
    Report {
      parameters: Parameters::default(),
      seed: 7,
      item_count: 6,
      container_count: 2,
      days: 7,
      best: BestSolution {
        individual: vec![1, 0],
        score: 21,
      },
      elapsed: Duration::from_millis(1234),
    }
  }

  #[test]
  fn test_layout() {
    let expected = "\
###################################################################
#  Genetic algorithm solution for HashCode book scanning problem  #
###################################################################
######################  Algorithm parameters  #####################
###################################################################
Population size               10000
Number of generations         50
Crossover rate                0.80
Mutation rate                 0.10
Elite pick percentage         10%
Selection method              Tournament
###################################################################
########################  Problem data set  #######################
###################################################################
Number of books               6
Number of libraries           2
Number of days                7
###################################################################
#########################  Final results  #########################
###################################################################
Best score                    21
Execution time                1.23 seconds
###################################################################
";
    assert_eq!(report().to_string(), expected);
  }

  #[test]
  fn test_banner_lines_have_equal_width() {
    for line in [RULE, TITLE, PARAMETERS, DATA_SET, RESULTS] {
      assert_eq!(line.len(), RULE.len(), "{line}");
    }
  }

  #[test]
  fn test_selection_names() {
    let mut report = report();
    report.parameters.selection = Selection::RouletteWheel;
    report.parameters.elite_percent = 0.25;
    let text = report.to_string();
    assert!(text.contains("Selection method              Roulette Wheel\n"));
    assert!(text.contains("Elite pick percentage         25%\n"));
  }

  #[test]
  fn test_solution_path() {
    assert_eq!(
      solution_path("data/b_read_on.txt"),
      Path::new("data/b_read_on_solution.txt")
    );
    assert_eq!(
      solution_path("./sets/c.in.txt"),
      Path::new("./sets/c.in_solution.txt")
    );
    assert_eq!(solution_path("plain"), Path::new("plain_solution.txt"));
  }

  #[test]
  fn test_write_to_missing_directory() {
    let path = std::env::temp_dir()
      .join("bookscan-missing-directory")
      .join("out_solution.txt");
    match report().write_to(&path) {
      Err(Error::Write { path: failed, .. }) => assert_eq!(failed, path),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn test_write_to() {
    let path = std::env::temp_dir().join("bookscan-report_solution.txt");
    report().write_to(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), report().to_string());
    fs::remove_file(path).unwrap();
  }
}
