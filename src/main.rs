//! Command line entry point: solves a dataset file and writes the report
//! next to it.

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use bookscan::{
  config::Parameters, dataset::Dataset, report::solution_path,
  selection::Selection, solver::Solver,
};
use clap::{error::ErrorKind, ArgAction, Parser, ValueEnum};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "bookscan")]
#[command(about = "Genetic algorithm for the HashCode book scanning problem")]
#[command(version)]
struct Cli {
  /// Input data set
  input: PathBuf,

  /// Number of solutions in each generation (positive and even)
  #[arg(long, default_value_t = 10_000)]
  population_size: usize,

  /// Number of generations bred after the initial one
  #[arg(long, default_value_t = 50)]
  generations: usize,

  /// Probability of crossing over a pair of parents
  #[arg(long, default_value_t = 0.8)]
  crossover_rate: f64,

  /// Probability of mutating an offspring
  #[arg(long, default_value_t = 0.1)]
  mutation_rate: f64,

  /// Fraction of the best solutions rank selection breeds from
  #[arg(long, default_value_t = 0.1)]
  elite_percent: f64,

  /// Selection strategy
  #[arg(long, value_enum, default_value_t = SelectionArg::Tournament)]
  selection: SelectionArg,

  /// Seed of the random number generator (wall clock if omitted)
  #[arg(long)]
  seed: Option<u64>,

  /// Number of worker threads (rayon default if omitted)
  #[arg(long)]
  threads: Option<usize>,

  /// Raise the log level, once for debug and twice for trace
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SelectionArg {
  Rank,
  RouletteWheel,
  Tournament,
}

impl From<SelectionArg> for Selection {
  fn from(arg: SelectionArg) -> Self {
    match arg {
      SelectionArg::Rank => Selection::Rank,
      SelectionArg::RouletteWheel => Selection::RouletteWheel,
      SelectionArg::Tournament => Selection::Tournament,
    }
  }
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => match err.kind() {
      ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
      ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument => {
        eprintln!("Invalid number of arguments!\nMissing input data set.");
        return ExitCode::FAILURE;
      }
      _ => {
        let _ = err.print();
        return ExitCode::FAILURE;
      }
    },
  };

  let level = match cli.verbose {
    0 => Level::INFO,
    1 => Level::DEBUG,
    _ => Level::TRACE,
  };
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("Error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> anyhow::Result<()> {
  let parameters = Parameters::builder()
    .population_size(cli.population_size)
    .generations(cli.generations)
    .crossover_rate(cli.crossover_rate)
    .mutation_rate(cli.mutation_rate)
    .elite_percent(cli.elite_percent)
    .selection(cli.selection.into())
    .seed(cli.seed)
    .build();
  parameters.validate()?;

  let dataset = Dataset::from_path(&cli.input)?;
  let solver = Solver::new(&dataset, parameters)?;
  let report = match cli.threads {
    Some(threads) => rayon::ThreadPoolBuilder::new()
      .num_threads(threads)
      .build()
      .context("failed to build the worker pool")?
      .install(|| solver.solve())?,
    None => solver.solve()?,
  };

  print!("{report}");
  let output = solution_path(&cli.input);
  report.write_to(&output)?;
  info!(path = %output.display(), "solution written");
  Ok(())
}
