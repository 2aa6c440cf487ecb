//! Immutable problem model: books, libraries and the day budget.
//!
//! A [`Dataset`] is parsed once and then shared read-only by every fitness
//! test, including those running concurrently. Each library's books are
//! sorted by descending value while the dataset is built, so the simulation
//! never has to reorder anything.

use std::{
  fs,
  path::{Path, PathBuf},
  str::SplitAsciiWhitespace,
};

use tracing::debug;

/// Identifier of a library, i.e. an index into [`Dataset::containers`].
pub type ContainerId = u32;

/// Identifier of a book, i.e. an index into the book values.
pub type ItemId = u32;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
  /// The dataset file could not be read.
  #[error("failed to read dataset {}: {source}", .path.display())]
  Io {
    /// Path of the dataset file.
    path: PathBuf,
    /// Underlying I/O error.
    #[source]
    source: std::io::Error,
  },
  /// The input has fewer or more tokens than its header announces.
  #[error("token count mismatch: expected {expected} tokens, found {found}")]
  Format {
    /// Number of tokens the header and library lines call for.
    expected: usize,
    /// Number of tokens actually present.
    found: usize,
  },
  /// A token is not a non-negative integer.
  #[error("invalid token {token:?} at position {position}")]
  InvalidToken {
    /// Zero-based index of the token.
    position: usize,
    /// The offending token.
    token: String,
  },
  /// A library lists a book id past the end of the book values.
  #[error("library {container} refers to unknown book {item}")]
  UnknownItem {
    /// The library.
    container: ContainerId,
    /// The book.
    item: ItemId,
  },
}

/// A library: it must sign up before it can scan its books.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Container {
  registration: u32,
  throughput: u32,
  items: Vec<ItemId>,
}

impl Container {
  /// Creates a library with unsorted `items`. Books are put in order once the
  /// library is handed to [`Dataset::new`].
  pub fn new(registration: u32, throughput: u32, items: Vec<ItemId>) -> Self {
    Self {
      registration,
      throughput,
      items,
    }
  }

  /// Number of days the sign-up takes.
  pub fn registration(&self) -> u32 {
    self.registration
  }

  /// Number of books scanned per day once signed up.
  pub fn throughput(&self) -> u32 {
    self.throughput
  }

  /// Books of this library, most valuable first.
  pub fn items(&self) -> &[ItemId] {
    &self.items
  }
}

/// The whole problem instance.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dataset {
  values: Vec<u32>,
  containers: Vec<Container>,
  days: u32,
}

impl Dataset {
  /// Builds a dataset from book values, libraries and the number of days.
  ///
  /// Books of each library are stably sorted by descending value.
  ///
  /// # Errors
  ///
  /// Fails if a library refers to a book outside of `values`.
  pub fn new(
    values: Vec<u32>,
    mut containers: Vec<Container>,
    days: u32,
  ) -> Result<Self, DatasetError> {
    for (id, container) in containers.iter_mut().enumerate() {
      if let Some(&item) =
        container.items.iter().find(|&&i| i as usize >= values.len())
      {
        return Err(DatasetError::UnknownItem {
          container: id as ContainerId,
          item,
        });
      }
      container
        .items
        .sort_by(|&a, &b| values[b as usize].cmp(&values[a as usize]));
    }
    Ok(Self {
      values,
      containers,
      days,
    })
  }

  /// Parses a dataset from its textual representation:
  /// ```text
  /// B L D
  /// <B book values>
  /// for each of L libraries:
  ///   <book count> <sign-up days> <books per day>
  ///   <book ids>
  /// ```
  /// Tokens may be separated by any whitespace.
  pub fn parse(text: &str) -> Result<Self, DatasetError> {
    let mut tokens = Tokens::new(text);

    tokens.expect(3)?;
    let item_count = tokens.next_u32()?;
    let container_count = tokens.next_u32()?;
    let days = tokens.next_u32()?;

    tokens.expect(item_count as usize)?;
    let values = (0..item_count)
      .map(|_| tokens.next_u32())
      .collect::<Result<Vec<_>, _>>()?;

    // every library takes at least 3 tokens
    let mut containers =
      Vec::with_capacity((container_count as usize).min(tokens.total / 3));
    for _ in 0..container_count {
      tokens.expect(3)?;
      let len = tokens.next_u32()?;
      let registration = tokens.next_u32()?;
      let throughput = tokens.next_u32()?;
      tokens.expect(len as usize)?;
      let items = (0..len)
        .map(|_| tokens.next_u32())
        .collect::<Result<Vec<_>, _>>()?;
      containers.push(Container::new(registration, throughput, items));
    }
    tokens.finish()?;

    Self::new(values, containers, days)
  }

  /// Reads and parses a dataset file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let dataset = Self::parse(&text)?;
    debug!(
      path = %path.display(),
      books = dataset.item_count(),
      libraries = dataset.container_count(),
      days = dataset.days(),
      "dataset loaded"
    );
    Ok(dataset)
  }

  /// Number of books.
  pub fn item_count(&self) -> usize {
    self.values.len()
  }

  /// Number of libraries.
  pub fn container_count(&self) -> usize {
    self.containers.len()
  }

  /// Number of days available for signing up and scanning.
  pub fn days(&self) -> u32 {
    self.days
  }

  /// Value of a book.
  ///
  /// # Panics
  ///
  /// Panics if `item` is out of range.
  pub fn value(&self, item: ItemId) -> u32 {
    self.values[item as usize]
  }

  /// Returns a library by its id.
  ///
  /// # Panics
  ///
  /// Panics if `id` is out of range.
  pub fn container(&self, id: ContainerId) -> &Container {
    &self.containers[id as usize]
  }

  /// All libraries, indexed by their ids.
  pub fn containers(&self) -> &[Container] {
    &self.containers
  }
}

/// A cursor over whitespace separated tokens that keeps track of how many
/// tokens the input announces.
struct Tokens<'a> {
  iter: SplitAsciiWhitespace<'a>,
  total: usize,
  consumed: usize,
  expected: usize,
}

impl<'a> Tokens<'a> {
  fn new(text: &'a str) -> Self {
    Self {
      iter: text.split_ascii_whitespace(),
      total: text.split_ascii_whitespace().count(),
      consumed: 0,
      expected: 0,
    }
  }

  /// Announces `n` more tokens, failing early if the input is too short.
  fn expect(&mut self, n: usize) -> Result<(), DatasetError> {
    self.expected += n;
    if self.expected > self.total {
      return Err(DatasetError::Format {
        expected: self.expected,
        found: self.total,
      });
    }
    Ok(())
  }

  fn next_u32(&mut self) -> Result<u32, DatasetError> {
    let token = self.iter.next().ok_or(DatasetError::Format {
      expected: self.expected.max(self.consumed + 1),
      found: self.total,
    })?;
    let position = self.consumed;
    self.consumed += 1;
    token.parse().map_err(|_| DatasetError::InvalidToken {
      position,
      token: token.to_owned(),
    })
  }

  /// Fails if there are tokens left over.
  fn finish(self) -> Result<(), DatasetError> {
    if self.total != self.expected {
      return Err(DatasetError::Format {
        expected: self.expected,
        found: self.total,
      });
    }
    Ok(())
  }
}
