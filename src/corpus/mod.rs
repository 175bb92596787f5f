//! Expression corpus access
//!
//! A corpus maps a target value to the expressions that evaluate to it. The
//! solver trusts the corpus: expressions are only checked for shape, never
//! evaluated.

pub mod loader;

pub use loader::FileCorpus;

use crate::core::Expression;
use crate::solver::filter::repeat_free;
use rustc_hash::FxHashMap;
use std::fmt;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Error type for corpus access
#[derive(Debug)]
pub enum CorpusError {
    /// The corpus could not be opened or read
    Io { path: PathBuf, source: io::Error },
    /// A line could not be parsed (1-based line number)
    Malformed { line: usize, reason: String },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read corpus {}: {source}", path.display())
            }
            Self::Malformed { line, reason } => {
                write!(f, "Malformed corpus entry on line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { .. } => None,
        }
    }
}

/// Lookup of candidate expressions by target value
pub trait Corpus {
    /// All expressions evaluating to `target`, in corpus order
    ///
    /// # Errors
    ///
    /// Returns `CorpusError` if the backing store cannot be read.
    fn lookup(&self, target: i64) -> Result<Vec<Expression>, CorpusError>;

    /// Expressions for `target` in which no symbol repeats, in corpus order
    ///
    /// # Errors
    ///
    /// Returns `CorpusError` if the backing store cannot be read.
    fn lookup_unique(&self, target: i64) -> Result<Vec<Expression>, CorpusError> {
        Ok(repeat_free(&self.lookup(target)?))
    }
}

/// Corpus held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    entries: FxHashMap<i64, Vec<Expression>>,
}

impl MemoryCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `expr` to the entries for `target`
    pub fn insert(&mut self, target: i64, expr: Expression) {
        self.entries.entry(target).or_default().push(expr);
    }

    /// Build a corpus from `(target, expression)` pairs
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Malformed` for the first expression that fails to
    /// parse; `line` is its 1-based index in `entries`.
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::corpus::{Corpus, MemoryCorpus};
    ///
    /// let corpus = MemoryCorpus::from_entries([(42, "100-50-8"), (42, "(28-7)*2")]).unwrap();
    /// assert_eq!(corpus.lookup(42).unwrap().len(), 2);
    /// assert!(corpus.lookup(7).unwrap().is_empty());
    /// ```
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = (i64, &'a str)>,
    {
        let mut corpus = Self::new();
        for (index, (target, text)) in entries.into_iter().enumerate() {
            let expr = Expression::new(text).map_err(|e| CorpusError::Malformed {
                line: index + 1,
                reason: e.to_string(),
            })?;
            corpus.insert(target, expr);
        }
        Ok(corpus)
    }

    /// Read every entry from corpus text
    ///
    /// Accepts the same format as `FileCorpus`.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::Io` on read failure (with an empty path) or
    /// `CorpusError::Malformed` for a bad line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CorpusError> {
        let mut corpus = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CorpusError::Io {
                path: PathBuf::new(),
                source,
            })?;
            let line_no = index + 1;
            if let Some((target, text)) = loader::split_entry(&line, line_no)? {
                corpus.insert(target, loader::parse_expression(text, line_no)?);
            }
        }
        Ok(corpus)
    }

    /// Number of distinct target values
    #[must_use]
    pub fn targets(&self) -> usize {
        self.entries.len()
    }

    /// Total number of expressions across all targets
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Corpus for MemoryCorpus {
    fn lookup(&self, target: i64) -> Result<Vec<Expression>, CorpusError> {
        Ok(self.entries.get(&target).cloned().unwrap_or_default())
    }
}
