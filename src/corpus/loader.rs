//! Corpus file loading
//!
//! The corpus file holds one entry per line: a target value and an expression,
//! separated by a comma or a tab. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! # target,expression
//! 42,100-50-8
//! 42,(28-7)*2
//! ```

use super::{Corpus, CorpusError};
use crate::core::Expression;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Default corpus file name
pub const DEFAULT_CORPUS: &str = "valid_guesses.csv";

/// Corpus read from a text file on each lookup
///
/// The file is streamed; only lines for the requested target are parsed into
/// expressions.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CorpusError {
        CorpusError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Corpus for FileCorpus {
    fn lookup(&self, target: i64) -> Result<Vec<Expression>, CorpusError> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        read_target(BufReader::new(file), target).map_err(|e| match e {
            CorpusError::Io { source, .. } => self.io_error(source),
            malformed @ CorpusError::Malformed { .. } => malformed,
        })
    }
}

/// Collect the expressions for `target` from corpus text
///
/// # Errors
///
/// Returns `CorpusError::Io` on read failure, or `CorpusError::Malformed` if a
/// line has no parsable target value or a matching line has a bad expression.
///
/// # Examples
/// ```
/// use mathler_solver::corpus::loader::read_target;
///
/// let text = "42,100-50-8\n7,49/7+0*1\n42,(28-7)*2\n";
/// let found = read_target(text.as_bytes(), 42).unwrap();
/// assert_eq!(found.len(), 2);
/// ```
pub fn read_target<R: BufRead>(reader: R, target: i64) -> Result<Vec<Expression>, CorpusError> {
    let mut found = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CorpusError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let line_no = index + 1;
        if let Some((value, text)) = split_entry(&line, line_no)?
            && value == target
        {
            found.push(parse_expression(text, line_no)?);
        }
    }
    Ok(found)
}

/// Split a line into its target value and expression text
///
/// Returns `Ok(None)` for blank and comment lines.
pub(crate) fn split_entry(line: &str, line_no: usize) -> Result<Option<(i64, &str)>, CorpusError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (value, text) = trimmed
        .split_once([',', '\t'])
        .ok_or_else(|| CorpusError::Malformed {
            line: line_no,
            reason: format!("expected `target,expression`, got `{trimmed}`"),
        })?;

    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| CorpusError::Malformed {
            line: line_no,
            reason: format!("bad target value `{}`: {e}", value.trim()),
        })?;

    Ok(Some((value, text.trim())))
}

pub(crate) fn parse_expression(text: &str, line_no: usize) -> Result<Expression, CorpusError> {
    Expression::new(text).map_err(|e| CorpusError::Malformed {
        line: line_no,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn split_entry_accepts_comma_and_tab() {
        assert_eq!(split_entry("42,100-50-8", 1).unwrap(), Some((42, "100-50-8")));
        assert_eq!(split_entry("42\t100-50-8", 1).unwrap(), Some((42, "100-50-8")));
        assert_eq!(split_entry("  -5 , 12-17+0 ", 1).unwrap(), Some((-5, "12-17+0")));
    }

    #[test]
    fn split_entry_skips_blank_and_comments() {
        assert_eq!(split_entry("", 1).unwrap(), None);
        assert_eq!(split_entry("   ", 1).unwrap(), None);
        assert_eq!(split_entry("# header", 1).unwrap(), None);
    }

    #[test]
    fn split_entry_rejects_missing_separator() {
        let err = split_entry("42 100-50-8", 3).unwrap_err();
        assert!(matches!(err, CorpusError::Malformed { line: 3, .. }));
    }

    #[test]
    fn split_entry_rejects_bad_target() {
        let err = split_entry("forty,100-50-8", 9).unwrap_err();
        assert!(matches!(err, CorpusError::Malformed { line: 9, .. }));
    }

    #[test]
    fn read_target_ignores_other_values() {
        // The bad expression belongs to another target and is never parsed
        let text = "42,100-50-8\n7,not-an-expr\n42,(28-7)*2\n";
        let found = read_target(text.as_bytes(), 42).unwrap();
        let texts: Vec<String> = found.iter().map(Expression::text).collect();
        assert_eq!(texts, vec!["100-50-8", "(28-7)*2"]);
    }

    #[test]
    fn read_target_rejects_bad_matching_line() {
        let text = "42,100-50-8\n42,100-50-\n";
        let err = read_target(text.as_bytes(), 42).unwrap_err();
        assert!(matches!(err, CorpusError::Malformed { line: 2, .. }));
    }

    #[test]
    fn file_corpus_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "mathler_solver_corpus_{}.csv",
            std::process::id()
        ));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "# target,expression").unwrap();
            writeln!(file, "42,100-50-8").unwrap();
            writeln!(file, "42,12+34*56").unwrap();
            writeln!(file, "43,100-50-7").unwrap();
        }

        let corpus = FileCorpus::new(&path);
        assert_eq!(corpus.lookup(42).unwrap().len(), 2);
        assert_eq!(corpus.lookup_unique(42).unwrap().len(), 1);
        assert_eq!(corpus.lookup(43).unwrap().len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_corpus_missing_file() {
        let corpus = FileCorpus::new("/nonexistent/mathler/valid_guesses.csv");
        let err = corpus.lookup(42).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
        assert!(err.to_string().contains("valid_guesses.csv"));
    }
}
