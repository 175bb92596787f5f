//! Mathler expression representation
//!
//! An `Expression` stores the 8 symbols of a candidate along with the number of
//! times each symbol occurs, which is what the quota rules reason about.

use super::symbol::{SYMBOL_COUNT, Symbol};
use std::fmt;
use std::str::FromStr;

/// Number of symbols in every Mathler expression
pub const EXPRESSION_LEN: usize = 8;

/// An 8-symbol Mathler candidate with per-symbol occurrence counts
///
/// The corpus guarantees that each record is a valid formula for its target;
/// only the shape is checked here. Records are small and `Copy`, so candidate
/// pools can be filtered into fresh vectors without extra allocation per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expression {
    symbols: [Symbol; EXPRESSION_LEN],
    counts: [u8; SYMBOL_COUNT],
}

/// Error type for malformed expression strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    InvalidLength(usize),
    InvalidSymbol { position: usize, found: char },
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(
                    f,
                    "Expression must be exactly {EXPRESSION_LEN} symbols, got {len}"
                )
            }
            Self::InvalidSymbol { position, found } => write!(
                f,
                "Invalid symbol {found:?} at position {}, expected 0-9 + - * / ( )",
                position + 1
            ),
        }
    }
}

impl std::error::Error for ExpressionError {}

impl Expression {
    /// Parse an expression from text
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns `ExpressionError` if:
    /// - The trimmed text is not exactly 8 characters
    /// - A character is outside the Mathler alphabet
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::core::{Expression, Symbol};
    ///
    /// let expr = Expression::new("100-50-8").unwrap();
    /// assert_eq!(expr.symbol_at(3), Symbol::Minus);
    /// assert_eq!(expr.count_of(Symbol::Zero), 3);
    ///
    /// assert!(Expression::new("1+2").is_err());
    /// assert!(Expression::new("12+34=46").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, ExpressionError> {
        let text = text.trim();
        let len = text.chars().count();
        if len != EXPRESSION_LEN {
            return Err(ExpressionError::InvalidLength(len));
        }

        let mut symbols = [Symbol::Zero; EXPRESSION_LEN];
        for (position, ch) in text.chars().enumerate() {
            symbols[position] = Symbol::from_char(ch)
                .ok_or(ExpressionError::InvalidSymbol { position, found: ch })?;
        }

        Ok(Self::from_symbols(symbols))
    }

    /// Build an expression from already-validated symbols
    #[must_use]
    pub fn from_symbols(symbols: [Symbol; EXPRESSION_LEN]) -> Self {
        let mut counts = [0u8; SYMBOL_COUNT];
        for symbol in symbols {
            counts[symbol.index()] += 1;
        }
        Self { symbols, counts }
    }

    #[inline]
    #[must_use]
    pub const fn symbols(&self) -> &[Symbol; EXPRESSION_LEN] {
        &self.symbols
    }

    /// Get the symbol at a specific position (0-7)
    ///
    /// # Panics
    /// Panics if position >= 8
    #[inline]
    #[must_use]
    pub const fn symbol_at(&self, position: usize) -> Symbol {
        self.symbols[position]
    }

    /// Number of occurrences of `symbol` anywhere in the expression
    #[inline]
    #[must_use]
    pub const fn count_of(&self, symbol: Symbol) -> u8 {
        self.counts[symbol.index()]
    }

    #[inline]
    #[must_use]
    pub const fn counts(&self) -> &[u8; SYMBOL_COUNT] {
        &self.counts
    }

    /// Check if the expression contains `symbol`
    #[inline]
    #[must_use]
    pub const fn contains(&self, symbol: Symbol) -> bool {
        self.count_of(symbol) > 0
    }

    /// True when no symbol occurs more than once
    ///
    /// Repeat-free expressions make the best opening guesses: every position
    /// reports on a different symbol.
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::core::Expression;
    ///
    /// assert!(Expression::new("98-76+51").unwrap().has_unique_symbols());
    /// assert!(!Expression::new("100-50-8").unwrap().has_unique_symbols());
    /// ```
    #[must_use]
    pub fn has_unique_symbols(&self) -> bool {
        self.counts.iter().all(|&count| count <= 1)
    }

    /// Render the expression as a `String`
    #[must_use]
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.as_char()).collect()
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
