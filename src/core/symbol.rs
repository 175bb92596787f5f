//! The closed Mathler alphabet
//!
//! Every position of an expression holds one of 16 symbols: the ten digits,
//! the four arithmetic operators and the two parentheses.

use std::fmt;

/// Number of distinct symbols in the alphabet
pub const SYMBOL_COUNT: usize = 16;

/// One symbol of a Mathler expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Plus,
    Minus,
    Times,
    Divide,
    Open,
    Close,
}

impl Symbol {
    /// All symbols, ordered by [`Symbol::index`]
    pub const ALL: [Self; SYMBOL_COUNT] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Plus,
        Self::Minus,
        Self::Times,
        Self::Divide,
        Self::Open,
        Self::Close,
    ];

    /// Parse a single character
    ///
    /// Returns `None` for anything outside `0-9 + - * / ( )`.
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::core::Symbol;
    ///
    /// assert_eq!(Symbol::from_char('7'), Some(Symbol::Seven));
    /// assert_eq!(Symbol::from_char('/'), Some(Symbol::Divide));
    /// assert_eq!(Symbol::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        let symbol = match ch {
            '0' => Self::Zero,
            '1' => Self::One,
            '2' => Self::Two,
            '3' => Self::Three,
            '4' => Self::Four,
            '5' => Self::Five,
            '6' => Self::Six,
            '7' => Self::Seven,
            '8' => Self::Eight,
            '9' => Self::Nine,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Times,
            '/' => Self::Divide,
            '(' => Self::Open,
            ')' => Self::Close,
            _ => return None,
        };
        Some(symbol)
    }

    /// The character this symbol is written as
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
            Self::Divide => '/',
            Self::Open => '(',
            Self::Close => ')',
        }
    }

    /// Dense index in `0..SYMBOL_COUNT`, used to key per-symbol tables
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit for this symbol in a 16-bit symbol set
    #[inline]
    #[must_use]
    pub(crate) const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    #[must_use]
    pub const fn is_digit(self) -> bool {
        (self as usize) < 10
    }

    #[must_use]
    pub const fn is_operator(self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Times | Self::Divide)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
