//! Mathler feedback rows
//!
//! Each guess is answered with one color per position:
//! - Dark: the symbol has no occurrences beyond those already colored in this guess
//! - Yellow: the symbol occurs in the answer, but not here
//! - Green: the symbol is correct at this position
//!
//! Operators enter feedback as an 8-letter code such as `ggdydydg`.

use super::expression::{EXPRESSION_LEN, Expression};
use super::symbol::SYMBOL_COUNT;
use std::fmt;
use std::str::FromStr;

/// Color of a single feedback tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Dark,
    Yellow,
    Green,
}

impl Color {
    /// Parse one lowercase feedback letter: `d`, `y` or `g`
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(Self::Dark),
            'y' => Some(Self::Yellow),
            'g' => Some(Self::Green),
            _ => None,
        }
    }

    /// The letter used in the operator feedback code
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Dark => 'd',
            Self::Yellow => 'y',
            Self::Green => 'g',
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Dark => '⬛',
            Self::Yellow => '🟨',
            Self::Green => '🟩',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

/// Error type for malformed feedback codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    InvalidLength(usize),
    InvalidColor { position: usize, found: char },
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(
                f,
                "Feedback must be exactly {EXPRESSION_LEN} colors, got {len}"
            ),
            Self::InvalidColor { position, found } => write!(
                f,
                "Invalid color {found:?} at position {}, use d=dark, y=yellow, g=green",
                position + 1
            ),
        }
    }
}

impl std::error::Error for FeedbackError {}

/// Feedback for one guess: a color per position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([Color; EXPRESSION_LEN]);

impl Feedback {
    /// All greens (the guess is the answer)
    pub const SOLVED: Self = Self([Color::Green; EXPRESSION_LEN]);

    #[must_use]
    pub const fn new(colors: [Color; EXPRESSION_LEN]) -> Self {
        Self(colors)
    }

    #[inline]
    #[must_use]
    pub const fn colors(&self) -> &[Color; EXPRESSION_LEN] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub const fn color_at(&self, position: usize) -> Color {
        self.0[position]
    }

    /// Check if every tile is green
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&c| c == Color::Green)
    }

    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.0.iter().filter(|&&c| c == color).count()
    }

    /// Calculate the feedback `answer` gives when `guess` is played
    ///
    /// Implements the Wordle duplicate rule: greens are assigned first and use up
    /// occurrences of their symbol, then yellows are handed out left to right
    /// while unmatched occurrences remain. Everything else is dark.
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::core::{Expression, Feedback};
    ///
    /// let guess = Expression::new("55+12-3*").unwrap();
    /// let answer = Expression::new("1+25-3*4").unwrap();
    /// let feedback = Feedback::calculate(&guess, &answer);
    ///
    /// // Only one 5 in the answer: the first is yellow, the second dark
    /// assert_eq!(feedback.to_string(), "ydyyyyyy");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Expression, answer: &Expression) -> Self {
        let mut colors = [Color::Dark; EXPRESSION_LEN];
        let mut available = [0u8; SYMBOL_COUNT];

        // First pass: greens, and collect unmatched answer symbols
        for (i, color) in colors.iter_mut().enumerate() {
            let symbol = answer.symbol_at(i);
            if guess.symbol_at(i) == symbol {
                *color = Color::Green;
            } else {
                available[symbol.index()] += 1;
            }
        }

        // Second pass: yellows from what is left
        for (i, color) in colors.iter_mut().enumerate() {
            if *color == Color::Green {
                continue;
            }
            let remaining = &mut available[guess.symbol_at(i).index()];
            if *remaining > 0 {
                *color = Color::Yellow;
                *remaining -= 1;
            }
        }

        Self(colors)
    }

    /// Convert feedback to an emoji row such as "🟩🟨⬛🟩🟨🟨⬛🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|c| c.emoji()).collect()
    }
}

impl FromStr for Feedback {
    type Err = FeedbackError;

    /// Parse an operator feedback code such as `ggdydydg`
    ///
    /// Only lowercase `d`/`y`/`g` are accepted. Surrounding whitespace is
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != EXPRESSION_LEN {
            return Err(FeedbackError::InvalidLength(len));
        }

        let mut colors = [Color::Dark; EXPRESSION_LEN];
        for (position, ch) in s.chars().enumerate() {
            colors[position] =
                Color::from_char(ch).ok_or(FeedbackError::InvalidColor { position, found: ch })?;
        }
        Ok(Self(colors))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in &self.0 {
            write!(f, "{}", color.code())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(text: &str) -> Expression {
        Expression::new(text).unwrap()
    }

    #[test]
    fn solved_constant() {
        assert!(Feedback::SOLVED.is_solved());
        assert_eq!(Feedback::SOLVED.count(Color::Green), 8);
        assert_eq!(Feedback::SOLVED.to_string(), "gggggggg");
    }

    #[test]
    fn parse_valid_codes() {
        let fb: Feedback = "ggdydydg".parse().unwrap();
        assert_eq!(fb.color_at(0), Color::Green);
        assert_eq!(fb.color_at(2), Color::Dark);
        assert_eq!(fb.color_at(3), Color::Yellow);
        assert_eq!(fb.to_string(), "ggdydydg");
        assert_eq!(" ggdydydg\n".parse::<Feedback>(), Ok(fb));
    }

    #[test]
    fn parse_rejects_uppercase_and_emoji() {
        assert_eq!(
            "GGDYDYDG".parse::<Feedback>(),
            Err(FeedbackError::InvalidColor {
                position: 0,
                found: 'G'
            })
        );
        assert_eq!(
            "ggdYdydg".parse::<Feedback>(),
            Err(FeedbackError::InvalidColor {
                position: 3,
                found: 'Y'
            })
        );
        assert!("🟩🟩⬛🟨⬛🟨⬛🟩".parse::<Feedback>().is_err());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "gggg".parse::<Feedback>(),
            Err(FeedbackError::InvalidLength(4))
        );
        assert_eq!(
            "ggggggggg".parse::<Feedback>(),
            Err(FeedbackError::InvalidLength(9))
        );
        assert_eq!("".parse::<Feedback>(), Err(FeedbackError::InvalidLength(0)));
    }

    #[test]
    fn parse_rejects_unknown_letters() {
        assert_eq!(
            "ggdxdydg".parse::<Feedback>(),
            Err(FeedbackError::InvalidColor {
                position: 3,
                found: 'x'
            })
        );
        assert!("gg-ydydg".parse::<Feedback>().is_err());
    }

    #[test]
    fn calculate_exact_match() {
        let e = expr("100-50-8");
        assert_eq!(Feedback::calculate(&e, &e), Feedback::SOLVED);
    }

    #[test]
    fn calculate_all_dark() {
        let fb = Feedback::calculate(&expr("12+34*56"), &expr("789/(7-9"));
        assert_eq!(fb.count(Color::Dark), 8);
    }

    #[test]
    fn calculate_duplicate_guess_symbol_single_in_answer() {
        // Answer has one 5; the guess has two, neither in place
        let fb = Feedback::calculate(&expr("55+12-3*"), &expr("1+25-3*4"));
        assert_eq!(fb.color_at(0), Color::Yellow);
        assert_eq!(fb.color_at(1), Color::Dark);
    }

    #[test]
    fn calculate_green_takes_priority_over_yellow() {
        // The second 5 is in place, so the first one gets nothing
        let fb = Feedback::calculate(&expr("55+12-3*"), &expr("15+2-3*4"));
        assert_eq!(fb.color_at(0), Color::Dark);
        assert_eq!(fb.color_at(1), Color::Green);
    }

    #[test]
    fn calculate_duplicates_in_both() {
        // Answer has two 1s, guess has three
        let fb = Feedback::calculate(&expr("111+2*34"), &expr("21+1*345"));
        assert_eq!(fb.color_at(0), Color::Yellow);
        assert_eq!(fb.color_at(1), Color::Green);
        assert_eq!(fb.color_at(2), Color::Dark);
        assert_eq!(fb.count(Color::Green) + fb.count(Color::Yellow), 7);
    }

    #[test]
    fn emoji_rendering() {
        let fb: Feedback = "gydgydgy".parse().unwrap();
        assert_eq!(fb.to_emoji(), "🟩🟨⬛🟩🟨⬛🟩🟨");
    }
}
