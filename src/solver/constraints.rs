//! Accumulated knowledge from feedback rounds
//!
//! A `ConstraintState` records what the feedback has revealed so far:
//! - which symbol sits at each position (greens)
//! - which symbols cannot sit at each position (yellows and darks)
//! - how many times each symbol may occur (quotas)
//!
//! # Quota rules
//!
//! Green and yellow tiles each prove one occurrence of their symbol, so the
//! number of colored tiles in a guess is a lower bound. A dark tile for a symbol
//! means the answer holds no occurrences beyond the colored ones in the same
//! guess, which pins the upper bound to that lower bound. For example `5` colored
//! yellow and dark in one guess means exactly one `5`.
//!
//! The lower bound is recomputed from each new guess. Symbols that have been dark
//! in any round keep their pinned quota, so `max_count == min_count` holds for
//! them after every round.

use crate::core::{Color, EXPRESSION_LEN, Expression, Feedback, SYMBOL_COUNT, Symbol};

/// Feedback-derived constraints on the answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintState {
    guaranteed: [Option<Symbol>; EXPRESSION_LEN],
    forbidden: [u16; EXPRESSION_LEN],
    min_count: [u8; SYMBOL_COUNT],
    max_count: [u8; SYMBOL_COUNT],
    ever_gray: [bool; SYMBOL_COUNT],
    rounds: usize,
}

impl Default for ConstraintState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintState {
    /// A state with no knowledge: every symbol may occur 0 to 8 times anywhere
    #[must_use]
    pub const fn new() -> Self {
        Self {
            guaranteed: [None; EXPRESSION_LEN],
            forbidden: [0; EXPRESSION_LEN],
            min_count: [0; SYMBOL_COUNT],
            max_count: [EXPRESSION_LEN as u8; SYMBOL_COUNT],
            ever_gray: [false; SYMBOL_COUNT],
            rounds: 0,
        }
    }

    /// Fold one confirmed `(guess, feedback)` round into the state
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::core::{Expression, Symbol};
    /// use mathler_solver::solver::ConstraintState;
    ///
    /// let mut state = ConstraintState::new();
    /// let guess = Expression::new("52+35-14").unwrap();
    /// state.apply(&guess, &"ydddddyd".parse().unwrap());
    ///
    /// // One 5 colored, one dark: exactly one 5
    /// assert_eq!(state.min_count(Symbol::Five), 1);
    /// assert_eq!(state.max_count(Symbol::Five), 1);
    /// assert_eq!(state.rounds(), 1);
    /// ```
    pub fn apply(&mut self, guess: &Expression, feedback: &Feedback) {
        self.rounds += 1;
        self.min_count = [0; SYMBOL_COUNT];
        let mut dark_now = [false; SYMBOL_COUNT];

        for (pos, (&symbol, &color)) in guess.symbols().iter().zip(feedback.colors()).enumerate() {
            let idx = symbol.index();
            match color {
                Color::Dark => {
                    self.ever_gray[idx] = true;
                    dark_now[idx] = true;
                    self.forbidden[pos] |= symbol.bit();
                }
                Color::Yellow => {
                    self.min_count[idx] += 1;
                    self.forbidden[pos] |= symbol.bit();
                }
                Color::Green => {
                    self.min_count[idx] += 1;
                    self.guaranteed[pos] = Some(symbol);
                }
            }
        }

        self.pin_gray_quotas(&dark_now);
    }

    /// Pin quotas for symbols that have been dark
    ///
    /// Dark this round: the upper bound drops to this round's colored count.
    /// Every symbol that has ever been dark then has an exact quota, which is
    /// also its lower bound, even if this guess omitted the symbol. Colors that
    /// contradict an earlier quota leave it unchanged; the pool then empties.
    fn pin_gray_quotas(&mut self, dark_now: &[bool; SYMBOL_COUNT]) {
        for idx in 0..SYMBOL_COUNT {
            if dark_now[idx] {
                self.max_count[idx] = self.max_count[idx].min(self.min_count[idx]);
            }
            if self.ever_gray[idx] {
                self.min_count[idx] = self.max_count[idx];
            }
        }
    }

    /// Check whether `candidate` satisfies every constraint
    ///
    /// A candidate survives when it matches each known green, avoids each
    /// forbidden symbol at its position, and every symbol count lies within
    /// `min_count..=max_count`.
    #[must_use]
    pub fn admits(&self, candidate: &Expression) -> bool {
        for (pos, &symbol) in candidate.symbols().iter().enumerate() {
            if let Some(known) = self.guaranteed[pos]
                && known != symbol
            {
                return false;
            }
            if self.forbidden[pos] & symbol.bit() != 0 {
                return false;
            }
        }

        candidate
            .counts()
            .iter()
            .zip(self.min_count.iter().zip(&self.max_count))
            .all(|(&count, (&min, &max))| min <= count && count <= max)
    }

    /// Symbol confirmed at `position`, if any
    #[must_use]
    pub const fn guaranteed(&self, position: usize) -> Option<Symbol> {
        self.guaranteed[position]
    }

    /// Whether `symbol` is known not to be at `position`
    #[must_use]
    pub const fn is_forbidden(&self, position: usize, symbol: Symbol) -> bool {
        self.forbidden[position] & symbol.bit() != 0
    }

    /// Symbols known not to be at `position`, in alphabet order
    #[must_use]
    pub fn forbidden_at(&self, position: usize) -> Vec<Symbol> {
        Symbol::ALL
            .into_iter()
            .filter(|&s| self.is_forbidden(position, s))
            .collect()
    }

    #[must_use]
    pub const fn min_count(&self, symbol: Symbol) -> u8 {
        self.min_count[symbol.index()]
    }

    #[must_use]
    pub const fn max_count(&self, symbol: Symbol) -> u8 {
        self.max_count[symbol.index()]
    }

    /// Whether `symbol` has been dark in any round
    #[must_use]
    pub const fn ever_gray(&self, symbol: Symbol) -> bool {
        self.ever_gray[symbol.index()]
    }

    /// Number of rounds applied so far
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Symbols ruled out entirely (quota of zero)
    #[must_use]
    pub fn excluded_symbols(&self) -> Vec<Symbol> {
        Symbol::ALL
            .into_iter()
            .filter(|&s| self.max_count(s) == 0)
            .collect()
    }
}
