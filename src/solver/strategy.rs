//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations. A strategy only
//! picks among candidates; feedback handling lives in the session and never
//! depends on which strategy is in use.

use super::frequency;
use crate::core::Expression;

/// A strategy for selecting the next guess from the remaining candidates
pub trait Strategy {
    /// Select the best guess from `candidates`
    ///
    /// Returns `None` if `candidates` is empty.
    fn select_guess<'a>(&self, candidates: &'a [Expression]) -> Option<&'a Expression>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// Positional frequency product (default)
    Frequency(FrequencyStrategy),
    /// Uniform random choice among candidates
    Random(RandomStrategy),
}

impl Strategy for StrategyType {
    fn select_guess<'a>(&self, candidates: &'a [Expression]) -> Option<&'a Expression> {
        match self {
            Self::Frequency(s) => s.select_guess(candidates),
            Self::Random(s) => s.select_guess(candidates),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "frequency", "random".
    /// Defaults to frequency if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "random" => Self::Random(RandomStrategy),
            _ => Self::Frequency(FrequencyStrategy),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Frequency(_) => "frequency",
            Self::Random(_) => "random",
        }
    }
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::Frequency(FrequencyStrategy)
    }
}

/// Highest product of positional symbol frequencies, first candidate on ties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencyStrategy;

impl Strategy for FrequencyStrategy {
    fn select_guess<'a>(&self, candidates: &'a [Expression]) -> Option<&'a Expression> {
        frequency::select_best_guess(candidates).map(|(best, _)| best)
    }
}

/// Random strategy
///
/// Picks any remaining candidate. Useful as a baseline for benchmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn select_guess<'a>(&self, candidates: &'a [Expression]) -> Option<&'a Expression> {
        use rand::prelude::IndexedRandom;

        candidates.choose(&mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_candidates() -> Vec<Expression> {
        ["12+34*56", "12+34*65", "21+34*56"]
            .iter()
            .map(|t| Expression::new(t).unwrap())
            .collect()
    }

    #[test]
    fn frequency_strategy_selects_majority_shape() {
        let candidates = setup_candidates();
        let guess = FrequencyStrategy.select_guess(&candidates).unwrap();
        assert_eq!(guess.text(), "12+34*56");
    }

    #[test]
    fn random_strategy_selects_from_candidates() {
        let candidates = setup_candidates();
        let guess = RandomStrategy.select_guess(&candidates).unwrap();
        assert!(candidates.contains(guess));
    }

    #[test]
    fn strategies_return_none_on_empty_pool() {
        assert!(FrequencyStrategy.select_guess(&[]).is_none());
        assert!(RandomStrategy.select_guess(&[]).is_none());
    }

    #[test]
    fn from_name_parses_known_names() {
        assert_eq!(
            StrategyType::from_name("random"),
            StrategyType::Random(RandomStrategy)
        );
        assert_eq!(
            StrategyType::from_name("frequency"),
            StrategyType::Frequency(FrequencyStrategy)
        );
        assert_eq!(StrategyType::from_name("bogus"), StrategyType::default());
        assert_eq!(StrategyType::from_name("random").name(), "random");
    }

    #[test]
    fn enum_dispatch_matches_inner_strategy() {
        let candidates = setup_candidates();
        let direct = FrequencyStrategy.select_guess(&candidates);
        let wrapped = StrategyType::default().select_guess(&candidates);
        assert_eq!(direct, wrapped);
    }
}
