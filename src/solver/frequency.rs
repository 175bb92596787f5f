//! Positional symbol frequency scoring
//!
//! For each position we count how often every symbol appears there across the
//! candidates and read the relative counts as per-position likelihoods. An
//! expression scores the product of the likelihoods of its own symbols, and
//! the highest-scoring candidate is the guess.
//!
//! This is a heuristic proxy for information gain. Positions are treated as
//! independent, which they are not, so it makes no optimality claim.

use crate::core::{EXPRESSION_LEN, Expression, SYMBOL_COUNT, Symbol};
use rayon::prelude::*;

/// Candidates per counting shard
const SHARD_SIZE: usize = 4096;

/// Symbol counts per position over a candidate collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionFrequencies {
    counts: [[usize; SYMBOL_COUNT]; EXPRESSION_LEN],
    total: usize,
}

impl PositionFrequencies {
    /// Count symbols per position
    ///
    /// Shards are counted in parallel and summed, so the result does not
    /// depend on scheduling.
    #[must_use]
    pub fn from_candidates(candidates: &[Expression]) -> Self {
        candidates
            .par_chunks(SHARD_SIZE)
            .map(Self::count_shard)
            .reduce(Self::empty, Self::merge)
    }

    fn empty() -> Self {
        Self {
            counts: [[0; SYMBOL_COUNT]; EXPRESSION_LEN],
            total: 0,
        }
    }

    fn count_shard(shard: &[Expression]) -> Self {
        let mut freq = Self::empty();
        for expr in shard {
            for (pos, symbol) in expr.symbols().iter().enumerate() {
                freq.counts[pos][symbol.index()] += 1;
            }
        }
        freq.total = shard.len();
        freq
    }

    fn merge(mut self, other: Self) -> Self {
        for (row, other_row) in self.counts.iter_mut().zip(&other.counts) {
            for (count, other_count) in row.iter_mut().zip(other_row) {
                *count += other_count;
            }
        }
        self.total += other.total;
        self
    }

    /// Number of candidates counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Candidates with `symbol` at `position`
    #[must_use]
    pub const fn count(&self, position: usize, symbol: Symbol) -> usize {
        self.counts[position][symbol.index()]
    }

    /// Relative frequency of `symbol` at `position` (0.0 for an empty table)
    #[must_use]
    pub fn relative(&self, position: usize, symbol: Symbol) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(position, symbol) as f64 / self.total as f64
    }

    /// Product of the relative frequencies of the symbols of `expr`
    ///
    /// # Examples
    /// ```
    /// use mathler_solver::core::Expression;
    /// use mathler_solver::solver::frequency::PositionFrequencies;
    ///
    /// let pool: Vec<Expression> = ["12+34*56", "12+34*65"]
    ///     .iter()
    ///     .map(|s| Expression::new(s).unwrap())
    ///     .collect();
    /// let freq = PositionFrequencies::from_candidates(&pool);
    ///
    /// // Six shared positions score 1.0, the last two 0.5 each
    /// assert!((freq.score(&pool[0]) - 0.25).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn score(&self, expr: &Expression) -> f64 {
        expr.symbols()
            .iter()
            .enumerate()
            .map(|(pos, &symbol)| self.relative(pos, symbol))
            .product()
    }
}

/// Select the candidate with the highest frequency score
///
/// Returns the winner and its score, or `None` for an empty collection. Exact
/// ties go to the candidate that comes first, so the choice is reproducible
/// for a given pool order even though scoring runs in parallel.
#[must_use]
pub fn select_best_guess(candidates: &[Expression]) -> Option<(&Expression, f64)> {
    if candidates.is_empty() {
        return None;
    }

    let freq = PositionFrequencies::from_candidates(candidates);
    let (index, score) = candidates
        .par_iter()
        .enumerate()
        .map(|(i, expr)| (i, freq.score(expr)))
        .reduce_with(pick_earliest_best)?;

    Some((&candidates[index], score))
}

/// Keep the higher score; on an exact tie keep the lower index
fn pick_earliest_best(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    match a.1.total_cmp(&b.1) {
        std::cmp::Ordering::Greater => a,
        std::cmp::Ordering::Less => b,
        std::cmp::Ordering::Equal => {
            if a.0 <= b.0 {
                a
            } else {
                b
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(texts: &[&str]) -> Vec<Expression> {
        texts.iter().map(|t| Expression::new(t).unwrap()).collect()
    }

    #[test]
    fn counts_per_position() {
        let candidates = pool(&["12+34*56", "13+24*56", "92+34-56"]);
        let freq = PositionFrequencies::from_candidates(&candidates);

        assert_eq!(freq.total(), 3);
        assert_eq!(freq.count(0, Symbol::One), 2);
        assert_eq!(freq.count(0, Symbol::Nine), 1);
        assert_eq!(freq.count(2, Symbol::Plus), 3);
        assert_eq!(freq.count(5, Symbol::Times), 2);
        assert_eq!(freq.count(5, Symbol::Minus), 1);
        assert!((freq.relative(2, Symbol::Plus) - 1.0).abs() < f64::EPSILON);
        assert!((freq.relative(0, Symbol::Nine) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sharded_counts_match_single_pass() {
        // Enough candidates to span several shards
        let base = pool(&["12+34*56", "13+24*56", "92+34-56", "(9+3)*12"]);
        let many: Vec<Expression> = base
            .iter()
            .copied()
            .cycle()
            .take(SHARD_SIZE * 3 + 7)
            .collect();

        let sharded = PositionFrequencies::from_candidates(&many);
        let single = PositionFrequencies::count_shard(&many);
        assert_eq!(sharded, single);
    }

    #[test]
    fn empty_table_scores_zero() {
        let freq = PositionFrequencies::from_candidates(&[]);
        assert_eq!(freq.total(), 0);
        let expr = Expression::new("12+34*56").unwrap();
        assert!(freq.score(&expr).abs() < f64::EPSILON);
    }

    #[test]
    fn selects_strictly_higher_score() {
        // The last two differ by one swapped pair of positions; the first
        // shares more symbols with the majority
        let candidates = pool(&["12+34*56", "12+34*65", "12+34*56", "21+34*56"]);
        let (best, score) = select_best_guess(&candidates).unwrap();
        assert_eq!(best.text(), "12+34*56");
        assert!(score > 0.0);

        let swapped = pool(&["21+34*65", "12+34*56", "12+34*56"]);
        let (best, _) = select_best_guess(&swapped).unwrap();
        assert_eq!(best.text(), "12+34*56");
    }

    #[test]
    fn exact_tie_keeps_first_in_order() {
        // Mirror images: every position splits 50/50, so both score 1/256
        let forward = pool(&["12+34*56", "65*43+21"]);
        let (best, score) = select_best_guess(&forward).unwrap();
        assert_eq!(best.text(), "12+34*56");
        assert!((score - 0.5f64.powi(8)).abs() < 1e-15);

        let reversed = pool(&["65*43+21", "12+34*56"]);
        let (best, _) = select_best_guess(&reversed).unwrap();
        assert_eq!(best.text(), "65*43+21");
    }

    #[test]
    fn tie_break_is_stable_across_large_pools() {
        let pair = pool(&["12+34*56", "65*43+21"]);
        let many: Vec<Expression> = pair.iter().copied().cycle().take(10_000).collect();
        for _ in 0..5 {
            let (best, _) = select_best_guess(&many).unwrap();
            assert_eq!(best.text(), "12+34*56");
        }
    }

    #[test]
    fn empty_pool_returns_none() {
        assert!(select_best_guess(&[]).is_none());
    }

    #[test]
    fn single_candidate_scores_one() {
        let only = pool(&["100-50-8"]);
        let (best, score) = select_best_guess(&only).unwrap();
        assert_eq!(best.text(), "100-50-8");
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pick_earliest_best_is_order_independent() {
        let a = (3, 0.5);
        let b = (7, 0.5);
        assert_eq!(pick_earliest_best(a, b).0, 3);
        assert_eq!(pick_earliest_best(b, a).0, 3);
        assert_eq!(pick_earliest_best((9, 0.6), a).0, 9);
    }
}
