//! Expression analysis command
//!
//! Reports how an expression scores against the candidate pool for a target
//! and how its feedback would split the pool.

use crate::core::{Expression, Feedback};
use crate::solver::frequency::{PositionFrequencies, select_best_guess};
use rustc_hash::FxHashMap;

/// How the pool splits by the feedback a guess would receive
#[derive(Debug, Clone, Copy)]
pub struct PartitionMetrics {
    /// Number of distinct feedback rows
    pub partitions: usize,
    /// Shannon entropy of the split in bits
    pub entropy: f64,
    /// Expected number of candidates left after the guess
    pub expected_remaining: f64,
    /// Largest partition (worst-case remaining candidates)
    pub worst_case: usize,
}

/// Result of analyzing an expression
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub expression: String,
    pub target: i64,
    pub total_candidates: usize,
    /// Whether the expression itself could still be the answer
    pub in_pool: bool,
    pub score: f64,
    /// 1-based position among candidates by descending score
    pub rank: usize,
    pub best: Option<(String, f64)>,
    pub metrics: PartitionMetrics,
}

/// Analyze `text` as a guess against the pool for `target`
///
/// # Errors
///
/// Returns an error if the expression is malformed or the pool is empty.
pub fn analyze_expression(
    text: &str,
    target: i64,
    pool: &[Expression],
) -> Result<AnalysisResult, String> {
    let expr = Expression::new(text).map_err(|e| format!("Invalid expression: {e}"))?;

    if pool.is_empty() {
        return Err(format!("No expressions in the corpus evaluate to {target}"));
    }

    let freq = PositionFrequencies::from_candidates(pool);
    let score = freq.score(&expr);
    let rank = 1 + pool.iter().filter(|c| freq.score(c) > score).count();
    let best = select_best_guess(pool).map(|(e, s)| (e.text(), s));

    Ok(AnalysisResult {
        expression: expr.text(),
        target,
        total_candidates: pool.len(),
        in_pool: pool.contains(&expr),
        score,
        rank,
        best,
        metrics: partition_metrics(&expr, pool),
    })
}

/// Split `candidates` by the feedback `guess` would receive from each
#[must_use]
pub fn partition_metrics(guess: &Expression, candidates: &[Expression]) -> PartitionMetrics {
    if candidates.is_empty() {
        return PartitionMetrics {
            partitions: 0,
            entropy: 0.0,
            expected_remaining: 0.0,
            worst_case: 0,
        };
    }

    let mut groups: FxHashMap<Feedback, usize> = FxHashMap::default();
    for candidate in candidates {
        *groups
            .entry(Feedback::calculate(guess, candidate))
            .or_insert(0) += 1;
    }

    let total = candidates.len() as f64;
    let entropy = groups
        .values()
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum();
    let expected_remaining = groups
        .values()
        .map(|&n| (n * n) as f64)
        .sum::<f64>()
        / total;

    PartitionMetrics {
        partitions: groups.len(),
        entropy,
        expected_remaining,
        worst_case: groups.values().copied().max().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(texts: &[&str]) -> Vec<Expression> {
        texts.iter().map(|t| Expression::new(t).unwrap()).collect()
    }

    #[test]
    fn analyze_pool_member() {
        let candidates = pool(&["12+34*56", "12+34*65", "21+34*56"]);
        let result = analyze_expression("12+34*56", 1916, &candidates).unwrap();

        assert_eq!(result.expression, "12+34*56");
        assert!(result.in_pool);
        assert_eq!(result.rank, 1);
        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.best.unwrap().0, "12+34*56");
    }

    #[test]
    fn analyze_outsider_scores_zero() {
        let candidates = pool(&["12+34*56", "12+34*65"]);
        let result = analyze_expression("98-76+10", 1916, &candidates).unwrap();

        assert!(!result.in_pool);
        assert!(result.score.abs() < f64::EPSILON);
        assert_eq!(result.rank, 3);
    }

    #[test]
    fn analyze_invalid_expression() {
        let candidates = pool(&["12+34*56"]);
        assert!(analyze_expression("12+34", 1916, &candidates).is_err());
    }

    #[test]
    fn analyze_empty_pool() {
        assert!(analyze_expression("12+34*56", 1916, &[]).is_err());
    }

    #[test]
    fn partition_of_distinct_candidates() {
        // Each candidate gives the guess a different feedback row
        let candidates = pool(&["12+34*56", "12+34*65", "21+34*56"]);
        let metrics = partition_metrics(&candidates[0], &candidates);

        assert_eq!(metrics.partitions, 3);
        assert_eq!(metrics.worst_case, 1);
        assert!((metrics.expected_remaining - 1.0).abs() < 1e-12);
        assert!((metrics.entropy - 3f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn partition_of_indistinguishable_candidates() {
        // Neither candidate shares a symbol with the guess
        let candidates = pool(&["12+34*56", "21+43*65"]);
        let guess = Expression::new("(9-7)/00").unwrap();
        let metrics = partition_metrics(&guess, &candidates);

        assert_eq!(metrics.partitions, 1);
        assert_eq!(metrics.worst_case, 2);
        assert!((metrics.expected_remaining - 2.0).abs() < 1e-12);
        assert!(metrics.entropy.abs() < 1e-12);
    }

    #[test]
    fn partition_of_empty_pool() {
        let guess = Expression::new("12+34*56").unwrap();
        let metrics = partition_metrics(&guess, &[]);
        assert_eq!(metrics.partitions, 0);
        assert_eq!(metrics.worst_case, 0);
    }
}
