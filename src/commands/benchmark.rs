//! Benchmark command
//!
//! Plays every answer in a list against the same candidate pool and collects
//! guess-count statistics.

use super::solve::{SolveConfig, solve_expression};
use crate::core::Expression;
use crate::solver::Strategy;
use indicatif::ProgressBar;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub total_answers: usize,
    pub solved: usize,
    pub failed: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub distribution: FxHashMap<usize, usize>,
    pub duration: Duration,
    pub answers_per_second: f64,
}

/// Run a benchmark for `target` over `answers`, all drawn from `pool`
///
/// Each game is limited to six guesses; games that run out count as failed
/// and do not enter the averages. `progress` is advanced once per answer.
pub fn run_benchmark<S: Strategy + Clone>(
    target: i64,
    pool: &[Expression],
    answers: &[Expression],
    strategy: &S,
    progress: &ProgressBar,
) -> BenchmarkResult {
    let start = Instant::now();
    let mut solved = 0;
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();

    for (idx, answer) in answers.iter().enumerate() {
        let config = SolveConfig::new(target, answer.text());
        if let Ok(result) = solve_expression(config, pool, strategy.clone())
            && result.success
        {
            let guesses = result.guesses.len();
            solved += 1;
            total_guesses += guesses;
            min_guesses = min_guesses.min(guesses);
            max_guesses = max_guesses.max(guesses);
            *distribution.entry(guesses).or_insert(0) += 1;
        }

        if idx % 10 == 0 && solved > 0 {
            progress.set_message(format!("Avg: {:.2}", total_guesses as f64 / solved as f64));
        }
        progress.inc(1);
    }
    progress.finish_with_message("Complete!");

    let duration = start.elapsed();
    let total_answers = answers.len();

    BenchmarkResult {
        total_answers,
        solved,
        failed: total_answers - solved,
        total_guesses,
        average_guesses: if solved > 0 {
            total_guesses as f64 / solved as f64
        } else {
            0.0
        },
        min_guesses: if solved > 0 { min_guesses } else { 0 },
        max_guesses,
        distribution,
        duration,
        answers_per_second: total_answers as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{FrequencyStrategy, StrategyType};

    fn forty_two() -> Vec<Expression> {
        [
            "33+57-48", "172-65*2", "56-53+39", "53+19-30", "57+17-32", "51+25-34", "47-23+18",
            "64-56+34", "89+14-61", "32-49+59", "21+59-38", "57-92+77", "(28-7)*2", "3*(15-1)",
        ]
        .iter()
        .map(|t| Expression::new(t).unwrap())
        .collect()
    }

    #[test]
    fn benchmark_runs() {
        let pool = forty_two();
        let result = run_benchmark(
            42,
            &pool,
            &pool[..10],
            &FrequencyStrategy,
            &ProgressBar::hidden(),
        );

        assert_eq!(result.total_answers, 10);
        assert_eq!(result.solved, 10);
        assert_eq!(result.failed, 0);
        assert!(result.average_guesses >= 1.0);
        assert!(result.min_guesses >= 1);
        assert!(result.max_guesses <= 6);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let pool = forty_two();
        let result = run_benchmark(
            42,
            &pool,
            &pool,
            &StrategyType::default(),
            &ProgressBar::hidden(),
        );

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.solved);
    }

    #[test]
    fn benchmark_empty_answer_list() {
        let pool = forty_two();
        let result = run_benchmark(42, &pool, &[], &FrequencyStrategy, &ProgressBar::hidden());

        assert_eq!(result.total_answers, 0);
        assert_eq!(result.total_guesses, 0);
        assert_eq!(result.min_guesses, 0);
        assert!(result.average_guesses.abs() < f64::EPSILON);
    }

    #[test]
    fn answers_outside_pool_count_as_failed() {
        let pool = forty_two();
        let stranger = Expression::new("12+34*56").unwrap();
        let result = run_benchmark(
            42,
            &pool,
            &[stranger],
            &FrequencyStrategy,
            &ProgressBar::hidden(),
        );

        assert_eq!(result.failed, 1);
        assert!(result.distribution.is_empty());
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let pool = forty_two();
        let result = run_benchmark(42, &pool, &pool, &FrequencyStrategy, &ProgressBar::hidden());

        assert!(result.average_guesses >= result.min_guesses as f64);
        assert!(result.average_guesses <= result.max_guesses as f64);
        for &guess_count in result.distribution.keys() {
            assert!((1..=6).contains(&guess_count));
        }
    }
}
