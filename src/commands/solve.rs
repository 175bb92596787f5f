//! Expression solving command
//!
//! Plays a full game against a known answer, computing each round's feedback
//! itself, and returns the solution path.

use crate::core::{Expression, Feedback};
use crate::solver::filter::repeat_free;
use crate::solver::frequency::PositionFrequencies;
use crate::solver::{Session, Strategy};

/// Configuration for solving an expression
pub struct SolveConfig {
    pub target: i64,
    pub answer: String,
    pub max_guesses: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: i64, answer: String) -> Self {
        Self {
            target,
            answer,
            max_guesses: 6,
        }
    }
}

/// Result of solving an expression
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub target: i64,
    pub answer: String,
}

/// A single guess step in the solution
#[derive(Debug, Clone)]
pub struct GuessStep {
    pub guess: Expression,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
    /// Frequency score of the guess over the candidates it was chosen from
    pub score: Option<f64>,
}

/// Solve for a known answer using the given candidate pool and strategy
///
/// # Errors
///
/// Returns an error if:
/// - The answer is not a valid expression
/// - The answer is not in the pool for the target
/// - The session runs out of candidates
pub fn solve_expression<S: Strategy>(
    config: SolveConfig,
    pool: &[Expression],
    strategy: S,
) -> Result<SolveResult, String> {
    let answer = Expression::new(&config.answer).map_err(|e| format!("Invalid answer: {e}"))?;

    if !pool.contains(&answer) {
        return Err(format!(
            "'{answer}' is not in the corpus for target {}",
            config.target
        ));
    }

    let mut session = Session::new(config.target, pool.to_vec(), repeat_free(pool), strategy)
        .map_err(|e| e.to_string())?;
    let mut guesses: Vec<GuessStep> = Vec::new();

    for _ in 0..config.max_guesses {
        let candidates_before = session.remaining();
        let opening = session.rounds() == 0 && !session.opening_candidates().is_empty();

        let guess = session.next_guess().map_err(|e| e.to_string())?;

        let score = if candidates_before > 1 {
            let scored_over = if opening {
                session.opening_candidates()
            } else {
                session.candidates()
            };
            Some(PositionFrequencies::from_candidates(scored_over).score(&guess))
        } else {
            None
        };

        let feedback = Feedback::calculate(&guess, &answer);
        session
            .submit(guess, feedback)
            .map_err(|e| e.to_string())?;

        guesses.push(GuessStep {
            guess,
            feedback,
            candidates_before,
            candidates_after: session.remaining(),
            score,
        });

        if feedback.is_solved() {
            return Ok(SolveResult {
                success: true,
                guesses,
                target: config.target,
                answer: config.answer,
            });
        }
    }

    Ok(SolveResult {
        success: false,
        guesses,
        target: config.target,
        answer: config.answer,
    })
}
