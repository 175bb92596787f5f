//! Round-by-round solving session
//!
//! A `Session` owns the candidate pool and the constraint state for one
//! puzzle. Each round it proposes a guess, then folds the confirmed feedback
//! in and prunes the pool:
//!
//! ```text
//! AwaitingGuess -> AwaitingFeedback -> AwaitingGuess -> ... -> Solved
//!                                                         \-> Exhausted
//! ```

use super::constraints::ConstraintState;
use super::filter::{prune, repeat_free};
use super::strategy::Strategy;
use crate::core::{Expression, Feedback};
use crate::corpus::{Corpus, CorpusError};
use std::fmt;

/// Where a session is in its round cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready to compute the next guess
    AwaitingGuess,
    /// A guess was proposed; waiting for its confirmed feedback
    AwaitingFeedback(Expression),
    /// Only one candidate is left; it still has to be entered in the game
    Determined(Expression),
    /// Feedback came back all green
    Solved(Expression),
    /// No candidate fits the feedback; undo or restart
    Exhausted,
}

impl Phase {
    /// Solved or determined: no further guessing is needed
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Determined(_) | Self::Solved(_))
    }
}

/// Result of a successfully applied round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// More than one candidate remains
    Narrowed { remaining: usize },
    /// Exactly one candidate remains
    Determined(Expression),
    /// The guess was the answer
    Solved(Expression),
}

/// One applied round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub guess: Expression,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Error type for session failures
#[derive(Debug)]
pub enum SessionError {
    /// The corpus could not be read
    Corpus(CorpusError),
    /// The pool is empty: nothing in the corpus for the target (round 0) or
    /// the feedback so far is contradictory
    NoCandidates { target: i64, round: usize },
    /// Feedback was submitted after the puzzle was solved
    AlreadySolved(Expression),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corpus(e) => write!(f, "Corpus unavailable: {e}"),
            Self::NoCandidates { target, round: 0 } => {
                write!(f, "No expressions in the corpus evaluate to {target}")
            }
            Self::NoCandidates { round, .. } => write!(
                f,
                "No candidates remain after round {round}; the feedback may be incorrect"
            ),
            Self::AlreadySolved(answer) => write!(f, "Already solved: {answer}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Corpus(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CorpusError> for SessionError {
    fn from(e: CorpusError) -> Self {
        Self::Corpus(e)
    }
}

/// State restored by `undo`
#[derive(Debug, Clone)]
struct Snapshot {
    state: ConstraintState,
    pool: Vec<Expression>,
    phase: Phase,
}

/// Solving session for one target value
pub struct Session<S: Strategy> {
    target: i64,
    strategy: S,
    state: ConstraintState,
    pool: Vec<Expression>,
    opening: Vec<Expression>,
    phase: Phase,
    history: Vec<Round>,
    undo_stack: Vec<Snapshot>,
}

impl<S: Strategy> Session<S> {
    /// Start a session from an already loaded pool
    ///
    /// `opening` is the repeat-free subset used for the first guess; when it is
    /// empty the first guess is drawn from the full pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCandidates` if `pool` is empty.
    pub fn new(
        target: i64,
        pool: Vec<Expression>,
        opening: Vec<Expression>,
        strategy: S,
    ) -> Result<Self, SessionError> {
        if pool.is_empty() {
            return Err(SessionError::NoCandidates { target, round: 0 });
        }

        let phase = if pool.len() == 1 {
            Phase::Determined(pool[0])
        } else {
            Phase::AwaitingGuess
        };

        Ok(Self {
            target,
            strategy,
            state: ConstraintState::new(),
            pool,
            opening,
            phase,
            history: Vec::new(),
            undo_stack: Vec::new(),
        })
    }

    /// Load the pool for `target` from a corpus and start a session
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Corpus` if the lookup fails, or
    /// `SessionError::NoCandidates` if nothing evaluates to `target`.
    pub fn load<C: Corpus + ?Sized>(
        target: i64,
        corpus: &C,
        strategy: S,
    ) -> Result<Self, SessionError> {
        let pool = corpus.lookup(target)?;
        let opening = repeat_free(&pool);
        Self::new(target, pool, opening, strategy)
    }

    /// Propose the next guess
    ///
    /// The first guess is chosen among repeat-free candidates; later guesses
    /// among the remaining pool. Once the answer is known it is returned as is.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCandidates` if the pool is exhausted.
    pub fn next_guess(&mut self) -> Result<Expression, SessionError> {
        match self.phase {
            Phase::Determined(answer) | Phase::Solved(answer) => return Ok(answer),
            Phase::Exhausted => return Err(self.exhausted()),
            Phase::AwaitingGuess | Phase::AwaitingFeedback(_) => {}
        }

        let candidates = if self.state.rounds() == 0 && !self.opening.is_empty() {
            &self.opening
        } else {
            &self.pool
        };

        let guess = *self
            .strategy
            .select_guess(candidates)
            .ok_or_else(|| self.exhausted())?;
        self.phase = Phase::AwaitingFeedback(guess);
        Ok(guess)
    }

    /// Apply confirmed feedback for `guess` and prune the pool
    ///
    /// `guess` is whatever was actually played, which need not be the last
    /// suggestion.
    ///
    /// # Errors
    ///
    /// - `SessionError::AlreadySolved` if an all-green round was already applied
    /// - `SessionError::NoCandidates` if the pool was or becomes empty; the
    ///   round is still recorded so it can be undone
    pub fn submit(
        &mut self,
        guess: Expression,
        feedback: Feedback,
    ) -> Result<RoundOutcome, SessionError> {
        match self.phase {
            Phase::Solved(answer) => return Err(SessionError::AlreadySolved(answer)),
            Phase::Exhausted => return Err(self.exhausted()),
            _ => {}
        }

        let previous_pool = std::mem::take(&mut self.pool);
        self.undo_stack.push(Snapshot {
            state: self.state.clone(),
            pool: Vec::new(),
            phase: self.phase,
        });

        self.state.apply(&guess, &feedback);
        self.pool = prune(&previous_pool, &self.state);
        self.history.push(Round {
            guess,
            feedback,
            candidates_before: previous_pool.len(),
            candidates_after: self.pool.len(),
        });
        if let Some(snapshot) = self.undo_stack.last_mut() {
            snapshot.pool = previous_pool;
        }

        if feedback.is_solved() {
            self.phase = Phase::Solved(guess);
            return Ok(RoundOutcome::Solved(guess));
        }

        match self.pool.len() {
            0 => {
                self.phase = Phase::Exhausted;
                Err(self.exhausted())
            }
            1 => {
                let answer = self.pool[0];
                self.phase = Phase::Determined(answer);
                Ok(RoundOutcome::Determined(answer))
            }
            remaining => {
                self.phase = Phase::AwaitingGuess;
                Ok(RoundOutcome::Narrowed { remaining })
            }
        }
    }

    /// Revert the last applied round
    ///
    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.state = snapshot.state;
        self.pool = snapshot.pool;
        self.phase = snapshot.phase;
        self.history.pop();
        true
    }

    fn exhausted(&self) -> SessionError {
        SessionError::NoCandidates {
            target: self.target,
            round: self.state.rounds(),
        }
    }

    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining candidates, in corpus order
    #[must_use]
    pub fn candidates(&self) -> &[Expression] {
        &self.pool
    }

    /// Repeat-free candidates considered for the opening guess
    #[must_use]
    pub fn opening_candidates(&self) -> &[Expression] {
        &self.opening
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub const fn constraints(&self) -> &ConstraintState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// Number of rounds applied
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.state.rounds()
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }
}
