//! Candidate pool filtering
//!
//! Pruning keeps the records a `ConstraintState` still admits. Both functions
//! here preserve the relative order of the input, which guess selection relies
//! on to break ties.

use super::constraints::ConstraintState;
use crate::core::Expression;
use rayon::prelude::*;

/// Keep only the candidates consistent with `state`
///
/// # Examples
/// ```
/// use mathler_solver::core::Expression;
/// use mathler_solver::solver::{ConstraintState, filter::prune};
///
/// let pool: Vec<Expression> = ["100-50-8", "6*7+9-9*", "50-8+100"]
///     .iter()
///     .map(|s| Expression::new(s).unwrap())
///     .collect();
///
/// let mut state = ConstraintState::new();
/// state.apply(&pool[0], &"gggggggg".parse().unwrap());
///
/// let remaining = prune(&pool, &state);
/// assert_eq!(remaining, vec![pool[0]]);
/// ```
#[must_use]
pub fn prune(pool: &[Expression], state: &ConstraintState) -> Vec<Expression> {
    pool.iter()
        .filter(|e| is_consistent(e, state))
        .copied()
        .collect()
}

/// Whether `candidate` could still be the answer under `state`
#[inline]
#[must_use]
pub fn is_consistent(candidate: &Expression, state: &ConstraintState) -> bool {
    state.admits(candidate)
}

/// Candidates in which no symbol repeats, in pool order
///
/// Runs in parallel; `rayon` keeps the input order when collecting.
#[must_use]
pub fn repeat_free(pool: &[Expression]) -> Vec<Expression> {
    pool.par_iter()
        .filter(|e| e.has_unique_symbols())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, Symbol};

    fn pool(texts: &[&str]) -> Vec<Expression> {
        texts.iter().map(|t| Expression::new(t).unwrap()).collect()
    }

    fn texts(pool: &[Expression]) -> Vec<String> {
        pool.iter().map(Expression::text).collect()
    }

    #[test]
    fn all_green_leaves_only_the_guess() {
        let candidates = pool(&["100-50-8", "50-8+100", "8-50+100", "(6*7)+00"]);
        let mut state = ConstraintState::new();
        state.apply(&candidates[0], &Feedback::SOLVED);

        assert_eq!(texts(&prune(&candidates, &state)), vec!["100-50-8"]);
    }

    #[test]
    fn pinned_duplicate_quota_removes_double_occurrences() {
        // Guess has two 5s; the answer has exactly one
        let guess = Expression::new("52+35-14").unwrap();
        let mut state = ConstraintState::new();
        state.apply(&guess, &"ydddddyd".parse().unwrap());
        assert_eq!(state.max_count(Symbol::Five), 1);

        let candidates = pool(&["(15*6)/9", "(15*5)/9", "(55*6)/9", "(5*16)/9"]);
        let remaining = prune(&candidates, &state);

        assert_eq!(texts(&remaining), vec!["(15*6)/9", "(5*16)/9"]);
    }

    #[test]
    fn dark_symbol_removes_every_candidate_containing_it() {
        let guess = Expression::new("7+12*345").unwrap();
        let mut state = ConstraintState::new();
        state.apply(&guess, &"dddddddd".parse().unwrap());
        assert_eq!(state.max_count(Symbol::Seven), 0);

        let candidates = pool(&["98/(6-0)", "97/(6-0)", "(9-6)/07", "96/(8-0)"]);
        let remaining = prune(&candidates, &state);

        assert!(remaining.iter().all(|e| !e.contains(Symbol::Seven)));
        assert_eq!(texts(&remaining), vec!["98/(6-0)", "96/(8-0)"]);
    }

    #[test]
    fn yellow_position_is_enforced() {
        let guess = Expression::new("12+34*56").unwrap();
        let mut state = ConstraintState::new();
        state.apply(&guess, &"dydddddd".parse().unwrap());

        // Same symbols; only the position of the 2 differs
        let candidates = pool(&["92/87-78", "29/87-78"]);
        assert_eq!(texts(&prune(&candidates, &state)), vec!["29/87-78"]);
    }

    #[test]
    fn prune_preserves_order() {
        let candidates = pool(&["98/7-0+9", "9-8+7/00", "97-8+9/0", "79-8+9/0"]);
        let state = ConstraintState::new();
        assert_eq!(prune(&candidates, &state), candidates);
    }

    #[test]
    fn prune_never_grows_pool() {
        let candidates = pool(&["100-50-8", "50-8+100", "8-50+100"]);
        let mut state = ConstraintState::new();
        state.apply(&candidates[1], &"ggdyyddg".parse().unwrap());
        let once = prune(&candidates, &state);
        let twice = prune(&once, &state);

        assert!(once.len() <= candidates.len());
        assert_eq!(once, twice);
    }

    #[test]
    fn is_consistent_matches_prune() {
        let candidates = pool(&["92/87-78", "29/87-78", "12+34*56"]);
        let mut state = ConstraintState::new();
        state.apply(&candidates[2], &"dydddddd".parse().unwrap());

        let kept = prune(&candidates, &state);
        for candidate in &candidates {
            assert_eq!(is_consistent(candidate, &state), kept.contains(candidate));
        }
    }

    #[test]
    fn prune_empty_pool() {
        let state = ConstraintState::new();
        assert!(prune(&[], &state).is_empty());
    }

    #[test]
    fn repeat_free_keeps_order() {
        let candidates = pool(&["98-76+51", "100-50-8", "12+34*56", "11+22-33", "(9+3)*19"]);
        assert_eq!(
            texts(&repeat_free(&candidates)),
            vec!["98-76+51", "12+34*56"]
        );
    }
}
