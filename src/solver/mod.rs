//! Mathler solving engine
//!
//! Feedback is folded into a `ConstraintState`, the candidate pool is pruned
//! against it, and a `Strategy` picks the next guess from what remains.

mod constraints;
pub mod filter;
pub mod frequency;
mod session;
pub mod strategy;

pub use constraints::ConstraintState;
pub use session::{Phase, Round, RoundOutcome, Session, SessionError};
pub use strategy::{FrequencyStrategy, RandomStrategy, Strategy, StrategyType};
