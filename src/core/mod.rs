//! Core domain types for Mathler
//!
//! This module contains the fundamental domain types with zero external dependencies.
//! All types here are pure, `Copy` where possible, and cheap to compare.

mod expression;
mod feedback;
mod symbol;

pub use expression::{EXPRESSION_LEN, Expression, ExpressionError};
pub use feedback::{Color, Feedback, FeedbackError};
pub use symbol::{SYMBOL_COUNT, Symbol};
