//! Mathler Solver
//!
//! Narrows the expressions that evaluate to a target value using the colored
//! feedback of each guess, and suggests the next guess by positional symbol
//! frequency.
//!
//! # Quick Start
//!
//! ```rust
//! use mathler_solver::core::{Expression, Feedback};
//! use mathler_solver::solver::{FrequencyStrategy, Session};
//!
//! let pool: Vec<Expression> = ["47-23+18", "(28-7)*2", "3*(15-1)"]
//!     .iter()
//!     .map(|s| Expression::new(s).unwrap())
//!     .collect();
//! let opening = mathler_solver::solver::filter::repeat_free(&pool);
//! let mut session = Session::new(42, pool, opening, FrequencyStrategy).unwrap();
//!
//! let guess = session.next_guess().unwrap();
//! let answer = Expression::new("(28-7)*2").unwrap();
//! session.submit(guess, Feedback::calculate(&guess, &answer)).unwrap();
//! assert!(session.candidates().contains(&answer));
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Expression corpus
pub mod corpus;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
