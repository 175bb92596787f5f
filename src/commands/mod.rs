//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod simple;
pub mod solve;

pub use analyze::{AnalysisResult, PartitionMetrics, analyze_expression};
pub use benchmark::{BenchmarkResult, run_benchmark};
pub use simple::{run_protocol, run_simple};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_expression};
