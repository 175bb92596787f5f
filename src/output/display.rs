//! Display functions for command results

use super::formatters::{colored_guess, score_bar};
use crate::commands::{AnalysisResult, BenchmarkResult, SolveResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const RULE_WIDTH: usize = 60;

fn heading(title: &str, detail: &str) {
    println!("\n{}", "═".repeat(RULE_WIDTH).cyan());
    println!(" {} {}", title.bright_cyan().bold(), detail.bright_yellow().bold());
    println!("{}", "═".repeat(RULE_WIDTH).cyan());
}

fn section(icon: &str, title: &str) {
    println!("\n{icon} {}", title.bright_cyan().bold());
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("   {:<16}{value}", format!("{label}:"));
}

/// Print the rounds of a simulated game
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    heading(
        "SOLVING",
        &format!("{} = {}", result.answer, result.target),
    );

    for (round, step) in result.guesses.iter().enumerate() {
        println!(
            "\n{:>2}. {}  {}",
            round + 1,
            colored_guess(&step.guess, &step.feedback),
            step.feedback.to_emoji()
        );
        if !verbose {
            continue;
        }

        let kept = format!("{} of {}", step.candidates_after, step.candidates_before);
        field("Pool", kept);
        if let Some(score) = step.score {
            field("Score", format!("{score:.6}"));
        }
        if step.candidates_after > 0 && step.candidates_after < step.candidates_before {
            let factor = step.candidates_before as f64 / step.candidates_after as f64;
            field("Narrowed", format!("{factor:.1}x"));
        }
    }

    let rounds = result.guesses.len();
    let verdict = if result.success {
        format!("✅ Found {} in {rounds} guesses", result.answer)
            .green()
            .bold()
    } else {
        format!("❌ Not found within {rounds} guesses").red().bold()
    };
    println!("\n{verdict}");
}

/// Print how an expression performs as a guess
pub fn print_analysis_result(result: &AnalysisResult) {
    heading("ANALYSIS", &format!("{} for {}", result.expression, result.target));

    section("📊", &format!("Frequency score over {} candidates", result.total_candidates));
    field(
        "Score",
        format!("[{}] {:.6}", score_bar(result.score, 30).green(), result.score),
    );
    field("Rank", format!("{} of {}", result.rank, result.total_candidates));
    if let Some((best, best_score)) = &result.best {
        field("Top guess", format!("{best} ({best_score:.6})"));
    }
    field(
        "In pool",
        if result.in_pool { "yes".green() } else { "no".red() },
    );

    let metrics = &result.metrics;
    section("🧩", "Feedback partition");
    field("Distinct rows", metrics.partitions);
    field("Entropy", format!("{:.3} bits", metrics.entropy));
    field("Expected left", format!("{:.1}", metrics.expected_remaining));
    field("Worst case", metrics.worst_case);
}

/// Print summary statistics of a benchmark run
pub fn print_benchmark_result(result: &BenchmarkResult) {
    heading("BENCHMARK", "");

    section("📊", "Games");
    field("Answers", result.total_answers);
    field("Solved", result.solved.to_string().green());
    if result.failed > 0 {
        field("Failed", result.failed.to_string().red());
    }
    field(
        "Mean guesses",
        format!("{:.2}", result.average_guesses).bright_yellow().bold(),
    );
    if result.solved > 0 {
        field("Fewest", result.min_guesses);
        field("Most", result.max_guesses);
    }
    field("Elapsed", format!("{:.2}s", result.duration.as_secs_f64()));
    field("Answers/s", format!("{:.1}", result.answers_per_second));

    if result.solved == 0 {
        return;
    }

    section("📈", "Guesses per solved game");
    let mut counts: Vec<(usize, usize)> = result
        .distribution
        .iter()
        .map(|(&guesses, &count)| (guesses, count))
        .collect();
    counts.sort_unstable();
    for (guesses, count) in counts {
        let share = count as f64 / result.solved as f64;
        let filled = (share * 40.0).round() as usize;
        println!(
            "   {guesses}: {}{} {count:4} ({:5.1}%)",
            "█".repeat(filled).green(),
            "░".repeat(40_usize.saturating_sub(filled)).bright_black(),
            share * 100.0
        );
    }
}

/// Progress bar for a run over `len` items
#[must_use]
pub fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░"));
    pb.set_style(style);
    pb
}

/// Spinner shown while `message` is in progress
#[must_use]
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
