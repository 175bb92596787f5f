//! Formatting utilities for terminal output

use crate::core::{Color, Expression, Feedback};
use colored::Colorize;

/// Render a guess as colored tiles, one per symbol
#[must_use]
pub fn colored_guess(guess: &Expression, feedback: &Feedback) -> String {
    guess
        .symbols()
        .iter()
        .zip(feedback.colors())
        .map(|(symbol, color)| {
            let tile = format!(" {symbol} ").black().bold();
            match color {
                Color::Dark => tile.on_bright_black(),
                Color::Yellow => tile.on_yellow(),
                Color::Green => tile.on_green(),
            }
            .to_string()
        })
        .collect()
}

/// Spell out a feedback row, e.g. "green, dark, yellow, ..."
#[must_use]
pub fn color_names(feedback: &Feedback) -> String {
    feedback
        .colors()
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a frequency score in `[0, 1]` as a bar
#[must_use]
pub fn score_bar(score: f64, width: usize) -> String {
    create_progress_bar(score, 1.0, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_lists_every_position() {
        let feedback: Feedback = "gdyddddg".parse().unwrap();
        assert_eq!(
            color_names(&feedback),
            "green, dark, yellow, dark, dark, dark, dark, green"
        );
    }

    #[test]
    fn colored_guess_keeps_symbols_in_order() {
        let guess = Expression::new("12+34*56").unwrap();
        let rendered = colored_guess(&guess, &Feedback::SOLVED);
        let positions: Vec<usize> = "12+34*56"
            .chars()
            .map(|c| rendered.find(&format!(" {c} ")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn score_bar_clamps() {
        assert_eq!(score_bar(2.0, 5), "█████");
        assert_eq!(score_bar(0.2, 5), "█░░░░");
    }
}
