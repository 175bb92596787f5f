//! TUI rendering with ratatui
//!
//! The screen is a Mathler board of played rounds beside the current
//! suggestion, the remaining pool and a message log.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Color as TileColor, EXPRESSION_LEN, Feedback};
use crate::solver::Session;
use crate::solver::frequency::PositionFrequencies;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Rows drawn on the board, matching the six guesses of a game
const BOARD_ROWS: usize = 6;

/// Candidates listed individually up to this many
const LIST_LIMIT: usize = 12;

/// Draw the whole screen
pub fn ui(f: &mut Frame, app: &App) {
    let [title, body, prompt, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(f.area());

    let [board, side] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .areas(body);

    let [suggestion, gauge, pool, log] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(7),
        ])
        .areas(side);

    render_title(f, app, title);
    render_board(f, app, board);
    render_suggestion(f, app, suggestion);
    render_pool_gauge(f, app, gauge);
    render_pool(f, app, pool);
    render_log(f, app, log);
    render_prompt(f, app, prompt);
    render_footer(f, app, footer);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let text = app.session.as_ref().map_or_else(
        || "🧮 MATHLER SOLVER".to_string(),
        |session| format!("🧮 MATHLER SOLVER - Target {}", session.target()),
    );
    let title = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(panel("").style(Style::default().fg(Color::Cyan)));
    f.render_widget(title, area);
}

fn tile_style(color: TileColor) -> Style {
    let bg = match color {
        TileColor::Dark => Color::DarkGray,
        TileColor::Yellow => Color::Yellow,
        TileColor::Green => Color::Green,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// One span per symbol, colored by its feedback tile
fn tiles(text: &str, feedback: &Feedback) -> Vec<Span<'static>> {
    text.chars()
        .zip(feedback.colors())
        .map(|(c, &color)| Span::styled(format!(" {c} "), tile_style(color)))
        .collect()
}

/// Uncolored tiles for a guess still waiting on feedback
fn blank_tiles(text: &str) -> Vec<Span<'static>> {
    text.chars()
        .map(|c| Span::styled(format!(" {c} "), Style::default().fg(Color::White)))
        .collect()
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let history = app
        .session
        .as_ref()
        .map(Session::history)
        .unwrap_or_default();

    // Rounds beyond the board scroll off the top
    let skipped = history.len().saturating_sub(BOARD_ROWS - 1);
    let mut rows: Vec<Line> = history[skipped..]
        .iter()
        .enumerate()
        .map(|(i, round)| {
            let mut spans = vec![Span::raw(format!("{:>2} ", skipped + i + 1))];
            spans.extend(tiles(&round.guess.text(), &round.feedback));
            spans.push(Span::styled(
                format!(" {}", round.candidates_after),
                Style::default().fg(Color::DarkGray),
            ));
            Line::from(spans)
        })
        .collect();

    let live = match (&app.pending, &app.current_guess) {
        (Some((guess, feedback)), _) => Some(tiles(&guess.text(), feedback)),
        (None, Some(info)) if app.input_mode != InputMode::WinCelebration => {
            Some(blank_tiles(&info.guess.text()))
        }
        _ => None,
    };
    if let Some(spans) = live {
        let mut line = vec![Span::raw(format!("{:>2} ", history.len() + 1))];
        line.extend(spans);
        rows.push(Line::from(line));
    }

    while rows.len() < BOARD_ROWS {
        let empty = " · ".repeat(EXPRESSION_LEN);
        rows.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(empty, Style::default().fg(Color::DarkGray)),
        ]));
    }

    f.render_widget(Paragraph::new(rows).block(panel(" Board ")), area);
}

fn render_suggestion(f: &mut Frame, app: &App, area: Rect) {
    let Some(info) = &app.current_guess else {
        let text = if app.session.is_none() {
            "Enter a target value to begin"
        } else {
            "No suggestion available"
        };
        f.render_widget(Paragraph::new(text).block(panel(" Guess ")), area);
        return;
    };

    let label = if info.suggested { "Suggested " } else { "Playing   " };
    let lines = vec![
        Line::from(vec![
            Span::raw(label),
            Span::styled(
                info.guess.text(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Score     {:.4}", info.score)),
        Line::from(format!(
            "Splits    {} feedback rows, {:.2} bits",
            info.metrics.partitions, info.metrics.entropy
        )),
        Line::from(format!(
            "Leaves    {:.1} expected, {} at worst",
            info.metrics.expected_remaining, info.metrics.worst_case
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(panel(" Guess ")), area);
}

fn render_pool_gauge(f: &mut Frame, app: &App, area: Rect) {
    let (initial, current) = app.session.as_ref().map_or((0, 0), |s| {
        let initial = s
            .history()
            .first()
            .map_or(s.remaining(), |r| r.candidates_before);
        (initial, s.remaining())
    });

    let ratio = if initial == 0 {
        0.0
    } else {
        1.0 - current as f64 / initial as f64
    };

    let gauge = Gauge::default()
        .block(panel(" Eliminated "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{current} of {initial} left"));
    f.render_widget(gauge, area);
}

fn render_pool(f: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.session {
        None => vec![Line::from("No target yet")],
        Some(session) if session.remaining() == 0 => {
            vec![Line::from(Span::styled(
                "No candidates remain - press 'u' to undo",
                Style::default().fg(Color::Red),
            ))]
        }
        Some(session) if session.remaining() <= LIST_LIMIT => {
            let candidates = session.candidates();
            let freq = PositionFrequencies::from_candidates(candidates);
            candidates
                .iter()
                .map(|candidate| {
                    Line::from(vec![
                        Span::styled(candidate.text(), Style::default().fg(Color::Green)),
                        Span::styled(
                            format!("  {:.3}", freq.score(candidate)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ])
                })
                .collect()
        }
        Some(session) => vec![
            Line::from(format!("{} candidates", session.remaining())),
            Line::from(format!(
                "{} without repeated symbols",
                session.opening_candidates().len()
            )),
        ],
    };
    f.render_widget(Paragraph::new(lines).block(panel(" Pool ")), area);
}

fn render_log(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let color = match msg.style {
                MessageStyle::Info => Color::White,
                MessageStyle::Success => Color::Green,
                MessageStyle::Error => Color::Red,
            };
            ListItem::new(msg.text.as_str()).style(Style::default().fg(color))
        })
        .collect();
    f.render_widget(List::new(items).block(panel(" Log ")), area);
}

fn render_prompt(f: &mut Frame, app: &App, area: Rect) {
    let confirm_text = app
        .pending
        .map(|(guess, feedback)| format!("{guess}  {}", feedback.to_emoji()))
        .unwrap_or_default();

    let (title, content, color) = match app.input_mode {
        InputMode::Target => (
            " Enter Target Value ",
            app.input_buffer.as_str(),
            Color::Magenta,
        ),
        InputMode::Feedback => (
            " Feedback d/y/g for each tile | TAB: played a different guess ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::ManualGuess => (
            " Expression played | ESC: back to suggestion ",
            app.manual_guess.as_str(),
            Color::Cyan,
        ),
        InputMode::Confirm => (
            " Apply this round? y/Enter: yes | n/ESC: re-enter ",
            confirm_text.as_str(),
            Color::LightBlue,
        ),
        InputMode::WinCelebration => (" 🎉 Solved! | n: new game | q: quit ", "", Color::Green),
    };

    let prompt = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(prompt, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let win_rate = if app.stats.total_games > 0 {
        app.stats.games_won as f64 / app.stats.total_games as f64 * 100.0
    } else {
        0.0
    };
    let round = app.session.as_ref().map_or(0, Session::rounds) + 1;

    let keys = match app.input_mode {
        InputMode::Target => "Enter: start | q: quit",
        InputMode::Feedback if app.session.is_some() && app.remaining() == 0 => {
            "u: undo | n: new game | q: quit"
        }
        _ => "Enter: submit | u: undo | q: quit",
    };

    let dim = Style::default().fg(Color::DarkGray);
    let footer = Line::from(vec![
        Span::raw(format!(" Strategy: {} ", app.strategy.name())),
        Span::styled("│", dim),
        Span::raw(format!(" Round {round} ")),
        Span::styled("│", dim),
        Span::raw(format!(
            " Games {} ({win_rate:.0}% won) ",
            app.stats.total_games
        )),
        Span::styled("│", dim),
        Span::styled(format!(" {keys}"), dim),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}
