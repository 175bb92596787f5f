//! TUI application state and logic

use crate::commands::analyze::{PartitionMetrics, partition_metrics};
use crate::core::{EXPRESSION_LEN, Expression, Feedback, Symbol};
use crate::corpus::Corpus;
use crate::output::formatters::color_names;
use crate::solver::frequency::PositionFrequencies;
use crate::solver::{Phase, RoundOutcome, Session, SessionError, StrategyType};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Messages kept in the log panel
const MAX_MESSAGES: usize = 5;

/// Application state
pub struct App<'a> {
    pub corpus: &'a dyn Corpus,
    pub strategy: StrategyType,
    pub session: Option<Session<StrategyType>>,
    pub current_guess: Option<GuessInfo>,
    /// Round awaiting confirmation
    pub pending: Option<(Expression, Feedback)>,
    pub input_buffer: String,
    pub manual_guess: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Target,
    Feedback,
    ManualGuess,
    Confirm,
    WinCelebration,
}

#[derive(Debug, Clone)]
pub struct GuessInfo {
    pub guess: Expression,
    pub score: f64,
    pub metrics: PartitionMetrics,
    pub suggested: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub guess_distribution: [usize; 7],
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(corpus: &'a dyn Corpus, strategy: StrategyType) -> Self {
        Self {
            corpus,
            strategy,
            session: None,
            current_guess: None,
            pending: None,
            input_buffer: String::new(),
            manual_guess: String::new(),
            messages: vec![
                Message {
                    text: "Welcome! I'll suggest guesses from positional symbol frequencies."
                        .to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Enter the value the hidden expression equals.".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Target,
        }
    }

    /// Dispatch one key press according to the current input mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Target => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => {
                    let input = self.input_buffer.clone();
                    self.handle_target(&input);
                }
                _ => {}
            },
            InputMode::Feedback => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('u') => self.undo_last(),
                KeyCode::Tab => {
                    if self.remaining() > 0 {
                        self.input_mode = InputMode::ManualGuess;
                        self.add_message("Enter the expression you played", MessageStyle::Info);
                    }
                }
                KeyCode::Char(c) => {
                    if self.input_buffer.chars().count() < EXPRESSION_LEN {
                        self.input_buffer.push(c);
                    }
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => {
                    let input = self.input_buffer.clone();
                    self.handle_feedback(&input);
                }
                _ => {}
            },
            InputMode::ManualGuess => match key.code {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Feedback;
                    self.manual_guess.clear();
                    self.add_message("Cancelled manual guess entry", MessageStyle::Info);
                }
                KeyCode::Tab => {
                    self.input_mode = InputMode::Feedback;
                    self.manual_guess.clear();
                }
                KeyCode::Char(c) => {
                    if self.manual_guess.len() < EXPRESSION_LEN && Symbol::from_char(c).is_some() {
                        self.manual_guess.push(c);
                    }
                }
                KeyCode::Backspace => {
                    self.manual_guess.pop();
                }
                KeyCode::Enter => self.use_manual_guess(),
                _ => {}
            },
            InputMode::Confirm => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => self.apply_pending(),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.pending = None;
                    self.input_mode = InputMode::Feedback;
                    self.add_message("Discarded. Enter the colors again.", MessageStyle::Info);
                }
                _ => {}
            },
            InputMode::WinCelebration => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') => self.new_game(),
                _ => {}
            },
        }
    }

    /// Start a session for the entered target value
    pub fn handle_target(&mut self, input: &str) {
        let Ok(target) = input.trim().parse::<i64>() else {
            self.add_message("Enter an integer target value", MessageStyle::Error);
            return;
        };

        match Session::load(target, self.corpus, self.strategy) {
            Ok(session) => {
                let count = session.remaining();
                self.session = Some(session);
                self.input_buffer.clear();
                self.input_mode = InputMode::Feedback;
                self.add_message(
                    &format!("{count} candidate expressions evaluate to {target}"),
                    MessageStyle::Info,
                );
                self.compute_suggestion();
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn compute_suggestion(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.current_guess = None;
            return;
        };

        match session.next_guess() {
            Ok(guess) => {
                self.current_guess = Some(Self::guess_info(session, guess, true));
            }
            Err(e) => {
                self.current_guess = None;
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    fn guess_info(
        session: &Session<StrategyType>,
        guess: Expression,
        suggested: bool,
    ) -> GuessInfo {
        let candidates = session.candidates();
        GuessInfo {
            guess,
            score: PositionFrequencies::from_candidates(candidates).score(&guess),
            metrics: partition_metrics(&guess, candidates),
            suggested,
        }
    }

    /// Parse a feedback code and ask for confirmation
    pub fn handle_feedback(&mut self, input: &str) {
        let Some(guess) = self.current_guess.as_ref().map(|g| g.guess) else {
            self.add_message("No guess to give feedback for", MessageStyle::Error);
            return;
        };

        match input.parse::<Feedback>() {
            Ok(feedback) => {
                self.add_message(
                    &format!("{guess} → {}. Correct? (y/n)", color_names(&feedback)),
                    MessageStyle::Info,
                );
                self.pending = Some((guess, feedback));
                self.input_mode = InputMode::Confirm;
            }
            Err(e) => self.add_message(
                &format!("{e}. Use d/y/g, e.g. ggdydydg"),
                MessageStyle::Error,
            ),
        }
    }

    /// Apply the confirmed round
    pub fn apply_pending(&mut self) {
        let (Some((guess, feedback)), Some(session)) = (self.pending.take(), self.session.as_mut())
        else {
            self.input_mode = InputMode::Feedback;
            return;
        };
        self.input_buffer.clear();
        self.input_mode = InputMode::Feedback;

        match session.submit(guess, feedback) {
            Ok(RoundOutcome::Solved(_)) => {
                let guess_count = session.rounds();
                self.stats.games_won += 1;
                self.stats.total_games += 1;
                if guess_count <= 6 {
                    self.stats.guess_distribution[guess_count] += 1;
                }
                self.input_mode = InputMode::WinCelebration;

                let celebration = match guess_count {
                    1 => "🎯 First try! The suggestion was the answer.".to_string(),
                    2..=6 => format!("🎉 Solved in {guess_count} guesses!"),
                    _ => format!("🎊 Solved, after {guess_count} guesses."),
                };
                self.add_message(&celebration, MessageStyle::Success);
                self.add_message("n: new game, q: quit", MessageStyle::Info);
            }
            Ok(RoundOutcome::Determined(answer)) => {
                self.add_message(
                    &format!("Only one candidate left: {answer}"),
                    MessageStyle::Success,
                );
                self.compute_suggestion();
            }
            Ok(RoundOutcome::Narrowed { remaining }) => {
                self.add_message(
                    &format!("{remaining} candidates remaining"),
                    MessageStyle::Info,
                );
                self.compute_suggestion();
            }
            Err(SessionError::NoCandidates { .. }) => {
                self.current_guess = None;
                self.add_message(
                    "No candidates remain - feedback may be incorrect. Press 'u' to undo.",
                    MessageStyle::Error,
                );
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn new_game(&mut self) {
        if let Some(session) = &self.session
            && !matches!(session.phase(), Phase::Solved(_))
            && session.rounds() > 0
        {
            self.stats.total_games += 1;
        }
        self.session = None;
        self.current_guess = None;
        self.pending = None;
        self.input_buffer.clear();
        self.manual_guess.clear();
        self.messages.clear();
        self.input_mode = InputMode::Target;
        self.add_message(
            "New game started! Enter the value the hidden expression equals.",
            MessageStyle::Info,
        );
    }

    pub fn undo_last(&mut self) {
        let undone = self.session.as_mut().is_some_and(Session::undo);
        if undone {
            self.compute_suggestion();
            self.add_message("Undone!", MessageStyle::Info);
        } else {
            self.add_message("Nothing to undo!", MessageStyle::Error);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.session.as_ref().map_or(0, Session::remaining)
    }

    /// Replace the suggestion with the expression actually played
    pub fn use_manual_guess(&mut self) {
        let text = self.manual_guess.clone();
        let guess = match Expression::new(&text) {
            Ok(guess) => guess,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        };
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let info = Self::guess_info(session, guess, false);
        if let Some(suggested) = &self.current_guess
            && info.score < suggested.score
        {
            self.add_message(
                &format!(
                    "Note: suggested {} scored {:.4} ({:.4} more)",
                    suggested.guess,
                    suggested.score,
                    suggested.score - info.score
                ),
                MessageStyle::Info,
            );
        }

        self.add_message(
            &format!(
                "Using: {guess} (score {:.4}, worst case {})",
                info.score, info.metrics.worst_case
            ),
            MessageStyle::Success,
        );
        self.current_guess = Some(info);
        self.input_mode = InputMode::Feedback;
        self.manual_guess.clear();
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
