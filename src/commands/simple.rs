//! Simple interactive CLI mode
//!
//! Line-based solver without TUI. Each round the solver suggests a guess, the
//! operator enters the guess actually played and the colors the game showed,
//! confirms, and the pool is narrowed.

use crate::core::{Expression, Feedback};
use crate::corpus::Corpus;
use crate::output::formatters::{color_names, colored_guess};
use crate::solver::{Phase, RoundOutcome, Session, SessionError, Strategy};
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Remaining candidates are listed when there are at most this many
const SHOW_CANDIDATES: usize = 10;

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input or if the
/// corpus cannot be read.
pub fn run_simple<C, S>(corpus: &C, strategy: &S) -> Result<(), String>
where
    C: Corpus + ?Sized,
    S: Strategy + Clone,
{
    let stdin = io::stdin();
    run_protocol(stdin.lock(), io::stdout(), corpus, strategy)
}

/// Run the interactive protocol over any line reader and writer
///
/// End of input is treated as `quit`.
///
/// # Errors
///
/// Returns an error on I/O failure or if the corpus cannot be read.
pub fn run_protocol<R, W, C, S>(input: R, output: W, corpus: &C, strategy: &S) -> Result<(), String>
where
    R: BufRead,
    W: Write,
    C: Corpus + ?Sized,
    S: Strategy + Clone,
{
    let mut console = Console { input, output };
    console.banner()?;

    loop {
        let Some(mut session) = start_session(&mut console, corpus, strategy)? else {
            break;
        };
        if play(&mut console, &mut session)? == Flow::Quit {
            break;
        }
        console.say("\n🔄 New game started!\n")?;
    }

    console.say("\n👋 Thanks for playing!\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    NewGame,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Undo,
    New,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "undo" | "u" => Some(Self::Undo),
            "new" | "n" => Some(Self::New),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A validated value or a command typed in its place
enum Entry<T> {
    Value(T),
    Command(Command),
}

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn say(&mut self, text: impl Display) -> Result<(), String> {
        writeln!(self.output, "{text}").map_err(|e| e.to_string())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>, String> {
        write!(self.output, "{label}: ").map_err(|e| e.to_string())?;
        self.output.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|e| e.to_string())?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn banner(&mut self) -> Result<(), String> {
        self.say("\n╔══════════════════════════════════════════════════════════════╗")?;
        self.say("║              Mathler Solver - Interactive Mode               ║")?;
        self.say("╚══════════════════════════════════════════════════════════════╝\n")?;
        self.say("Enter the value the hidden expression equals, then play my suggestions.")?;
        self.say("After each guess, enter the colors the game showed, one per symbol:\n")?;
        self.say("  - g for green (correct position)")?;
        self.say("  - y for yellow (in the expression, wrong position)")?;
        self.say("  - d for dark (no further occurrences)\n")?;
        self.say("Commands: 'quit' to exit, 'new' for new game, 'undo' to undo last round\n")
    }
}

fn start_session<R, W, C, S>(
    console: &mut Console<R, W>,
    corpus: &C,
    strategy: &S,
) -> Result<Option<Session<S>>, String>
where
    R: BufRead,
    W: Write,
    C: Corpus + ?Sized,
    S: Strategy + Clone,
{
    loop {
        let Some(line) = console.prompt("Value the hidden expression equals")? else {
            return Ok(None);
        };
        if Command::parse(&line) == Some(Command::Quit) {
            return Ok(None);
        }
        let Ok(target) = line.parse::<i64>() else {
            console.say(format!("❌ '{line}' is not an integer\n"))?;
            continue;
        };

        match Session::load(target, corpus, strategy.clone()) {
            Ok(session) => {
                console.say(format!(
                    "Loaded {} candidate expressions for {target}\n",
                    session.remaining()
                ))?;
                return Ok(Some(session));
            }
            Err(SessionError::Corpus(e)) => return Err(e.to_string()),
            Err(e) => console.say(format!("❌ {e}\n"))?,
        }
    }
}

fn play<R, W, S>(console: &mut Console<R, W>, session: &mut Session<S>) -> Result<Flow, String>
where
    R: BufRead,
    W: Write,
    S: Strategy,
{
    loop {
        if session.phase() == Phase::Exhausted {
            console.say("\n❌ No candidates remain! Your feedback may be incorrect.")?;
            console.say("Type 'undo' to go back, 'new' to start over, or 'quit'.\n")?;
            let Some(line) = console.prompt("Command")? else {
                return Ok(Flow::Quit);
            };
            match Command::parse(&line) {
                Some(Command::Undo) => undo(console, session)?,
                Some(Command::New) => return Ok(Flow::NewGame),
                Some(Command::Quit) => return Ok(Flow::Quit),
                None => {}
            }
            continue;
        }

        let suggestion = session.next_guess().map_err(|e| e.to_string())?;
        show_round(console, session, suggestion)?;

        let guess = match read_guess(console, suggestion)? {
            Entry::Value(guess) => guess,
            Entry::Command(command) => match command {
                Command::Undo => {
                    undo(console, session)?;
                    continue;
                }
                Command::New => return Ok(Flow::NewGame),
                Command::Quit => return Ok(Flow::Quit),
            },
        };

        let feedback = match read_feedback(console)? {
            Entry::Value(feedback) => feedback,
            Entry::Command(command) => match command {
                Command::Undo => {
                    undo(console, session)?;
                    continue;
                }
                Command::New => return Ok(Flow::NewGame),
                Command::Quit => return Ok(Flow::Quit),
            },
        };

        match confirm(console, guess, feedback)? {
            Some(true) => {}
            Some(false) => {
                console.say("Discarded. Enter the round again.\n")?;
                continue;
            }
            None => return Ok(Flow::Quit),
        }

        match session.submit(guess, feedback) {
            Ok(RoundOutcome::Solved(_)) => {
                celebrate(console, session)?;
                let again = console.prompt("Play again? (yes/no)")?.unwrap_or_default();
                return Ok(match again.to_lowercase().as_str() {
                    "yes" | "y" => Flow::NewGame,
                    _ => Flow::Quit,
                });
            }
            Ok(RoundOutcome::Determined(answer)) => {
                console.say(format!("✓ Only one candidate left: {answer}\n"))?;
            }
            Ok(RoundOutcome::Narrowed { remaining }) => {
                console.say(format!("✓ There are {remaining} possible expressions left\n"))?;
            }
            // Reported at the top of the loop
            Err(SessionError::NoCandidates { .. }) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
}

fn show_round<R, W, S>(
    console: &mut Console<R, W>,
    session: &Session<S>,
    suggestion: Expression,
) -> Result<(), String>
where
    R: BufRead,
    W: Write,
    S: Strategy,
{
    let remaining = session.remaining();
    console.say("────────────────────────────────────────────────────────────")?;
    console.say(format!(
        "Round {}: {remaining} candidates remaining",
        session.rounds() + 1
    ))?;
    console.say("────────────────────────────────────────────────────────────")?;

    if remaining <= SHOW_CANDIDATES {
        console.say("Remaining candidates:")?;
        for candidate in session.candidates() {
            console.say(format!("  • {candidate}"))?;
        }
    }

    console.say(format!("\n📊 Suggested guess: {}\n", suggestion.text().bold()))
}

/// Read the guess actually played; an empty line accepts the suggestion
fn read_guess<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    suggestion: Expression,
) -> Result<Entry<Expression>, String> {
    loop {
        let Some(line) = console.prompt("Expression you guessed (Enter to accept)")? else {
            return Ok(Entry::Command(Command::Quit));
        };
        if line.is_empty() {
            return Ok(Entry::Value(suggestion));
        }
        if let Some(command) = Command::parse(&line) {
            return Ok(Entry::Command(command));
        }
        match Expression::new(&line) {
            Ok(guess) => return Ok(Entry::Value(guess)),
            Err(e) => console.say(format!("❌ {e}. Please try again.\n"))?,
        }
    }
}

fn read_feedback<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Entry<Feedback>, String> {
    loop {
        let Some(line) = console.prompt("Colors (d/y/g, e.g. ggdydydg)")? else {
            return Ok(Entry::Command(Command::Quit));
        };
        if let Some(command) = Command::parse(&line) {
            return Ok(Entry::Command(command));
        }
        match line.parse::<Feedback>() {
            Ok(feedback) => return Ok(Entry::Value(feedback)),
            Err(e) => console.say(format!("❌ {e}. Please try again.\n"))?,
        }
    }
}

/// Ask for confirmation; `None` at end of input
fn confirm<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    guess: Expression,
    feedback: Feedback,
) -> Result<Option<bool>, String> {
    console.say(format!("\nGuess:  {guess}"))?;
    console.say(format!(
        "Colors: {}  ({})",
        feedback.to_emoji(),
        color_names(&feedback)
    ))?;
    let Some(answer) = console.prompt("Is this correct? [Y/n]")? else {
        return Ok(None);
    };
    Ok(Some(matches!(
        answer.to_lowercase().as_str(),
        "" | "y" | "yes"
    )))
}

fn undo<R, W, S>(console: &mut Console<R, W>, session: &mut Session<S>) -> Result<(), String>
where
    R: BufRead,
    W: Write,
    S: Strategy,
{
    if session.undo() {
        console.say(format!(
            "✓ Undone! Back to round {} with {} candidates\n",
            session.rounds() + 1,
            session.remaining()
        ))
    } else {
        console.say("Nothing to undo!\n")
    }
}

fn celebrate<R, W, S>(console: &mut Console<R, W>, session: &Session<S>) -> Result<(), String>
where
    R: BufRead,
    W: Write,
    S: Strategy,
{
    let rounds = session.rounds();
    console.say(format!("\n{}", "═".repeat(70).bright_cyan()))?;
    console.say(
        "    🎉 🎊 ✨  M A T H L E R   S O L V E D !  ✨ 🎊 🎉    "
            .bright_green()
            .bold(),
    )?;
    console.say("═".repeat(70).bright_cyan())?;
    console.say(format!(
        "\n  Solution found in {} {}",
        rounds.to_string().bright_cyan().bold(),
        if rounds == 1 { "guess" } else { "guesses" }
    ))?;

    console.say("\n  Guess history:")?;
    for (i, round) in session.history().iter().enumerate() {
        console.say(format!(
            "    {}. {} {}",
            (i + 1).to_string().bright_black(),
            colored_guess(&round.guess, &round.feedback),
            round.feedback.to_emoji()
        ))?;
    }
    console.say(format!("\n{}\n", "═".repeat(70).bright_cyan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;
    use crate::solver::FrequencyStrategy;

    fn corpus() -> MemoryCorpus {
        MemoryCorpus::from_entries([
            (42, "33+57-48"),
            (42, "172-65*2"),
            (42, "47-23+18"),
            (42, "21+59-38"),
            (42, "(28-7)*2"),
            (42, "3*(15-1)"),
        ])
        .unwrap()
    }

    fn run(script: &str) -> String {
        let mut output = Vec::new();
        run_protocol(script.as_bytes(), &mut output, &corpus(), &FrequencyStrategy).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn quit_at_target_prompt() {
        let out = run("quit\n");
        assert!(out.contains("Thanks for playing"));
    }

    #[test]
    fn end_of_input_quits() {
        let out = run("");
        assert!(out.contains("Thanks for playing"));
    }

    #[test]
    fn invalid_target_reprompts() {
        let out = run("forty-two\n43\nquit\n");
        assert!(out.contains("'forty-two' is not an integer"));
        assert!(out.contains("No expressions in the corpus evaluate to 43"));
    }

    #[test]
    fn accepted_suggestion_narrows_pool() {
        // Suggestion is 47-23+18; against (28-7)*2 it shows dyyydddy
        let out = run("42\n\ndyyydddy\ny\nquit\n");
        assert!(out.contains("Loaded 6 candidate expressions for 42"));
        assert!(out.contains("Suggested guess"));
        assert!(out.contains("47-23+18"));
        assert!(out.contains("Only one candidate left: (28-7)*2"));
    }

    #[test]
    fn invalid_feedback_reprompts_without_change() {
        let out = run("42\n\nddd\nxxxxxxxx\ndyyydddy\ny\nquit\n");
        assert_eq!(out.matches("Please try again").count(), 2);
        assert!(out.contains("Only one candidate left"));
    }

    #[test]
    fn uppercase_feedback_is_rejected() {
        let out = run("42\n\nDYYYDDDY\nquit\n");
        assert!(out.contains("Please try again"));
        assert!(!out.contains("Only one candidate left"));
        assert!(!out.contains("Is this correct?"));
    }

    #[test]
    fn invalid_guess_reprompts() {
        let out = run("42\n12+34\nquit\n");
        assert!(out.contains("Please try again"));
    }

    #[test]
    fn declined_confirmation_discards_round() {
        let out = run("42\n\ndyyydddy\nn\nquit\n");
        assert!(out.contains("Discarded"));
        assert!(!out.contains("Only one candidate left"));
        assert_eq!(out.matches("Round 1:").count(), 2);
    }

    #[test]
    fn all_green_solves() {
        let out = run("42\n\ngggggggg\ny\nno\n");
        assert!(out.contains("S O L V E D"));
        assert!(out.contains("Thanks for playing"));
    }

    #[test]
    fn contradictory_feedback_offers_undo() {
        let out = run("42\n\ndddddddd\ny\nundo\nquit\n");
        assert!(out.contains("No candidates remain"));
        assert!(out.contains("Undone! Back to round 1 with 6 candidates"));
    }

    #[test]
    fn undo_with_empty_history() {
        let out = run("42\nundo\nquit\n");
        assert!(out.contains("Nothing to undo"));
    }

    #[test]
    fn manual_guess_is_used() {
        // Played 172-65*2 instead of the suggestion; answer (28-7)*2
        let out = run("42\n172-65*2\ndyygddgg\ny\nquit\n");
        assert!(out.contains("Guess:  172-65*2"));
        assert!(out.contains("dark"));
    }

    #[test]
    fn play_again_starts_new_game() {
        let out = run("42\n\ngggggggg\ny\nyes\nquit\n");
        assert!(out.contains("New game started"));
    }
}
