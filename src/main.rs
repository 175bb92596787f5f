//! Mathler Solver - CLI
//!
//! Mathler solver with TUI and CLI modes. Guesses are chosen by positional
//! symbol frequency over the expressions still consistent with the feedback.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mathler_solver::{
    commands::{
        SolveConfig, analyze_expression, run_benchmark, run_simple, solve_expression,
    },
    core::Expression,
    corpus::{Corpus, FileCorpus, loader::DEFAULT_CORPUS},
    output::{
        print_analysis_result, print_benchmark_result, print_solve_result, progress_bar, spinner,
    },
    solver::StrategyType,
};

#[derive(Parser)]
#[command(
    name = "mathler_solver",
    about = "Mathler solver using feedback constraints and positional symbol frequencies",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Strategy: frequency (default), random
    #[arg(short, long, global = true, default_value = "frequency")]
    strategy: String,

    /// Corpus file with one `target,expression` entry per line
    #[arg(short, long, global = true, default_value = DEFAULT_CORPUS)]
    corpus: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (interactive solver without TUI)
    Simple,

    /// Solve for a known answer, computing the feedback
    Solve {
        /// Value the hidden expression equals
        #[arg(allow_negative_numbers = true)]
        target: i64,

        /// The hidden expression
        answer: String,

        /// Show verbose output with candidate counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze an expression as a guess for a target
    Analyze {
        /// Value the hidden expression equals
        #[arg(allow_negative_numbers = true)]
        target: i64,

        /// Expression to analyze
        expression: String,
    },

    /// Benchmark solver performance on the expressions for a target
    Benchmark {
        /// Value the hidden expressions equal
        #[arg(allow_negative_numbers = true)]
        target: i64,

        /// Number of answers to test, taken in corpus order
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,
    },
}

/// Load the candidate pool for `target`, with a spinner while the corpus is read
fn load_pool(corpus: &FileCorpus, target: i64) -> Result<Vec<Expression>> {
    let pb = spinner(format!(
        "Loading expressions for {target} from {}",
        corpus.path().display()
    ));
    let pool = corpus
        .lookup(target)
        .with_context(|| format!("Failed to load the corpus for target {target}"));
    pb.finish_and_clear();

    let pool = pool?;
    if pool.is_empty() {
        anyhow::bail!("No expressions in the corpus evaluate to {target}");
    }
    Ok(pool)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let corpus = FileCorpus::new(&cli.corpus);
    let strategy = StrategyType::from_name(&cli.strategy);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(&corpus, strategy),
        Commands::Simple => run_simple(&corpus, &strategy).map_err(|e| anyhow::anyhow!(e)),
        Commands::Solve {
            target,
            answer,
            verbose,
        } => run_solve_command(&corpus, strategy, target, answer, verbose),
        Commands::Analyze { target, expression } => {
            run_analyze_command(&corpus, target, &expression)
        }
        Commands::Benchmark { target, count } => {
            run_benchmark_command(&corpus, &strategy, target, count)
        }
    }
}

fn run_solve_command(
    corpus: &FileCorpus,
    strategy: StrategyType,
    target: i64,
    answer: String,
    verbose: bool,
) -> Result<()> {
    let pool = load_pool(corpus, target)?;
    let config = SolveConfig::new(target, answer);
    let result = solve_expression(config, &pool, strategy).map_err(|e| anyhow::anyhow!(e))?;

    print_solve_result(&result, verbose);
    Ok(())
}

fn run_analyze_command(corpus: &FileCorpus, target: i64, expression: &str) -> Result<()> {
    let pool = load_pool(corpus, target)?;
    let result =
        analyze_expression(expression, target, &pool).map_err(|e| anyhow::anyhow!(e))?;
    print_analysis_result(&result);
    Ok(())
}

fn run_benchmark_command(
    corpus: &FileCorpus,
    strategy: &StrategyType,
    target: i64,
    count: usize,
) -> Result<()> {
    let pool = load_pool(corpus, target)?;
    let answers = &pool[..count.min(pool.len())];

    println!(
        "Running benchmark on {} of {} expressions for {target} ({} strategy)...",
        answers.len(),
        pool.len(),
        strategy.name()
    );

    let pb = progress_bar(answers.len());
    let result = run_benchmark(target, &pool, answers, strategy, &pb);
    print_benchmark_result(&result);
    Ok(())
}

fn run_play_command(corpus: &FileCorpus, strategy: StrategyType) -> Result<()> {
    use mathler_solver::interactive::{App, run_tui};

    let app = App::new(corpus, strategy);
    run_tui(app)
}
