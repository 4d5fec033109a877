use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Subscriber;
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

use klotski_solver::{build_graph, parse_board, render_path, solve, Puzzle};

/// Finds a shortest solution to a 4x5 sliding-block puzzle and prints every
/// board along the way.
#[derive(Parser)]
#[command(name = "klotski-solver")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Built-in puzzle to solve
    #[arg(long, value_enum, default_value = "level-19")]
    puzzle: Puzzle,

    /// Solve this board instead: five rows of four cells separated by '/',
    /// with a space for each empty cell
    #[arg(long)]
    board: Option<String>,

    /// Log search statistics
    #[arg(short, long)]
    verbose: bool,
}

/// Progress messages share stdout with the boards, so each event is written
/// as its bare message.
fn subscriber<W>(verbose: bool, ansi: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .without_time()
        .with_level(false)
        .with_target(false)
        .compact()
        .finish()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let ansi = std::io::stdout().is_terminal();
    tracing::subscriber::set_global_default(subscriber(cli.verbose, ansi, std::io::stdout))
        .context("failed to install log subscriber")?;

    let initial = match &cli.board {
        Some(text) => parse_board(text).with_context(|| format!("invalid board {:?}", text))?,
        None => cli.puzzle.board(),
    };

    let graph = build_graph(&initial);
    let solution = solve(&graph);

    for state in render_path(&initial, &solution) {
        println!("{}\n", state);
    }

    Ok(())
}
