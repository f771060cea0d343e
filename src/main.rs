//! Edge-Matching Puzzle Solver
//!
//! Places square cards in an N x N grid so that every pair of touching edges
//! shows the same color with opposite halves (a unicorn head against a
//! unicorn tail). Finds all solutions, prints them, and checks them against a
//! listing of known solutions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use edgematch::error::PuzzleError;
use edgematch::{compare, grid, persistence, puzzle, solver, Grid, Puzzle};

/// Solves edge-matching card puzzles and verifies the solutions.
#[derive(Parser)]
#[command(name = "edgematch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in puzzles.
    List,
    /// Solve a puzzle and print every solution.
    Solve {
        /// Name of the puzzle (see `list`).
        puzzle: String,
        /// Stop after this many solutions.
        #[arg(short, long)]
        limit: Option<usize>,
        /// Split the search across all cores.
        #[arg(short, long)]
        parallel: bool,
        /// Also write the solution listing to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print only the number of solutions.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Solve a puzzle and compare the result with its known solutions.
    Verify {
        /// Name of the puzzle (see `list`).
        puzzle: String,
        /// Known-solutions listing [default: solutions/<PUZZLE>.txt].
        #[arg(short, long)]
        known: Option<PathBuf>,
        /// Split the search across all cores.
        #[arg(short, long)]
        parallel: bool,
    },
    /// Compare two solution listings for the same puzzle.
    Compare {
        /// Name of the puzzle both listings belong to.
        puzzle: String,
        /// Listing of known solutions.
        known: PathBuf,
        /// Listing to check against the known one.
        output: PathBuf,
    },
    /// Show the number of solutions in a listing.
    Count {
        /// Listing file.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => run_list(),
        Command::Solve {
            puzzle,
            limit,
            parallel,
            output,
            quiet,
        } => match load_puzzle(&puzzle) {
            Ok(puzzle) => run_solve(&puzzle, limit, parallel, output.as_deref(), quiet),
            Err(code) => code,
        },
        Command::Verify {
            puzzle,
            known,
            parallel,
        } => {
            let known = known.unwrap_or_else(|| persistence::known_solutions_path(&puzzle));
            match load_puzzle(&puzzle) {
                Ok(puzzle) => run_verify(&puzzle, &known, parallel),
                Err(code) => code,
            }
        }
        Command::Compare {
            puzzle,
            known,
            output,
        } => match load_puzzle(&puzzle) {
            Ok(puzzle) => run_compare(&puzzle, &known, &output),
            Err(code) => code,
        },
        Command::Count { file } => run_count(&file),
    }
}

/// Resolves a puzzle name. An unknown name is reported as a usage error;
/// an inconsistent definition fails with status 1.
fn load_puzzle(name: &str) -> Result<Puzzle, ExitCode> {
    match puzzle::by_name(name) {
        Ok(puzzle) => Ok(puzzle),
        Err(err @ PuzzleError::UnknownPuzzle { .. }) => {
            let usage = unknown_puzzle_error(err);
            eprint!("{usage}");
            Err(ExitCode::from(usage.exit_code() as u8))
        }
        Err(err) => {
            eprintln!("Invalid puzzle definition: {err}");
            Err(ExitCode::FAILURE)
        }
    }
}

/// Usage error for a puzzle name that is not built in.
fn unknown_puzzle_error(err: PuzzleError) -> clap::Error {
    Cli::command().error(ErrorKind::InvalidValue, err)
}

/// Prints the built-in puzzles.
fn run_list() -> ExitCode {
    for def in puzzle::BUILTIN {
        println!(
            "{:<10} {}x{} grid, {} cards",
            def.name,
            def.dim,
            def.dim,
            def.cards.len()
        );
    }
    ExitCode::SUCCESS
}

/// Solves the puzzle, prints the solutions and optionally saves them.
fn run_solve(
    puzzle: &Puzzle,
    limit: Option<usize>,
    parallel: bool,
    output: Option<&Path>,
    quiet: bool,
) -> ExitCode {
    let solutions = solver::solve(
        puzzle,
        solver::SolveOptions {
            max_solutions: limit,
            parallel,
        },
    );

    if quiet {
        println!("Found {} solutions", solutions.len());
    } else {
        print!("{}", grid::format_listing(puzzle, &solutions));
    }

    if let Some(path) = output {
        if let Err(e) = persistence::save(puzzle, &solutions, path) {
            eprintln!("Failed to save solutions to {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Solves the puzzle and compares the result with a known listing.
fn run_verify(puzzle: &Puzzle, known_path: &Path, parallel: bool) -> ExitCode {
    let known = match persistence::load(puzzle, known_path) {
        Ok(known) => known,
        Err(e) => {
            eprintln!("Failed to load known solutions: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let found = solver::solve(
        puzzle,
        solver::SolveOptions {
            max_solutions: None,
            parallel,
        },
    );

    report(puzzle, &known, &found)
}

/// Compares two listings of the same puzzle.
fn run_compare(puzzle: &Puzzle, known_path: &Path, output_path: &Path) -> ExitCode {
    let loaded = persistence::load(puzzle, known_path)
        .and_then(|known| Ok((known, persistence::load(puzzle, output_path)?)));

    match loaded {
        Ok((known, found)) => report(puzzle, &known, &found),
        Err(e) => {
            eprintln!("Failed to load solutions: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Prints a comparison report; the exit code reflects whether the sets match.
fn report(puzzle: &Puzzle, known: &[Grid], found: &[Grid]) -> ExitCode {
    let comparison = compare(puzzle, known, found);
    println!("{comparison}");

    if comparison.is_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prints the number of solutions in a listing.
fn run_count(path: &Path) -> ExitCode {
    match persistence::count(path) {
        Ok(count) => {
            println!("{} solutions", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to count solutions: {}", e);
            ExitCode::FAILURE
        }
    }
}
