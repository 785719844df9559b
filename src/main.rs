//! Tray Packing Puzzle Solver
//!
//! Solves the standard 5x11 tray with the sample twelve-piece set, or any
//! seeded variant of it. The search strategy is chosen with `--scorer`;
//! `--max-steps` bounds the run for rosters the chosen scorer struggles
//! with.

use clap::{Parser, Subcommand, ValueEnum};

use traypack::{
    format_solution, BruteForce, Puzzle, ScoreMethod, SearchState, Snug, Solver,
};

/// Solves a tray packing puzzle and prints the packing.
#[derive(Parser)]
#[command(name = "traypack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the sample puzzle and print the packing.
    Solve {
        /// Scoring method guiding the search.
        #[arg(long, value_enum, default_value_t = ScorerKind::Snug)]
        scorer: ScorerKind,
        /// Stop after this many expansion steps.
        #[arg(long)]
        max_steps: Option<u64>,
    },
    /// List the sample pieces with their orientation counts.
    Pieces,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScorerKind {
    /// Logicless sweep; every new candidate is explored first.
    Brute,
    /// Prefer placements hugging walls and already-filled cells.
    Snug,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { scorer, max_steps }) => run_solve(scorer, max_steps),
        Some(Command::Pieces) => run_pieces(),
        None => run_solve(ScorerKind::Snug, None),
    }
}

fn run_solve(scorer: ScorerKind, max_steps: Option<u64>) {
    let puzzle = Puzzle::sample();
    match scorer {
        ScorerKind::Brute => drive(&puzzle, BruteForce::new(), max_steps),
        ScorerKind::Snug => drive(&puzzle, Snug::new(), max_steps),
    }
}

/// Steps the solver, honoring the caller-side step ceiling.
fn drive<S: ScoreMethod>(puzzle: &Puzzle, scorer: S, max_steps: Option<u64>) {
    let state = match puzzle.initial_state(&[]) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to set up the puzzle: {e}");
            return;
        }
    };

    let mut solver = Solver::new(puzzle, state, scorer);
    while solver.status() == SearchState::Searching {
        if max_steps.is_some_and(|ceiling| solver.steps() >= ceiling) {
            println!("Step limit reached after {} steps", solver.steps());
            return;
        }
        solver.step();
    }

    match solver.status() {
        SearchState::Solved => {
            println!("Solved in {} steps:", solver.steps());
            print!("{}", format_solution(puzzle, solver.solution().unwrap_or(&[])));
        }
        SearchState::Exhausted => {
            println!("No packing exists: search exhausted after {} steps", solver.steps());
        }
        SearchState::Searching => unreachable!(),
    }
}

fn run_pieces() {
    for piece in traypack::sample_set() {
        println!(
            "{} ({} cells, {} orientations)",
            piece.name(),
            piece.area(),
            piece.orientations().len()
        );
        print!("{}", piece.shape().render());
        println!();
    }
}
