//! CubixTube Solver
//!
//! Prints cube layouts, applies named moves, checks that every move is undone
//! by its inverse, and searches for a way back from a random scramble to the
//! solved cube.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cubixtube::grid::format_slices;
use cubixtube::moves::{check_inverse_pairs, scramble};
use cubixtube::{codec, layouts, solver};
use cubixtube::{CubeState, Heuristic, Move, MoveSet, SearchConfig, SearchOutcome};

/// Solves the CubixTube puzzle.
#[derive(Parser)]
#[command(name = "cubixtube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the solved cube, or the hand-entered scramble.
    Show {
        #[arg(long)]
        scrambled: bool,
    },
    /// Apply moves to the solved cube and print the result.
    Apply {
        /// Move names such as `R`, `F_Prime`, `U2` or `M_RL_2`.
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Check that every move followed by its inverse restores the cube.
    Verify,
    /// Scramble the solved cube and search for a way back.
    Solve(SolveArgs),
}

const DEFAULT_MAX_POPS: usize = 200_000;

#[derive(Args)]
struct SolveArgs {
    /// Number of random moves to scramble with.
    #[arg(long, default_value_t = 2)]
    scramble: usize,
    /// Seed for the scramble. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = HeuristicArg::Global)]
    heuristic: HeuristicArg,
    #[arg(long, value_enum, default_value_t = MoveSetArg::Generators)]
    moves: MoveSetArg,
    /// Give up after this many frontier pops.
    #[arg(long, default_value_t = DEFAULT_MAX_POPS)]
    max_pops: usize,
}

impl Default for SolveArgs {
    fn default() -> Self {
        Self {
            scramble: 2,
            seed: None,
            heuristic: HeuristicArg::Global,
            moves: MoveSetArg::Generators,
            max_pops: DEFAULT_MAX_POPS,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    Global,
    Alpha,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Global => Heuristic::Global,
            HeuristicArg::Alpha => Heuristic::Alpha,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MoveSetArg {
    Generators,
    FaceTurns,
    All,
}

impl From<MoveSetArg> for MoveSet {
    fn from(arg: MoveSetArg) -> Self {
        match arg {
            MoveSetArg::Generators => MoveSet::Generators,
            MoveSetArg::FaceTurns => MoveSet::FaceTurns,
            MoveSetArg::All => MoveSet::All,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Show { scrambled }) => run_show(scrambled),
        Some(Command::Apply { moves }) => run_apply(&moves),
        Some(Command::Verify) => run_verify(),
        Some(Command::Solve(args)) => run_solve(&args),
        // default: solve a short scramble
        None => run_solve(&SolveArgs::default()),
    }
}

/// Prints a fixture layout slice by slice.
fn run_show(scrambled: bool) -> ExitCode {
    let cube = if scrambled {
        layouts::scrambled()
    } else {
        layouts::solved()
    };
    println!("{}", format_slices(&cube));
    println!("{} pieces", cube.piece_count());
    ExitCode::SUCCESS
}

/// Applies named moves to the solved cube.
fn run_apply(names: &[String]) -> ExitCode {
    let moves = match names.iter().map(|name| name.parse()).collect::<Result<Vec<Move>, _>>() {
        Ok(moves) => moves,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut cube = layouts::solved();
    cube.apply_all(&moves);
    println!("{}", format_slices(&cube));
    println!("{}", codec::encode(&cube));
    ExitCode::SUCCESS
}

/// Runs the inverse-pair check on both fixtures.
fn run_verify() -> ExitCode {
    let mut all_restored = true;
    for (label, cube) in [("solved", layouts::solved()), ("scrambled", layouts::scrambled())] {
        let (report, restored) = verify_report(&cube);
        println!("{label}:");
        println!("{report}");
        all_restored &= restored;
    }

    if all_restored {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// One line per named move, and whether every move was undone.
fn verify_report(cube: &CubeState) -> (String, bool) {
    let checks = check_inverse_pairs(cube);
    let restored = checks.iter().all(|check| check.restored);
    let lines: Vec<String> = checks
        .iter()
        .map(|check| {
            let status = if check.restored { "ok" } else { "FAILED" };
            format!("{:<12} {:<12} {status}", check.mv.name(), check.mv.inverse().name())
        })
        .collect();
    (lines.join("\n"), restored)
}

/// Scrambles the solved cube and searches back to it.
fn run_solve(args: &SolveArgs) -> ExitCode {
    let config = SearchConfig {
        moves: args.moves.into(),
        heuristic: args.heuristic.into(),
        max_pops: None,
    }
    .with_max_pops(args.max_pops);

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let goal = layouts::solved();
    let mut start = goal;
    let applied = scramble(&mut start, &mut rng, config.moves.moves(), args.scramble);
    info!("scramble (seed {seed}): {}", join_moves(&applied));
    println!("{}", format_slices(&start));

    match solver::solve(&start, &goal, &config) {
        Ok(SearchOutcome::Solved(solution)) => {
            println!("Solution ({} moves): {}", solution.moves.len(), join_moves(&solution.moves));
            ExitCode::SUCCESS
        }
        Ok(SearchOutcome::Exhausted(stats)) => {
            println!("No solution with these moves after {} pops", stats.pops);
            ExitCode::FAILURE
        }
        Ok(SearchOutcome::BudgetSpent(stats)) => {
            println!(
                "Gave up after {} pops (best estimate {})",
                stats.pops, stats.best_estimate
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("search failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn join_moves(moves: &[Move]) -> String {
    let names: Vec<&str> = moves.iter().map(|mv| mv.name()).collect();
    names.join(" ")
}
