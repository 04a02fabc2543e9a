#![allow(clippy::cast_precision_loss)]
//! Command-line drivers for the solver binary.
//!
//! Defines the `clap` interface and the per-puzzle flow: read a puzzle
//! file, solve it on a supervised worker thread with a wall-clock budget,
//! print the statistics banner, and write the solution file. The batch
//! driver walks a directory and keeps going when an individual puzzle
//! fails to parse, times out, or has no solution; a summary of outcomes
//! is printed at the end.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use sudoku_solver::sudoku::board::{BLANK, Board, CELLS, SIZE};
use sudoku_solver::sudoku::files;
use sudoku_solver::sudoku::solver::{SolveStats, Solver};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A batch Sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// a directory is solved as a batch and a file as a single puzzle.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `dir`, `file`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve every puzzle file (`.txt`, blank cells marked `X`) under a
    /// directory.
    Dir {
        /// Path to the directory containing puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a single puzzle file.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, printing the parsed grid before solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable printing of search statistics after each puzzle.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the solved grid to stdout.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Wall-clock budget per puzzle, in seconds. A solve exceeding it is
    /// abandoned and the batch moves on to the next puzzle.
    #[arg(short, long, default_value_t = 10)]
    pub(crate) timeout: u64,

    /// Directory for solution files, created on demand. Defaults to the
    /// directory of each puzzle file.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

/// How a single supervised puzzle run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PuzzleOutcome {
    /// Solved within budget; a solution file was written.
    Solved,
    /// Well-formed but has no completion.
    Unsolvable,
    /// The solve exceeded its wall-clock budget and was abandoned.
    TimedOut,
}

/// Outcome counts for one batch run.
#[derive(Debug, Default, Clone, Copy)]
struct BatchSummary {
    solved: usize,
    unsolvable: usize,
    timed_out: usize,
    failed: usize,
}

/// Result of a solve that finished within its budget.
#[derive(Debug, Clone)]
pub(crate) struct SolveOutcome {
    /// Whether a completion was found.
    pub solved: bool,
    /// The completed board on success, the untouched puzzle otherwise.
    pub board: Board,
    /// Search counters.
    pub stats: SolveStats,
    /// Time spent inside the solver.
    pub elapsed: Duration,
}

/// Solves every puzzle file in a directory.
///
/// Walks the directory recursively, solving each `.txt` file. Solution
/// files from earlier runs (`*.sln.txt`) are skipped, as are files with
/// other extensions. A puzzle that fails to parse, times out, or has no
/// solution is reported and counted; the batch never aborts on it.
///
/// # Errors
///
/// Only if the provided path is not a directory.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    let mut summary = BatchSummary::default();

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        let name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        // Output of an earlier run.
        if name.ends_with(files::SOLUTION_SUFFIX) {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "txt") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        match solve_file(file_path, common) {
            Ok(PuzzleOutcome::Solved) => summary.solved += 1,
            Ok(PuzzleOutcome::Unsolvable) => summary.unsolvable += 1,
            Ok(PuzzleOutcome::TimedOut) => summary.timed_out += 1,
            Err(e) => {
                eprintln!("{e}");
                summary.failed += 1;
            }
        }
    }

    print_summary(summary);

    Ok(())
}

/// Solves a single puzzle file: parse, supervised solve, stats banner,
/// solution file.
///
/// # Errors
///
/// If the puzzle file cannot be read or parsed, or the solution file
/// cannot be written.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<PuzzleOutcome, String> {
    println!("Solving: {}", path.display());

    let time = Instant::now();
    let board = files::read_puzzle_file(path).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    if common.debug {
        println!("Parsed puzzle:\n{board}");
    }

    let givens = count_givens(&board);
    let budget = Duration::from_secs(common.timeout);

    let Some(outcome) = solve_with_timeout(board, budget) else {
        eprintln!("Timed out after {}s: {}", common.timeout, path.display());
        return Ok(PuzzleOutcome::TimedOut);
    };

    if common.stats {
        let (allocated_mib, resident_mib) = memory_mib();
        print_stats(
            parse_time,
            outcome.elapsed,
            givens,
            outcome.stats,
            allocated_mib,
            resident_mib,
            outcome.solved,
        );
    }

    if !outcome.solved {
        println!("No solution found");
        return Ok(PuzzleOutcome::Unsolvable);
    }

    if common.print_solution {
        println!("Solution:\n{}", outcome.board);
    }

    if let Some(dir) = &common.output {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Unable to create output directory {}: {e}", dir.display()))?;
    }

    let solution = files::solution_path(path, common.output.as_deref());
    files::write_solution_file(&solution, &outcome.board)
        .map_err(|e| format!("Unable to write {}: {e}", solution.display()))?;
    println!("Solution written to: {}", solution.display());

    Ok(PuzzleOutcome::Solved)
}

/// Runs a solve on its own worker thread, waiting at most `budget`.
///
/// Returns `None` on timeout. The worker has no cancellation points; an
/// abandoned solve keeps running until it naturally terminates, while the
/// caller moves on.
pub(crate) fn solve_with_timeout(board: Board, budget: Duration) -> Option<SolveOutcome> {
    run_with_timeout(
        move || {
            let time = Instant::now();
            let mut solver = Solver::new(board);
            let solved = solver.solve();
            let elapsed = time.elapsed();

            SolveOutcome {
                solved,
                stats: solver.stats(),
                board: solver.into_board(),
                elapsed,
            }
        },
        budget,
    )
}

/// Spawns `work` on a detached thread and waits at most `budget` for its
/// result.
fn run_with_timeout<T, F>(work: F, budget: Duration) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        // The receiver is gone if the supervisor timed out; the result is
        // simply dropped.
        let _ = tx.send(work());
    });

    rx.recv_timeout(budget).ok()
}

/// Number of non-blank cells of a board.
fn count_givens(board: &Board) -> usize {
    let mut givens = 0;
    for row in 0..SIZE {
        for col in 0..SIZE {
            if board.get(row, col) != BLANK {
                givens += 1;
            }
        }
    }
    givens
}

/// Reads allocated and resident memory from jemalloc, in MiB.
fn memory_mib() -> (f64, f64) {
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of puzzle and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    givens: usize,
    s: SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n========================[ Puzzle Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", givens);
    stat_line("Blanks", CELLS - givens);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

/// Prints outcome counts at the end of a batch run.
fn print_summary(summary: BatchSummary) {
    println!("\n=========================[ Batch Summary ]===========================");
    stat_line("Solved", summary.solved);
    stat_line("Unsolvable", summary.unsolvable);
    stat_line("Timed out", summary.timed_out);
    stat_line("Failed to read", summary.failed);
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC_PUZZLE: &str =
        "53XX7XXXX6XX195XXXX98XXXX6X8XXX6XXX34XX8X3XX17XXX2XXX6X6XXXX28XXXX419XX5XXXX8XX79";
    const CLASSIC_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn test_options(output: Option<PathBuf>) -> CommonOptions {
        CommonOptions {
            debug: false,
            stats: false,
            print_solution: false,
            timeout: 30,
            output,
        }
    }

    #[test]
    fn test_run_with_timeout_returns_fast_results() {
        let result = run_with_timeout(|| 6 * 7, Duration::from_secs(5));
        assert_eq!(result, Some(42));
    }

    #[test]
    fn test_run_with_timeout_abandons_slow_workers() {
        let result = run_with_timeout(
            || {
                thread::sleep(Duration::from_secs(5));
                42
            },
            Duration::from_millis(50),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_solve_with_timeout_solves_within_budget() {
        let board: Board = CLASSIC_PUZZLE.parse().unwrap();
        let outcome = solve_with_timeout(board, Duration::from_secs(30)).unwrap();

        assert!(outcome.solved);
        assert_eq!(outcome.board.to_line(), CLASSIC_SOLUTION);
        assert!(outcome.stats.decisions > 0);
    }

    #[test]
    fn test_count_givens() {
        let puzzle: Board = CLASSIC_PUZZLE.parse().unwrap();
        assert_eq!(count_givens(&puzzle), 30);

        let solved: Board = CLASSIC_SOLUTION.parse().unwrap();
        assert_eq!(count_givens(&solved), CELLS);
    }

    #[test]
    fn test_solve_file_writes_solution_into_output_dir() {
        let dir = std::env::temp_dir().join(format!("sudoku-solver-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let puzzle_path = dir.join("classic.txt");
        std::fs::write(&puzzle_path, format!("{CLASSIC_PUZZLE}\n")).unwrap();

        let out_dir = dir.join("solutions");
        let outcome = solve_file(&puzzle_path, &test_options(Some(out_dir.clone()))).unwrap();
        assert_eq!(outcome, PuzzleOutcome::Solved);

        let written = std::fs::read_to_string(out_dir.join("classic.sln.txt")).unwrap();
        assert_eq!(written.replace('\n', ""), CLASSIC_SOLUTION);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_solve_file_reports_unsolvable_without_writing() {
        let dir = std::env::temp_dir().join(format!(
            "sudoku-solver-unsolvable-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        // Consistent givens, but (0, 8) has no legal digit: the row rules
        // out 1-8 and the 9 two rows down shares its box.
        let puzzle_path = dir.join("stuck.txt");
        let line = format!(
            "12345678X{}XXXXXX9XX{}",
            "X".repeat(9),
            "X".repeat(54)
        );
        std::fs::write(&puzzle_path, line).unwrap();

        let outcome = solve_file(&puzzle_path, &test_options(None)).unwrap();
        assert_eq!(outcome, PuzzleOutcome::Unsolvable);
        assert!(!dir.join("stuck.sln.txt").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_solve_file_surfaces_parse_errors() {
        let dir = std::env::temp_dir().join(format!("sudoku-solver-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let puzzle_path = dir.join("bad.txt");
        std::fs::write(&puzzle_path, "not a puzzle").unwrap();

        let err = solve_file(&puzzle_path, &test_options(None)).unwrap_err();
        assert!(err.contains("bad.txt"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
