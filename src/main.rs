//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line batch solver for standard 9x9 Sudoku
//! puzzles stored as flat text files.
//!
//! A puzzle file contains 81 symbols in row-major order, either as a
//! single line or as nine lines of nine symbols. Digits `1`-`9` are given
//! cells and `X` marks a blank cell. A solved puzzle is written next to
//! its source (or into `--output`) as `<name>.sln.txt`: nine lines of
//! nine digits.
//!
//! The solving engine is a recursive backtracking search with first-blank
//! selection and ascending digit trials, so the same puzzle always
//! produces the same solution. Each puzzle is solved on its own worker
//! thread under a wall-clock budget; a puzzle exceeding the budget is
//! abandoned and the batch moves on.
//!
//! ## Usage
//!
//! ```sh
//! sudoku-solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided as the *only* argument (without a subcommand),
//!     a directory is solved as a batch and a file as a single puzzle.
//!
//!     ```sh
//!     sudoku-solver puzzles/
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`dir`**: Solve every `.txt` puzzle file under a directory.
//!     ```sh
//!     sudoku-solver dir --path puzzles [OPTIONS]
//!     ```
//!
//! 2.  **`file`**: Solve a single puzzle file.
//!     ```sh
//!     sudoku-solver file --path puzzles/puzzle1.txt [OPTIONS]
//!     ```
//!
//! 3.  **`completions`**: Generate shell completion scripts.
//!     ```sh
//!     sudoku-solver completions bash
//!     ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Print the parsed grid before solving (default: `false`).
//! -   `-s, --stats`: Print puzzle and search statistics (default: `true`).
//! -   `-p, --print-solution`: Print the solved grid to stdout (default: `false`).
//! -   `-t, --timeout <SECS>`: Wall-clock budget per puzzle (default: `10`).
//! -   `-o, --output <DIR>`: Directory for solution files (default: beside
//!     each puzzle).
//!
//! ## Example Invocations
//!
//! ```sh
//! # Solve a whole directory of puzzles, 5 seconds each
//! sudoku-solver dir --path puzzles --timeout 5
//!
//! # Solve one puzzle, print the grid, collect solutions in one place
//! sudoku-solver file --path puzzles/puzzle1.txt --print-solution --output solutions
//! ```

use crate::command_line::cli::{Cli, Commands};
use clap::{CommandFactory, Parser};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand: a directory becomes a batch run, a file a single solve.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let result = if path.is_dir() {
                command_line::cli::solve_dir(&path, &cli.common)
            } else {
                command_line::cli::solve_file(&path, &cli.common).map(|_| ())
            };

            exit_on_error(result);
            return;
        }
    }

    match cli.command {
        Some(Commands::Dir { path, common }) => {
            exit_on_error(command_line::cli::solve_dir(&path, &common));
        }

        Some(Commands::File { path, common }) => {
            exit_on_error(command_line::cli::solve_file(&path, &common).map(|_| ()));
        }

        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "sudoku-solver",
                &mut std::io::stdout(),
            );
        }

        None => {
            // This case is reached if no subcommand was provided and
            // `cli.path` was also None.
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Reports a fatal error and exits with a non-zero status.
fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
