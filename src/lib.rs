#![deny(missing_docs)]
//! This crate provides the board representation and backtracking search
//! used by the `sudoku-solver` binary to solve standard 9x9 Sudoku
//! puzzles.
//!
//! Puzzles are 81-symbol grids (`'1'`-`'9'`, `'X'` for a blank cell) in
//! row-major order. The solver fills every blank cell such that no digit
//! repeats within a row, a column, or a 3x3 box, trying blank cells in
//! row-major order and digits in ascending order, which makes its output
//! deterministic.
//!
//! ## Example
//!
//! ```
//! use sudoku_solver::sudoku::board::Board;
//! use sudoku_solver::sudoku::solver::Solver;
//!
//! let puzzle: Board =
//!     "53XX7XXXX6XX195XXXX98XXXX6X8XXX6XXX34XX8X3XX17XXX2XXX6X6XXXX28XXXX419XX5XXXX8XX79"
//!         .parse()
//!         .unwrap();
//!
//! let mut solver = Solver::new(puzzle);
//! assert!(solver.solve());
//! assert!(solver.board().to_line().starts_with("534678912"));
//! ```

/// The `sudoku` module implements the Sudoku puzzle solver, which fills a
/// 9x9 grid based on Sudoku rules.
pub mod sudoku;
