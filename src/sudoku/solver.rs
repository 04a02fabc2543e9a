//! Backtracking search over a [`Board`].
//!
//! The solver fills every blank cell of a board such that no digit repeats
//! within a row, a column, or a 3x3 box, or reports that no such assignment
//! exists. The search is deterministic: blank cells are visited in
//! row-major order and candidate digits are tried in ascending order, so a
//! puzzle with several completions always yields the lexicographically
//! first one.
//!
//! Unsolvable is not an error. `solve` returns `false` and leaves the
//! board exactly as given; the only hard failures in this crate belong to
//! board construction.

use crate::sudoku::board::{BLANK, BOX_SIZE, Board, SIZE};
use smallvec::SmallVec;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Number of tentative digit placements.
    pub decisions: usize,
    /// Number of placements rolled back after a failed branch.
    pub backtracks: usize,
}

/// A backtracking Sudoku solver owning the board it works on.
#[derive(Debug, Clone)]
pub struct Solver {
    board: Board,
    stats: SolveStats,
}

impl Solver {
    /// Creates a solver for the given board.
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            stats: SolveStats {
                decisions: 0,
                backtracks: 0,
            },
        }
    }

    /// The board in its current state: the original puzzle before
    /// [`Solver::solve`], the completed grid after a successful solve,
    /// and the unchanged puzzle after an unsuccessful one.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the solver, returning the board.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Counters for the last [`Solver::solve`] call.
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Attempts to fill every blank cell.
    ///
    /// Returns `true` with the board fully and validly filled when a
    /// solution exists. Returns `false` with the board left in its
    /// original state when the givens already conflict or no completion
    /// exists.
    pub fn solve(&mut self) -> bool {
        if !self.givens_consistent() {
            return false;
        }

        self.search()
    }

    /// Verifies the uniqueness invariant over the given (non-blank) cells.
    ///
    /// A board that starts out contradictory can never be completed, so
    /// the search is not worth entering.
    fn givens_consistent(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.board.get(row, col);
                if value != BLANK && self.conflicts(row, col, value) {
                    return false;
                }
            }
        }
        true
    }

    /// Recursive backtracking with first-blank selection.
    fn search(&mut self) -> bool {
        let Some((row, col)) = self.board.first_blank() else {
            // No blanks left: the board is complete.
            return true;
        };

        let candidates: SmallVec<[u8; SIZE]> = (1..=9)
            .filter(|&digit| !self.conflicts(row, col, digit))
            .collect();

        for digit in candidates {
            self.stats.decisions += 1;
            self.board.place(row, col, digit);

            if self.search() {
                return true;
            }

            self.board.clear(row, col);
            self.stats.backtracks += 1;
        }

        false
    }

    /// Whether placing `digit` at (`row`, `col`) would duplicate a digit
    /// already present in the cell's row, column, or 3x3 box.
    ///
    /// The cell under test is excluded from all three scans, so the check
    /// works both for blank cells during search and for occupied cells
    /// during the givens pre-check.
    fn conflicts(&self, row: usize, col: usize, digit: u8) -> bool {
        for c in 0..SIZE {
            if c != col && self.board.get(row, c) == digit {
                return true;
            }
        }

        for r in 0..SIZE {
            if r != row && self.board.get(r, col) == digit {
                return true;
            }
        }

        let start_row = row - row % BOX_SIZE;
        let start_col = col - col % BOX_SIZE;

        for r in start_row..start_row + BOX_SIZE {
            for c in start_col..start_col + BOX_SIZE {
                if (r, c) != (row, col) && self.board.get(r, c) == digit {
                    return true;
                }
            }
        }

        false
    }
}

impl From<Board> for Solver {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}
