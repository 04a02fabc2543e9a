#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `board` module defines the 9x9 board, its construction from raw
/// symbols, and its serialization.
pub mod board;

/// The `files` module reads puzzle files and writes solution files.
pub mod files;

/// The `solver` module fills boards by recursive backtracking.
pub mod solver;
