//! Puzzle ingestion and solution emission.
//!
//! Puzzle files are line-oriented flat text: 81 symbols, each `'1'`-`'9'`
//! or `'X'` for a blank cell, laid out either as one line or as a 9x9
//! grid. Newline and carriage-return characters are stripped before the
//! remaining symbols are handed to board construction, which validates
//! them. Solution files are 9 lines of 9 digit characters, each
//! newline-terminated, named after the source puzzle file with a fixed
//! `.sln.txt` suffix.

use crate::sudoku::board::{Board, ParseBoardError};
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to a puzzle file's stem to name its solution file.
pub const SOLUTION_SUFFIX: &str = ".sln.txt";

/// Why a puzzle could not be produced from a byte stream.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleErrorKind {
    /// The stream could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The stream contents are not a well-formed puzzle.
    #[error(transparent)]
    Malformed(#[from] ParseBoardError),
}

/// A puzzle file that could not be read or parsed, carrying the source
/// path so a batch run can report and skip it.
#[derive(Debug, thiserror::Error)]
#[error("{}: {kind}", path.display())]
pub struct PuzzleFileError {
    /// Path of the puzzle file.
    pub path: PathBuf,
    /// The underlying failure.
    pub kind: PuzzleErrorKind,
}

/// Parses a puzzle from any buffered reader.
///
/// Reads the whole stream, strips `'\n'` and `'\r'`, and hands every
/// remaining character to [`Board::from_symbols`].
///
/// # Errors
///
/// [`PuzzleErrorKind::Io`] if the stream cannot be read,
/// [`PuzzleErrorKind::Malformed`] if its contents fail board
/// construction.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Board, PuzzleErrorKind> {
    let lines: Vec<String> = reader.lines().try_collect()?;

    // `lines` already strips `\r\n` and `\n`; stray carriage returns from
    // `\r`-only line endings still need dropping.
    let symbols = lines
        .iter()
        .flat_map(|line| line.chars())
        .filter(|&c| c != '\r');

    let board = Board::from_symbols(symbols)?;
    Ok(board)
}

/// Reads and parses the puzzle file at `path`.
///
/// # Errors
///
/// Any [`PuzzleErrorKind`] from opening, reading, or parsing the file,
/// wrapped with `path`.
pub fn read_puzzle_file(path: &Path) -> Result<Board, PuzzleFileError> {
    let attach = |kind: PuzzleErrorKind| PuzzleFileError {
        path: path.to_path_buf(),
        kind,
    };

    let file = File::open(path).map_err(|e| attach(e.into()))?;
    parse_puzzle(BufReader::new(file)).map_err(attach)
}

/// Writes a solved board to `path` as 9 lines of 9 digit characters,
/// each newline-terminated.
///
/// Intended only for fully solved boards; blank cells would be written
/// as `'X'` symbols.
///
/// # Errors
///
/// Any [`io::Error`] from creating or writing the file.
pub fn write_solution_file(path: &Path, board: &Board) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{board}")
}

/// Derives the solution file path for a puzzle file: the puzzle's file
/// stem plus [`SOLUTION_SUFFIX`], placed in `output_dir` when given and
/// beside the puzzle file otherwise.
#[must_use]
pub fn solution_path(puzzle_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = puzzle_path
        .file_stem()
        .unwrap_or_else(|| puzzle_path.as_os_str());

    let mut name = stem.to_os_string();
    name.push(SOLUTION_SUFFIX);

    match output_dir {
        Some(dir) => dir.join(name),
        None => puzzle_path.with_file_name(name),
    }
}
