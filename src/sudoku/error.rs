//! Error kinds surfaced while validating a puzzle or decoding a model.

use thiserror::Error;

/// Everything that can go wrong between receiving a clue grid and handing
/// back a solved one.
///
/// Shape and clue-range problems are rejected before any clause is
/// generated. A corrupt model can only come from a defective encoding and
/// aborts the solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The clue grid is not the N×N square the block size implies.
    #[error(
        "expected a {expected}x{expected} grid for block size {block_size}, found {rows} rows of width up to {cols}"
    )]
    InvalidShape {
        block_size: usize,
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// A clue digit lies outside `1..=N`.
    #[error("clue {value} at row {row}, column {col} is outside 1..={max}")]
    ClueOutOfRange {
        row: usize,
        col: usize,
        value: usize,
        max: usize,
    },

    /// The model asserts zero or several values for one cell, which a
    /// correct encoding can never produce.
    #[error("model asserts {found} values for cell ({row}, {col}); the encoding is defective")]
    CorruptModel {
        row: usize,
        col: usize,
        found: usize,
    },
}
