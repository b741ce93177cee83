//! Sudoku puzzles as satisfiability problems.
//!
//! [`puzzle::Puzzle`] holds the validated clue grid, [`compiler::CnfCompiler`]
//! expands the four constraint families through the [`encoding::EncodingMode`]
//! selected for the pass, and [`solver::solve`] wires compilation, the SAT
//! backend and model decoding into one call.

/// The constraint compiler.
pub mod compiler;

/// The five exactly-one cardinality encodings.
pub mod encoding;

/// Error kinds for validation and decoding.
pub mod error;

/// The clue grid and its parser.
pub mod puzzle;

/// The solve orchestrator and model decoder.
pub mod solver;

/// Primary variable numbering and auxiliary allocation.
pub mod variables;
