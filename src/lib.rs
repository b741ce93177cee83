#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Sudoku solving by reduction to Boolean satisfiability.
//!
//! An N×N puzzle (N = block size squared) is compiled into CNF using one of
//! five interchangeable cardinality encodings, the clause set is handed to a
//! [`sat::solver::SatSolver`] backend, and the satisfying model is decoded
//! back into a filled grid.

/// The `sat` module provides generic CNF types, the solver boundary, and the
/// built-in DPLL backend.
pub mod sat;

/// The `sudoku` module implements the puzzle model, the cardinality
/// encoders, the constraint compiler and the solve orchestrator.
pub mod sudoku;
