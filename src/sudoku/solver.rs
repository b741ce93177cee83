//! End-to-end solving: compile, run a backend, decode the model.

use crate::sat::dpll::Dpll;
use crate::sat::solver::{Model, SatSolver, Verdict};
use crate::sudoku::compiler::CnfCompiler;
use crate::sudoku::encoding::EncodingMode;
use crate::sudoku::error::SolveError;
use crate::sudoku::puzzle::Puzzle;
use crate::sudoku::variables::CellVar;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// The classic 9×9 puzzle, used by examples and benchmarks.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A fully solved 9×9 grid.
pub const SOLVED_NINE: [[usize; 9]; 9] = [
    [6, 9, 3, 7, 8, 4, 5, 1, 2],
    [4, 8, 7, 5, 1, 2, 9, 3, 6],
    [1, 2, 5, 9, 6, 3, 8, 7, 4],
    [9, 3, 2, 6, 5, 1, 4, 8, 7],
    [5, 6, 8, 2, 4, 7, 3, 9, 1],
    [7, 4, 1, 3, 9, 8, 6, 2, 5],
    [3, 1, 9, 4, 7, 5, 2, 6, 8],
    [8, 5, 6, 1, 2, 9, 7, 4, 3],
    [2, 7, 4, 8, 3, 6, 1, 5, 9],
];

/// A fully solved 4×4 grid.
pub const SOLVED_FOUR: [[usize; 4]; 4] = [
    [1, 2, 3, 4],
    [3, 4, 1, 2],
    [2, 1, 4, 3],
    [4, 3, 2, 1],
];

/// Everything a caller learns from one solve: the verdict, the decoded
/// grid when satisfiable, and the compilation statistics.
///
/// Serializes with the camelCase keys of the original web service, e.g.
/// `numberOfClauseTotal`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    pub method: EncodingMode,
    pub satisfiable: bool,
    pub result: Option<Vec<Vec<usize>>>,
    /// Primary plus auxiliary variables.
    pub number_of_variable: usize,
    /// Structural clauses, before clue units.
    pub number_of_clause: usize,
    /// All clauses, clue units included.
    pub number_of_clause_total: usize,
    /// Compilation plus solving; I/O excluded.
    pub time_in_milliseconds: f64,
}

/// Solves with the built-in DPLL backend.
///
/// # Errors
///
/// [`SolveError::CorruptModel`] when the backend's model does not pin
/// every cell to exactly one value.
pub fn solve(puzzle: &Puzzle, mode: EncodingMode) -> Result<SolveReport, SolveError> {
    solve_with(puzzle, mode, &mut Dpll::new())
}

/// Compiles the puzzle, decides it with `backend`, and decodes the model.
///
/// # Errors
///
/// Same as [`solve`].
pub fn solve_with<S: SatSolver>(
    puzzle: &Puzzle,
    mode: EncodingMode,
    backend: &mut S,
) -> Result<SolveReport, SolveError> {
    let start = Instant::now();
    let compiled = CnfCompiler::new(puzzle.block_size(), mode).compile(puzzle);
    let verdict = backend.solve(&compiled.cnf);
    let elapsed = start.elapsed();

    let (satisfiable, result) = match verdict {
        Verdict::Satisfiable(model) => (true, Some(decode_model(puzzle.size(), &model)?)),
        Verdict::Unsatisfiable => (false, None),
    };
    debug!(
        "{mode}: {} in {:.3} ms",
        if satisfiable { "satisfiable" } else { "unsatisfiable" },
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(SolveReport {
        method: mode,
        satisfiable,
        result,
        number_of_variable: compiled.variables,
        number_of_clause: compiled.structural_clauses,
        number_of_clause_total: compiled.total_clauses(),
        time_in_milliseconds: elapsed.as_secs_f64() * 1000.0,
    })
}

/// Reads the filled grid back out of a satisfying model.
///
/// Only the primary range matters here; auxiliaries are ignored. Exactly
/// one candidate per cell must hold — anything else means the clause set
/// failed to pin the cell down, i.e. a defective encoding.
fn decode_model(size: usize, model: &Model) -> Result<Vec<Vec<usize>>, SolveError> {
    let mut board = vec![vec![0; size]; size];
    for (r, row) in board.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let mut found = 0;
            for value in 1..=size {
                if model.value(CellVar::new(r + 1, c + 1, value).index(size)) {
                    found += 1;
                    *cell = value;
                }
            }
            if found != 1 {
                return Err(SolveError::CorruptModel {
                    row: r + 1,
                    col: c + 1,
                    found,
                });
            }
        }
    }
    Ok(board)
}
