//! Compiles a puzzle into CNF.
//!
//! Four "exactly one" families cover the grid — every cell holds one
//! value, every value appears once per row, once per column and once per
//! block — followed by one unit clause per given clue. Families are
//! emitted in that fixed order, row-major within each family, so a
//! (puzzle, mode) pair always yields the same clause list.

use crate::sat::cnf::{Clause, Cnf, Literal};
use crate::sudoku::encoding::EncodingMode;
use crate::sudoku::puzzle::Puzzle;
use crate::sudoku::variables::{CellVar, VarAllocator};
use itertools::iproduct;
use log::debug;

/// The CNF produced for one (puzzle, mode) pair, with the clause count
/// checkpointed before clue units were appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCnf {
    pub cnf: Cnf,
    pub mode: EncodingMode,
    /// Clauses emitted for the four structural families alone.
    pub structural_clauses: usize,
    /// Primary plus auxiliary variables handed out.
    pub variables: usize,
}

impl CompiledCnf {
    /// Total clauses, clue units included.
    #[must_use]
    pub fn total_clauses(&self) -> usize {
        self.cnf.len()
    }
}

/// Owns the clause list and the variable allocator for a single pass.
#[derive(Debug, Clone)]
pub struct CnfCompiler {
    size: usize,
    block_size: usize,
    mode: EncodingMode,
    clauses: Vec<Clause>,
    vars: VarAllocator,
}

impl CnfCompiler {
    #[must_use]
    pub fn new(block_size: usize, mode: EncodingMode) -> Self {
        let size = block_size * block_size;
        Self {
            size,
            block_size,
            mode,
            clauses: Vec::new(),
            vars: VarAllocator::new(size),
        }
    }

    /// Emits the structural families then the puzzle's clue units.
    #[must_use]
    pub fn compile(mut self, puzzle: &Puzzle) -> CompiledCnf {
        debug_assert_eq!(puzzle.size(), self.size);

        self.cell_constraints();
        self.row_constraints();
        self.column_constraints();
        self.block_constraints();
        let structural_clauses = self.clauses.len();
        debug!(
            "{}: {structural_clauses} structural clauses over {} variables",
            self.mode,
            self.vars.total()
        );

        self.clue_constraints(puzzle);
        debug!("{}: {} clauses with clues", self.mode, self.clauses.len());

        let variables = self.vars.total();
        CompiledCnf {
            cnf: Cnf::from_clauses(variables, self.clauses),
            mode: self.mode,
            structural_clauses,
            variables,
        }
    }

    fn exactly_one(&mut self, candidates: &[Literal]) {
        self.mode
            .encode_exactly_one(candidates, &mut self.clauses, &mut self.vars);
    }

    /// Every cell holds exactly one value.
    fn cell_constraints(&mut self) {
        for (row, col) in iproduct!(1..=self.size, 1..=self.size) {
            let candidates: Vec<Literal> = (1..=self.size)
                .map(|value| CellVar::new(row, col, value).literal(self.size))
                .collect();
            self.exactly_one(&candidates);
        }
    }

    /// Every value lands in exactly one column of each row.
    fn row_constraints(&mut self) {
        for (row, value) in iproduct!(1..=self.size, 1..=self.size) {
            let candidates: Vec<Literal> = (1..=self.size)
                .map(|col| CellVar::new(row, col, value).literal(self.size))
                .collect();
            self.exactly_one(&candidates);
        }
    }

    /// Every value lands in exactly one row of each column.
    fn column_constraints(&mut self) {
        for (col, value) in iproduct!(1..=self.size, 1..=self.size) {
            let candidates: Vec<Literal> = (1..=self.size)
                .map(|row| CellVar::new(row, col, value).literal(self.size))
                .collect();
            self.exactly_one(&candidates);
        }
    }

    /// Every value lands in exactly one cell of each B×B block.
    fn block_constraints(&mut self) {
        let b = self.block_size;
        for value in 1..=self.size {
            for (block_row, block_col) in iproduct!(0..b, 0..b) {
                let candidates: Vec<Literal> = iproduct!(1..=b, 1..=b)
                    .map(|(r, c)| {
                        CellVar::new(block_row * b + r, block_col * b + c, value)
                            .literal(self.size)
                    })
                    .collect();
                self.exactly_one(&candidates);
            }
        }
    }

    /// One unit clause per given clue.
    fn clue_constraints(&mut self, puzzle: &Puzzle) {
        for (row, col, value) in puzzle.clues() {
            self.clauses
                .push(Clause::unit(CellVar::new(row, col, value).literal(self.size)));
        }
    }
}
