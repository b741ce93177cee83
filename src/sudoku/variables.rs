//! Primary variable numbering and auxiliary allocation.

use crate::sat::cnf::{Literal, Variable};

/// The proposition "cell (`row`, `col`) holds `value`", all 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellVar {
    pub row: usize,
    pub col: usize,
    pub value: usize,
}

impl CellVar {
    #[must_use]
    pub const fn new(row: usize, col: usize, value: usize) -> Self {
        Self { row, col, value }
    }

    /// Dense index into `[1, N³]` for grid size `size`.
    ///
    /// Clue emission and model decoding both go through this mapping; a
    /// mismatch between the two would silently shuffle cells.
    #[must_use]
    pub const fn index(self, size: usize) -> Variable {
        (self.row - 1) * size * size + (self.col - 1) * size + self.value
    }

    /// The positive literal asserting this proposition.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn literal(self, size: usize) -> Literal {
        self.index(size) as Literal
    }
}

/// Hands out variable identifiers for one compilation session.
///
/// Primary identifiers occupy `[1, primary]`; auxiliaries start right
/// after and the counter only ever moves forward, so groups encoded back
/// to back can never share an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarAllocator {
    primary: usize,
    next: usize,
}

impl VarAllocator {
    /// Allocator for an N×N grid: N³ primary variables.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self::with_primary(size * size * size)
    }

    /// Allocator whose primary range is exactly `count` identifiers.
    #[must_use]
    pub const fn with_primary(count: usize) -> Self {
        Self {
            primary: count,
            next: count + 1,
        }
    }

    /// The next free auxiliary identifier, as a positive literal.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn fresh(&mut self) -> Literal {
        let var = self.next;
        self.next += 1;
        var as Literal
    }

    /// Allocates `count` consecutive auxiliaries, in order.
    pub fn fresh_run(&mut self, count: usize) -> Vec<Literal> {
        (0..count).map(|_| self.fresh()).collect()
    }

    #[must_use]
    pub const fn primary_count(&self) -> usize {
        self.primary
    }

    #[must_use]
    pub const fn auxiliary_count(&self) -> usize {
        self.next - 1 - self.primary
    }

    /// Total identifiers handed out so far, primary plus auxiliary.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn index_is_a_bijection_onto_the_primary_range() {
        let size = 4;
        let mut seen = HashSet::new();
        for row in 1..=size {
            for col in 1..=size {
                for value in 1..=size {
                    seen.insert(CellVar::new(row, col, value).index(size));
                }
            }
        }
        assert_eq!(seen.len(), size * size * size);
        assert_eq!(seen.iter().min(), Some(&1));
        assert_eq!(seen.iter().max(), Some(&(size * size * size)));
    }

    #[test]
    fn index_matches_the_dense_formula() {
        assert_eq!(CellVar::new(1, 1, 1).index(9), 1);
        assert_eq!(CellVar::new(1, 1, 9).index(9), 9);
        assert_eq!(CellVar::new(1, 2, 1).index(9), 10);
        assert_eq!(CellVar::new(2, 1, 1).index(9), 82);
        assert_eq!(CellVar::new(9, 9, 9).index(9), 729);
    }

    #[test]
    fn auxiliaries_start_after_the_primary_range() {
        let mut alloc = VarAllocator::new(4);
        assert_eq!(alloc.primary_count(), 64);
        assert_eq!(alloc.fresh(), 65);
        assert_eq!(alloc.fresh(), 66);
        assert_eq!(alloc.auxiliary_count(), 2);
        assert_eq!(alloc.total(), 66);
    }

    #[test]
    fn fresh_run_is_consecutive() {
        let mut alloc = VarAllocator::with_primary(10);
        assert_eq!(alloc.fresh_run(3), vec![11, 12, 13]);
        assert_eq!(alloc.fresh_run(2), vec![14, 15]);
    }
}
