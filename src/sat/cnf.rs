//! CNF building blocks shared by the constraint compiler and the solver
//! backends.
//!
//! A formula is an AND of clauses, each clause an OR of literals. Literals
//! follow the DIMACS convention: a non-zero `i32` whose sign is the
//! polarity, so `5` asserts variable 5 and `-5` asserts its negation.

use crate::sat::solver::Model;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// A literal: non-zero, sign is polarity.
pub type Literal = i32;

/// A variable identifier, always positive.
pub type Variable = usize;

/// The variable a literal refers to.
#[must_use]
pub const fn var_of_lit(lit: Literal) -> Variable {
    lit.unsigned_abs() as Variable
}

/// A disjunction of literals.
///
/// The compiler emits mostly binary clauses, so literals stay inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause(SmallVec<[Literal; 8]>);

impl Clause {
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self(literals.into_iter().collect())
    }

    /// A clause asserting a single literal.
    #[must_use]
    pub fn unit(lit: Literal) -> Self {
        Self(SmallVec::from_slice(&[lit]))
    }

    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

/// An ordered clause set together with the number of variables it ranges
/// over.
///
/// Clause order never affects satisfiability but is preserved so that
/// statistics and fixtures are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    pub num_vars: usize,
}

impl Cnf {
    /// An empty formula over `num_vars` variables.
    #[must_use]
    pub const fn new(num_vars: usize) -> Self {
        Self {
            clauses: Vec::new(),
            num_vars,
        }
    }

    /// Wraps an already-built clause list.
    #[must_use]
    pub const fn from_clauses(num_vars: usize, clauses: Vec<Clause>) -> Self {
        Self { clauses, num_vars }
    }

    /// Appends a clause, widening the declared variable range if the clause
    /// mentions a higher identifier.
    pub fn push(&mut self, clause: Clause) {
        for &lit in clause.literals() {
            self.num_vars = self.num_vars.max(var_of_lit(lit));
        }
        self.clauses.push(clause);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// True when every clause has at least one literal satisfied by `model`.
    #[must_use]
    pub fn verify(&self, model: &Model) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.literals().iter().any(|&lit| model.literal(lit)))
    }
}

impl fmt::Display for Cnf {
    /// Renders the formula in DIMACS CNF: a `p cnf` header followed by one
    /// zero-terminated line per clause.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{} 0", clause.literals().iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_widens_variable_range() {
        let mut cnf = Cnf::new(2);
        cnf.push(Clause::new([1, -2]));
        assert_eq!(cnf.num_vars, 2);
        cnf.push(Clause::new([-7]));
        assert_eq!(cnf.num_vars, 7);
    }

    #[test]
    fn dimacs_rendering() {
        let mut cnf = Cnf::new(3);
        cnf.push(Clause::from(vec![1, -2]));
        cnf.push(Clause::unit(3));
        assert_eq!(cnf.to_string(), "p cnf 3 2\n1 -2 0\n3 0\n");
    }

    #[test]
    fn verify_checks_every_clause() {
        let mut cnf = Cnf::new(2);
        cnf.push(Clause::new([1, 2]));
        cnf.push(Clause::unit(-2));

        let mut model = Model::new(2);
        model.set(1, true);
        assert!(cnf.verify(&model));

        model.set(2, true);
        assert!(!cnf.verify(&model));
    }

    #[test]
    fn var_of_lit_drops_polarity() {
        assert_eq!(var_of_lit(5), 5);
        assert_eq!(var_of_lit(-5), 5);
    }
}
