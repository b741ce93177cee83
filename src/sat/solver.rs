//! The boundary between clause producers and a SAT solving engine.
//!
//! The engine is consumed as a black box: it accepts a clause set and
//! either declares it unsatisfiable or returns a total assignment. Any
//! backend implementing [`SatSolver`] can be swapped in without touching
//! the constraint compiler.

use crate::sat::cnf::{Cnf, Literal, Variable, var_of_lit};
use bit_vec::BitVec;

/// A total truth assignment over variables `1..=num_vars`, one bit per
/// variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model(BitVec);

impl Model {
    /// An all-false model over `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars + 1, false))
    }

    pub fn set(&mut self, var: Variable, value: bool) {
        self.0.set(var, value);
    }

    /// The polarity assigned to `var`; variables outside the model are
    /// false.
    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self.0.get(var).unwrap_or(false)
    }

    /// Whether `lit` is satisfied under this model.
    #[must_use]
    pub fn literal(&self, lit: Literal) -> bool {
        let value = self.value(var_of_lit(lit));
        if lit < 0 { !value } else { value }
    }
}

/// Outcome of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The formula is satisfiable; the model covers every variable.
    Satisfiable(Model),
    Unsatisfiable,
}

impl Verdict {
    #[must_use]
    pub const fn is_satisfiable(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Model> {
        match self {
            Self::Satisfiable(model) => Some(model),
            Self::Unsatisfiable => None,
        }
    }
}

/// A SAT solving engine.
pub trait SatSolver {
    /// Decides `cnf`, returning a total model when satisfiable.
    fn solve(&mut self, cnf: &Cnf) -> Verdict;
}
