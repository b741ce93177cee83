//! A DPLL (Davis-Putnam-Logemann-Loveland) backend.
//!
//! The search alternates unit propagation to fixpoint with branching on
//! the first unassigned variable, cloning the assignment for the positive
//! branch and reusing it for the negative one. Good enough for the clause
//! sets this crate produces, where propagation does almost all the work.

use crate::sat::cnf::{Cnf, Literal, var_of_lit};
use crate::sat::solver::{Model, SatSolver, Verdict};
use rustc_hash::FxHashSet;

/// Assignment state of a single variable during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

/// The built-in solver backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dpll;

impl Dpll {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SatSolver for Dpll {
    fn solve(&mut self, cnf: &Cnf) -> Verdict {
        let assignment = vec![VarState::Unassigned; cnf.num_vars + 1];
        match search(cnf, assignment) {
            Some(assignment) => {
                // Unassigned variables are don't-care; false keeps the
                // model total without satisfying anything new.
                let mut model = Model::new(cnf.num_vars);
                for (var, state) in assignment.iter().enumerate() {
                    if matches!(state, VarState::Assigned(true)) {
                        model.set(var, true);
                    }
                }
                Verdict::Satisfiable(model)
            }
            None => Verdict::Unsatisfiable,
        }
    }
}

fn literal_value(assignment: &[VarState], lit: Literal) -> Option<bool> {
    match assignment[var_of_lit(lit)] {
        VarState::Unassigned => None,
        VarState::Assigned(value) => Some(if lit < 0 { !value } else { value }),
    }
}

fn assign(assignment: &mut [VarState], lit: Literal) {
    assignment[var_of_lit(lit)] = VarState::Assigned(lit > 0);
}

/// Applies unit propagation until nothing changes. Returns false on a
/// falsified clause.
fn propagate(cnf: &Cnf, assignment: &mut [VarState]) -> bool {
    let mut satisfied: FxHashSet<usize> = FxHashSet::default();
    loop {
        let mut changed = false;
        'clauses: for (idx, clause) in cnf.iter().enumerate() {
            if satisfied.contains(&idx) {
                continue;
            }
            let mut pending = None;
            let mut pending_count = 0usize;
            for &lit in clause.literals() {
                match literal_value(assignment, lit) {
                    Some(true) => {
                        satisfied.insert(idx);
                        continue 'clauses;
                    }
                    Some(false) => {}
                    None => {
                        pending_count += 1;
                        pending = Some(lit);
                    }
                }
            }
            match (pending_count, pending) {
                (0, _) => return false,
                (1, Some(lit)) => {
                    assign(assignment, lit);
                    satisfied.insert(idx);
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            return true;
        }
    }
}

fn is_sat(cnf: &Cnf, assignment: &[VarState]) -> bool {
    cnf.iter().all(|clause| {
        clause
            .literals()
            .iter()
            .any(|&lit| literal_value(assignment, lit) == Some(true))
    })
}

fn search(cnf: &Cnf, mut assignment: Vec<VarState>) -> Option<Vec<VarState>> {
    if !propagate(cnf, &mut assignment) {
        return None;
    }
    if is_sat(cnf, &assignment) {
        return Some(assignment);
    }

    let var = (1..=cnf.num_vars).find(|&v| assignment[v] == VarState::Unassigned)?;

    let mut true_branch = assignment.clone();
    true_branch[var] = VarState::Assigned(true);
    if let Some(solution) = search(cnf, true_branch) {
        return Some(solution);
    }

    assignment[var] = VarState::Assigned(false);
    search(cnf, assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::Clause;

    fn cnf_of(clauses: &[&[Literal]]) -> Cnf {
        let mut cnf = Cnf::new(0);
        for lits in clauses {
            cnf.push(Clause::new(lits.iter().copied()));
        }
        cnf
    }

    #[test]
    fn single_unit_is_satisfiable() {
        let verdict = Dpll::new().solve(&cnf_of(&[&[1]]));
        let model = verdict.model().unwrap();
        assert!(model.value(1));
    }

    #[test]
    fn contradictory_units_are_unsatisfiable() {
        let verdict = Dpll::new().solve(&cnf_of(&[&[1], &[-1]]));
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let verdict = Dpll::new().solve(&cnf_of(&[&[]]));
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn propagation_chains_through_implications() {
        // 1, 1→2, 2→3 forces all three true.
        let verdict = Dpll::new().solve(&cnf_of(&[&[1], &[-1, 2], &[-2, 3]]));
        let model = verdict.model().unwrap();
        assert!(model.value(1) && model.value(2) && model.value(3));
    }

    #[test]
    fn branching_finds_a_model() {
        let cnf = cnf_of(&[&[1, 2], &[-1, 3], &[-2, 3], &[-3, -1, 2]]);
        let verdict = Dpll::new().solve(&cnf);
        let model = verdict.model().unwrap();
        assert!(cnf.verify(model));
    }

    #[test]
    fn unsatisfiable_core_is_detected() {
        // All four polarities of (1, 2) together are unsatisfiable.
        let cnf = cnf_of(&[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]);
        assert_eq!(Dpll::new().solve(&cnf), Verdict::Unsatisfiable);
    }
}
