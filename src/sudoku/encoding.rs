//! The five cardinality encodings for "exactly one of these is true".
//!
//! Every construction emits the at-least-one disjunction over the raw
//! candidates; they differ in how "at most one" is expressed, trading
//! clause count against auxiliary variables:
//!
//! | encoding   | extra clauses          | auxiliaries         |
//! |------------|------------------------|---------------------|
//! | binomial   | C(n,2)                 | 0                   |
//! | sequential | 3(n-2) + 2             | n-1                 |
//! | binary     | n·⌈log₂n⌉              | ⌈log₂n⌉             |
//! | commander  | binomial(g) + n + g·C(p,2) + g | g = ⌈n/p⌉, p = ⌈√n⌉ |
//! | product    | C(p,2) + C(q,2) + 2n   | p+q, q = ⌈n/p⌉      |
//!
//! Auxiliaries come out of the compilation session's [`VarAllocator`], so
//! constructions for different constraint groups can never collide.

use crate::sat::cnf::{Clause, Literal};
use crate::sudoku::variables::VarAllocator;
use clap::ValueEnum;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Selects the cardinality construction applied to every constraint group
/// in one compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EncodingMode {
    Binomial,
    Sequential,
    Binary,
    Commander,
    Product,
}

impl EncodingMode {
    /// Every mode, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::Binomial,
        Self::Sequential,
        Self::Binary,
        Self::Commander,
        Self::Product,
    ];

    /// Emits clauses equivalent to "exactly one of `candidates` is true".
    ///
    /// A single candidate collapses to a unit clause regardless of mode.
    pub fn encode_exactly_one(
        self,
        candidates: &[Literal],
        clauses: &mut Vec<Clause>,
        vars: &mut VarAllocator,
    ) {
        debug_assert!(!candidates.is_empty());
        if let [only] = candidates {
            clauses.push(Clause::unit(*only));
            return;
        }
        match self {
            Self::Binomial => binomial(candidates, clauses),
            Self::Sequential => sequential(candidates, clauses, vars),
            Self::Binary => binary(candidates, clauses, vars),
            Self::Commander => commander(candidates, clauses, vars),
            Self::Product => product(candidates, clauses, vars),
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Binomial => "BINOMIAL",
            Self::Sequential => "SEQUENTIAL",
            Self::Binary => "BINARY",
            Self::Commander => "COMMANDER",
            Self::Product => "PRODUCT",
        })
    }
}

/// One pairwise exclusion per unordered candidate pair; no auxiliaries.
fn binomial(candidates: &[Literal], clauses: &mut Vec<Clause>) {
    clauses.push(Clause::new(candidates.iter().copied()));
    for (&a, &b) in candidates.iter().tuple_combinations() {
        clauses.push(Clause::new([-a, -b]));
    }
}

/// A chain of prefix markers: `s[i]` holds once any of the first i+1
/// candidates does, which forbids a second true candidate further along.
fn sequential(candidates: &[Literal], clauses: &mut Vec<Clause>, vars: &mut VarAllocator) {
    let n = candidates.len();
    let s = vars.fresh_run(n - 1);

    clauses.push(Clause::new(candidates.iter().copied()));
    clauses.push(Clause::new([-candidates[0], s[0]]));
    clauses.push(Clause::new([-candidates[n - 1], -s[n - 2]]));
    for i in 2..n {
        clauses.push(Clause::new([-candidates[i - 1], s[i - 1]]));
        clauses.push(Clause::new([-s[i - 2], s[i - 1]]));
        clauses.push(Clause::new([-s[i - 2], -candidates[i - 1]]));
    }
}

/// Assigns each candidate the bit pattern of its position over ⌈log₂n⌉
/// fresh bits. Two distinct candidates disagree on some bit, so at most
/// one can hold.
fn binary(candidates: &[Literal], clauses: &mut Vec<Clause>, vars: &mut VarAllocator) {
    let bits = vars.fresh_run(bit_width(candidates.len()));

    clauses.push(Clause::new(candidates.iter().copied()));
    for (i, &candidate) in candidates.iter().enumerate() {
        for (j, &bit) in bits.iter().enumerate() {
            let expected = if (i >> j) & 1 == 1 { bit } else { -bit };
            clauses.push(Clause::new([-candidate, expected]));
        }
    }
}

/// Splits candidates into ⌈√n⌉-sized groups, each reporting to a fresh
/// commander variable that holds iff some group member does. Exclusion
/// then only needs the binomial treatment among commanders and within
/// single groups.
fn commander(candidates: &[Literal], clauses: &mut Vec<Clause>, vars: &mut VarAllocator) {
    let groups: Vec<&[Literal]> = candidates.chunks(isqrt_ceil(candidates.len())).collect();
    let commanders = vars.fresh_run(groups.len());

    clauses.push(Clause::new(candidates.iter().copied()));
    binomial(&commanders, clauses);
    for (&chief, group) in commanders.iter().zip(&groups) {
        for (&a, &b) in group.iter().tuple_combinations() {
            clauses.push(Clause::new([-chief, -a, -b]));
        }
        for &member in *group {
            clauses.push(Clause::new([chief, -member]));
        }
        clauses.push(Clause::new(
            std::iter::once(-chief).chain(group.iter().copied()),
        ));
    }
}

/// Lays candidates out on a p×q grid of indicator variables, p = ⌈√n⌉ and
/// q = ⌈n/p⌉. At most one active row and one active column pin down at
/// most one candidate.
fn product(candidates: &[Literal], clauses: &mut Vec<Clause>, vars: &mut VarAllocator) {
    let n = candidates.len();
    let p = isqrt_ceil(n);
    let q = n.div_ceil(p);
    let rows = vars.fresh_run(p);
    let cols = vars.fresh_run(q);

    clauses.push(Clause::new(candidates.iter().copied()));
    for (&a, &b) in rows.iter().tuple_combinations() {
        clauses.push(Clause::new([-a, -b]));
    }
    for (&a, &b) in cols.iter().tuple_combinations() {
        clauses.push(Clause::new([-a, -b]));
    }
    for (i, &candidate) in candidates.iter().enumerate() {
        clauses.push(Clause::new([-candidate, rows[i / q]]));
        clauses.push(Clause::new([-candidate, cols[i % q]]));
    }
}

/// ⌈log₂ n⌉ for n ≥ 1.
const fn bit_width(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

/// ⌈√n⌉.
fn isqrt_ceil(n: usize) -> usize {
    let root = n.isqrt();
    if root * root == n { root } else { root + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::{Cnf, var_of_lit};
    use crate::sat::dpll::Dpll;
    use crate::sat::solver::SatSolver;
    use std::collections::HashSet;

    fn encode(mode: EncodingMode, n: usize) -> (Vec<Clause>, VarAllocator) {
        let candidates: Vec<Literal> = (1..=n).map(|v| v as Literal).collect();
        let mut vars = VarAllocator::with_primary(n);
        let mut clauses = Vec::new();
        mode.encode_exactly_one(&candidates, &mut clauses, &mut vars);
        (clauses, vars)
    }

    /// Checks the clause set against every assignment of the n primary
    /// variables, with auxiliaries existentially quantified by the solver.
    fn check_exactly_one_semantics(mode: EncodingMode, n: usize) {
        let (clauses, vars) = encode(mode, n);
        for assignment in 0u32..(1 << n) {
            let mut cnf = Cnf::from_clauses(vars.total(), clauses.clone());
            for i in 0..n {
                let lit = (i + 1) as Literal;
                cnf.push(Clause::unit(if assignment >> i & 1 == 1 { lit } else { -lit }));
            }
            let satisfiable = Dpll::new().solve(&cnf).is_satisfiable();
            assert_eq!(
                satisfiable,
                assignment.count_ones() == 1,
                "{mode} with n={n} mishandles assignment {assignment:0width$b}",
                width = n
            );
        }
    }

    #[test]
    fn every_mode_means_exactly_one() {
        for mode in EncodingMode::ALL {
            for n in 1..=8 {
                check_exactly_one_semantics(mode, n);
            }
        }
    }

    #[test]
    fn single_candidate_degenerates_to_a_unit_clause() {
        for mode in EncodingMode::ALL {
            let (clauses, vars) = encode(mode, 1);
            assert_eq!(clauses, vec![Clause::unit(1)], "{mode}");
            assert_eq!(vars.auxiliary_count(), 0, "{mode}");
        }
    }

    #[test]
    fn every_encoding_emits_the_raw_disjunction() {
        for mode in EncodingMode::ALL {
            let (clauses, _) = encode(mode, 9);
            let expected: Vec<Literal> = (1..=9).collect();
            assert!(
                clauses.iter().any(|c| c.literals() == expected),
                "{mode} lacks the at-least-one clause"
            );
        }
    }

    #[test]
    fn clause_and_auxiliary_counts_match_the_table() {
        let n = 9;

        let (clauses, vars) = encode(EncodingMode::Binomial, n);
        assert_eq!(clauses.len(), 1 + 36);
        assert_eq!(vars.auxiliary_count(), 0);

        let (clauses, vars) = encode(EncodingMode::Sequential, n);
        assert_eq!(clauses.len(), 1 + 3 * (n - 2) + 2);
        assert_eq!(vars.auxiliary_count(), n - 1);

        let (clauses, vars) = encode(EncodingMode::Binary, n);
        assert_eq!(clauses.len(), 1 + n * 4);
        assert_eq!(vars.auxiliary_count(), 4);

        // Three groups of three: raw disjunction, binomial over the three
        // commanders, three prefixed pairs per group, one implication per
        // member, one reverse implication per group.
        let (clauses, vars) = encode(EncodingMode::Commander, n);
        assert_eq!(clauses.len(), 1 + (1 + 3) + 3 * 3 + 9 + 3);
        assert_eq!(vars.auxiliary_count(), 3);

        // p = q = 3.
        let (clauses, vars) = encode(EncodingMode::Product, n);
        assert_eq!(clauses.len(), 1 + 3 + 3 + 2 * n);
        assert_eq!(vars.auxiliary_count(), 6);
    }

    #[test]
    fn sequential_matches_the_reference_clause_shapes() {
        let (clauses, _) = encode(EncodingMode::Sequential, 4);
        let expected: Vec<Clause> = vec![
            Clause::new([1, 2, 3, 4]),
            Clause::new([-1, 5]),
            Clause::new([-4, -7]),
            Clause::new([-2, 6]),
            Clause::new([-5, 6]),
            Clause::new([-5, -2]),
            Clause::new([-3, 7]),
            Clause::new([-6, 7]),
            Clause::new([-6, -3]),
        ];
        assert_eq!(clauses, expected);
    }

    #[test]
    fn auxiliary_ranges_of_successive_groups_never_intersect() {
        for mode in EncodingMode::ALL {
            let mut vars = VarAllocator::with_primary(18);
            let mut clauses = Vec::new();
            let group_a: Vec<Literal> = (1..=9).collect();
            let group_b: Vec<Literal> = (10..=18).collect();

            mode.encode_exactly_one(&group_a, &mut clauses, &mut vars);
            let split = clauses.len();
            mode.encode_exactly_one(&group_b, &mut clauses, &mut vars);

            let auxiliaries = |chunk: &[Clause]| -> HashSet<usize> {
                chunk
                    .iter()
                    .flat_map(|c| c.literals().iter().map(|&l| var_of_lit(l)))
                    .filter(|&v| v > 18)
                    .collect()
            };
            let first = auxiliaries(&clauses[..split]);
            let second = auxiliaries(&clauses[split..]);
            assert!(
                first.is_disjoint(&second),
                "{mode} reused auxiliaries across groups"
            );
        }
    }

    #[test]
    fn bit_width_is_ceil_log2() {
        assert_eq!(bit_width(1), 0);
        assert_eq!(bit_width(2), 1);
        assert_eq!(bit_width(3), 2);
        assert_eq!(bit_width(4), 2);
        assert_eq!(bit_width(9), 4);
        assert_eq!(bit_width(16), 4);
        assert_eq!(bit_width(25), 5);
    }

    #[test]
    fn isqrt_ceil_rounds_up() {
        assert_eq!(isqrt_ceil(4), 2);
        assert_eq!(isqrt_ceil(5), 3);
        assert_eq!(isqrt_ceil(9), 3);
        assert_eq!(isqrt_ceil(10), 4);
        assert_eq!(isqrt_ceil(16), 4);
    }
}
