//! Independent-bounds search (§4.6, C7): a maximal linearly independent
//! set of bounding hyperplanes of a (full-dimensional, bounded) union.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::config::HullConfig;
use crate::error::HullResult;
use crate::linform::LinForm;
use crate::matrix::Matrix;
use crate::rational::{self, Rational};
use crate::simplex::{LpOutcome, Tableau};
use crate::union_set::UnionSet;

/// Is `candidate` linearly independent of `basis` (which is assumed
/// already independent, i.e. of rank `basis.len()`)? Reduced-row-echelon
/// style: append and re-reduce; rank strictly increases iff independent.
fn is_independent(basis: &[Vec<Rational>], candidate: &[Rational]) -> bool {
    if basis.is_empty() {
        return candidate.iter().any(|v| !v.is_zero());
    }
    let mut rows = basis.to_vec();
    rows.push(candidate.to_vec());
    let (_, pivots) = Matrix::from_rows(rows).row_echelon();
    pivots.len() > basis.len()
}

/// §4.6: walk every equality/inequality of every member (in order),
/// keeping the ones whose normal extends the running independent set and
/// whose direction is bounded across the whole union, until `dim`
/// independent bounds are found (or the input is exhausted).
pub fn independent_bounds(s: &UnionSet, cfg: HullConfig) -> HullResult<Vec<LinForm>> {
    let dim = s.dim();
    let mut basis_linear: Vec<Vec<Rational>> = Vec::new();
    let mut bounds: Vec<LinForm> = Vec::new();

    'members: for m in s.nonempty_members() {
        let candidates: Vec<&LinForm> = m
            .equalities()
            .iter()
            .chain(m.inequalities().iter())
            .collect();
        for cand in candidates {
            if bounds.len() == dim {
                break 'members;
            }
            let lin: Vec<Rational> = (1..=dim)
                .map(|i| rational::from_bigint(cand.coeff(i).clone()))
                .collect();
            if !is_independent(&basis_linear, &lin) {
                continue;
            }

            let dir: Vec<BigInt> = (1..=dim).map(|i| cand.coeff(i).clone()).collect();
            let mut tightest: Option<Rational> = None;
            let mut bounded = true;
            for member in s.nonempty_members() {
                match Tableau::minimize(member, &dir, cfg)? {
                    LpOutcome::Unbounded => {
                        bounded = false;
                        break;
                    }
                    LpOutcome::Empty => continue,
                    LpOutcome::Optimal(v) => {
                        tightest = Some(match tightest {
                            None => v,
                            Some(cur) if v > cur => v,
                            Some(cur) => cur,
                        });
                    }
                }
            }
            if !bounded {
                continue;
            }

            let constant = -tightest.unwrap_or_else(Rational::zero);
            let mut row = vec![constant];
            row.extend(lin.clone());
            bounds.push(LinForm::from_rational_row(&row));
            basis_linear.push(lin);
        }
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedron::Polyhedron;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    #[test]
    fn unit_square_has_two_independent_bounds() {
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![0, 1, 0]));
        p.add_inequality(lf(vec![1, -1, 0]));
        p.add_inequality(lf(vec![0, 0, 1]));
        p.add_inequality(lf(vec![1, 0, -1]));
        let s = UnionSet::from_members(2, vec![p]).unwrap();
        let bounds = independent_bounds(&s, HullConfig::default()).unwrap();
        assert_eq!(bounds.len(), 2);
        // Each bound must itself be tight for the union (touches the set).
        let m = Matrix::from_linforms(&bounds);
        assert_eq!(m.rank(), 2);
    }
}
