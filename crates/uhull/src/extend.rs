//! Facet extension loop (§4.9, C10): breadth-first growth of the hull
//! from one seed facet.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::config::HullConfig;
use crate::error::HullResult;
use crate::linform::LinForm;
use crate::matrix::Matrix;
use crate::polyhedron::Polyhedron;
use crate::rational::{self, Rational};
use crate::reduce;
use crate::union_set::UnionSet;
use crate::wrap;

fn linear_part(f: &LinForm) -> Vec<Rational> {
    (1..=f.dim())
        .map(|i| rational::from_bigint(f.coeff(i).clone()))
        .collect()
}

/// Slices `m` by `f = 0` and re-expresses the result in a coordinate
/// system where `f`'s direction is the first variable, then drops that
/// (now pinned) variable, yielding a polyhedron one dimension lower.
/// `t` is the coordinate change with `f`'s linear part mapped to `e1`
/// (see `Matrix::complete_basis`, same construction as in `wrap`).
fn slice_and_drop_first(m: &Polyhedron, f: &LinForm, t: &Matrix) -> Polyhedron {
    let dim = m.dim();
    let width = dim + 1;
    let transform = |c: &LinForm| -> Vec<Rational> {
        let new_lin = t.apply_row(&linear_part(c));
        let mut row = vec![rational::from_bigint(c.constant().clone())];
        row.extend(new_lin);
        row
    };

    let mut eq_rows: Vec<Vec<Rational>> = m.equalities().iter().map(transform).collect();
    let mut ineq_rows: Vec<Vec<Rational>> = m.inequalities().iter().map(transform).collect();
    eq_rows.push(transform(f));

    let pivot_idx = eq_rows
        .iter()
        .position(|r| !r[1].is_zero())
        .expect("f's transformed row always has a unit coefficient at index 1");
    let pivot_val = eq_rows[pivot_idx][1].clone();
    for c in 0..width {
        eq_rows[pivot_idx][c] = &eq_rows[pivot_idx][c] / &pivot_val;
    }
    let pivot_row = eq_rows[pivot_idx].clone();
    for (idx, row) in eq_rows.iter_mut().enumerate() {
        if idx == pivot_idx {
            continue;
        }
        let factor = row[1].clone();
        if factor.is_zero() {
            continue;
        }
        for c in 0..width {
            row[c] = &row[c] - &factor * &pivot_row[c];
        }
    }
    for row in ineq_rows.iter_mut() {
        let factor = row[1].clone();
        if factor.is_zero() {
            continue;
        }
        for c in 0..width {
            row[c] = &row[c] - &factor * &pivot_row[c];
        }
    }
    eq_rows.remove(pivot_idx);

    let drop_col1 = |row: &[Rational]| -> Vec<Rational> {
        let mut out = Vec::with_capacity(row.len() - 1);
        out.push(row[0].clone());
        out.extend(row[2..].iter().cloned());
        out
    };
    let equalities: Vec<LinForm> = eq_rows
        .iter()
        .map(|r| LinForm::from_rational_row(&drop_col1(r)))
        .filter(|e| !e.is_zero_form())
        .collect();
    let inequalities: Vec<LinForm> = ineq_rows
        .iter()
        .map(|r| LinForm::from_rational_row(&drop_col1(r)))
        .collect();
    Polyhedron::from_constraints(dim - 1, equalities, inequalities)
}

/// §4.9 step 1: slices `s` by `f = 0`, recurses one dimension lower, and
/// preimages the result's facets back — these are the ridges of `f`.
pub fn compute_facet_ridges(s: &UnionSet, f: &LinForm, cfg: HullConfig) -> HullResult<Vec<LinForm>> {
    let dim = s.dim();
    if dim <= 1 {
        return Ok(Vec::new());
    }

    let m = Matrix::complete_basis(dim, vec![linear_part(f)]);
    let t = m.square_inverse()?;

    let mut reduced = UnionSet::new(dim - 1);
    for mem in s.members() {
        if mem.is_empty() {
            reduced.push(Polyhedron::empty(dim - 1));
        } else {
            reduced.push(slice_and_drop_first(mem, f, &t));
        }
    }

    let lower_hull = crate::hull::convex_hull_wrap(&reduced, cfg)?;
    let mut ridges = Vec::new();
    for c in lower_hull.inequalities() {
        let mut padded = vec![c.constant().clone(), BigInt::zero()];
        padded.extend(c.coeffs()[1..].iter().cloned());
        let padded_form = LinForm::new(padded);
        ridges.push(Matrix::preimage_linear(&padded_form, &m));
    }
    Ok(ridges)
}

/// §4.9: BFS over known facets, wrapping each ridge of each facet to
/// discover new ones, deduplicating bit-for-bit, finishing with §4.1.
pub fn extend(s: &UnionSet, seed: LinForm, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = s.dim();
    let mut facets = vec![seed];
    let mut i = 0;
    while i < facets.len() {
        let f = facets[i].clone();
        for r in compute_facet_ridges(s, &f, cfg)? {
            let candidate = wrap::wrap_facet(s, &f, &r, cfg)?;
            if !facets.contains(&candidate) {
                facets.push(candidate);
            }
        }
        i += 1;
    }
    reduce::convex_hull_of_single(Polyhedron::from_constraints(dim, Vec::new(), facets), cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::independent_bounds;
    use crate::initial_facet::initial_facet_constraint;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    #[test]
    fn extends_unit_square_to_all_four_edges() {
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![0, 1, 0]));
        p.add_inequality(lf(vec![1, -1, 0]));
        p.add_inequality(lf(vec![0, 0, 1]));
        p.add_inequality(lf(vec![1, 0, -1]));
        let s = UnionSet::from_members(2, vec![p]).unwrap();
        let bounds = independent_bounds(&s, HullConfig::default()).unwrap();
        let seed = initial_facet_constraint(&s, &bounds, HullConfig::default()).unwrap();
        let hull = extend(&s, seed, HullConfig::default()).unwrap();
        assert_eq!(hull.inequalities().len(), 4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(hull.contains_point(&[rational::from_i64(x), rational::from_i64(y)]));
        }
        assert!(!hull.contains_point(&[rational::from_i64(2), rational::from_i64(0)]));
    }
}
