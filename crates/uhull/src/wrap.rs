//! Facet wrapping (§4.8, C8): rotate a known facet `F` about a ridge `R`
//! until it touches the union again, producing the adjacent facet.
//!
//! Rather than materializing the "transformed coordinates" as a separate
//! polyhedron representation, we fold the coordinate change directly into
//! the wrapping LP's coefficients: build `T` (d x d, invertible) whose
//! inverse has `F`'s linear part as row 0 and `R`'s linear part as row 1
//! (completed to a basis with standard axes), so that `F(Ty) = y1 + cF`
//! and `R(Ty) = y2 + cR` exactly. Each member's constraints are placed
//! into a per-member `(aᵢ, xᵢ)` homogeneous block using `T`-transformed
//! coefficients, and the resulting `Polyhedron` is handed straight to the
//! existing LP oracle (`Tableau::minimize`) — no separate FM pass is
//! needed here, unlike `minkowski::pairwise_fm_hull`.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::config::HullConfig;
use crate::error::{HullError, HullResult};
use crate::linform::LinForm;
use crate::matrix::Matrix;
use crate::polyhedron::Polyhedron;
use crate::rational::{self, Rational};
use crate::simplex::{LpOutcome, Tableau};
use crate::union_set::UnionSet;

fn linear_part(f: &LinForm) -> Vec<Rational> {
    (1..=f.dim())
        .map(|i| rational::from_bigint(f.coeff(i).clone()))
        .collect()
}

fn place_member_block(form: &LinForm, t: &Matrix, base: usize, width: usize) -> Vec<Rational> {
    let transformed = t.apply_row(&linear_part(form));
    let mut row = vec![Rational::zero(); width];
    row[base] = rational::from_bigint(form.constant().clone());
    for (k, v) in transformed.into_iter().enumerate() {
        row[base + 1 + k] = v;
    }
    row
}

/// §4.8: `wrap_facet(s, f, r)` returns the facet of `hull(s)` adjacent to
/// `f` across ridge `r`, or `f` unchanged if the LP is unbounded (the
/// facet does not rotate in that direction).
pub fn wrap_facet(s: &UnionSet, f: &LinForm, r: &LinForm, cfg: HullConfig) -> HullResult<LinForm> {
    let dim = s.dim();
    debug_assert!(dim >= 2, "wrapping a ridge requires at least 2 dimensions");

    // `m`'s rows are `[F_lin, R_lin, ...completion]`, i.e. `m == T^-1` for
    // the coordinate change `x = T y` that sends `F`'s normal to `e1` and
    // `R`'s normal to `e2`; member constraints are transformed via `T`.
    let m = Matrix::complete_basis(dim, vec![linear_part(f), linear_part(r)]);
    if m.rank() != dim {
        return Err(HullError::Invariant(
            "facet and ridge normals are not independent".to_string(),
        ));
    }
    let t = m.square_inverse()?;

    let members: Vec<&Polyhedron> = s.nonempty_members().collect();
    let n = members.len();
    let block = 1 + dim;
    let width = n * block;

    let mut wrap_poly = Polyhedron::new(width);
    for (i, mem) in members.iter().enumerate() {
        let base = i * block;
        for e in mem.equalities() {
            wrap_poly.add_equality(LinForm::from_rational_row(&{
                let mut row = vec![Rational::zero()];
                row.extend(place_member_block(e, &t, base, width));
                row
            }));
        }
        for c in mem.inequalities() {
            wrap_poly.add_inequality(LinForm::from_rational_row(&{
                let mut row = vec![Rational::zero()];
                row.extend(place_member_block(c, &t, base, width));
                row
            }));
        }
        // a_i >= 0
        let mut a_row = vec![Rational::zero(); width + 1];
        a_row[1 + base] = Rational::one();
        wrap_poly.add_inequality(LinForm::from_rational_row(&a_row));
    }
    // sum_i x_{i,1} = 1 (the first transformed coordinate of each block,
    // i.e. the slot aligned with F's direction).
    let mut eq_row = vec![Rational::from_integer(BigInt::from(-1))];
    let mut body = vec![Rational::zero(); width];
    for i in 0..n {
        body[i * block + 1] = Rational::one();
    }
    eq_row.extend(body);
    wrap_poly.add_equality(LinForm::from_rational_row(&eq_row));

    // Objective: minimize sum of each block's x_{i,2} (second transformed
    // coordinate, aligned with R's direction).
    let mut dir = vec![BigInt::from(0); width];
    for i in 0..n {
        dir[i * block + 2] = BigInt::from(1);
    }

    match Tableau::minimize(&wrap_poly, &dir, cfg)? {
        LpOutcome::Unbounded => Ok(f.clone()),
        LpOutcome::Empty => Err(HullError::Invariant(
            "wrapping polyhedron was unexpectedly empty".to_string(),
        )),
        LpOutcome::Optimal(v) => {
            let num = v.numer().clone();
            let den = v.denom().clone();
            Ok(LinForm::combine(r, &den, f, &(-num)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    #[test]
    fn wraps_square_edge_to_adjacent_edge() {
        // Unit square; facet x>=0 (F), ridge within it y>=0 (R). The
        // adjacent facet wrapping around that ridge should be y>=0 itself
        // or another true facet of the square (sanity: result is some
        // valid facet form, not a panic / fatal error).
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![0, 1, 0]));
        p.add_inequality(lf(vec![1, -1, 0]));
        p.add_inequality(lf(vec![0, 0, 1]));
        p.add_inequality(lf(vec![1, 0, -1]));
        let s = UnionSet::from_members(2, vec![p]).unwrap();
        let f = lf(vec![0, 1, 0]);
        let r = lf(vec![0, 0, 1]);
        let out = wrap_facet(&s, &f, &r, HullConfig::default());
        assert!(out.is_ok());
    }
}
