//! Top-level dispatcher (§4.11, C11) and the simple-hull over-approximation
//! (§4.10).

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::affine_hull;
use crate::bounds;
use crate::config::HullConfig;
use crate::error::{HullError, HullResult};
use crate::extend;
use crate::initial_facet;
use crate::linform::LinForm;
use crate::low_dim;
use crate::matrix::Matrix;
use crate::minkowski;
use crate::polyhedron::Polyhedron;
use crate::rational::{self, Rational};
use crate::reduce;
use crate::simplex::{LpOutcome, Tableau};
use crate::union_set::UnionSet;

fn linear_part(f: &LinForm) -> Vec<Rational> {
    (1..=f.dim())
        .map(|i| rational::from_bigint(f.coeff(i).clone()))
        .collect()
}

/// Is every nonempty member's recession cone `{0}`? Checked axis by axis:
/// a cone is trivial iff `max(x_i)` and `min(x_i)` are both bounded for
/// every `i` (any escaping direction has some nonzero coordinate, and
/// scaling it to infinity would make that axis's extremum unbounded).
fn is_bounded(s: &UnionSet, cfg: HullConfig) -> HullResult<bool> {
    let dim = s.dim();
    for m in s.nonempty_members() {
        for i in 0..dim {
            let mut dir = vec![BigInt::zero(); dim];
            dir[i] = BigInt::one();
            if matches!(Tableau::minimize(m, &dir, cfg)?, LpOutcome::Unbounded) {
                return Ok(false);
            }
            let neg: Vec<BigInt> = dir.iter().map(|d| -d.clone()).collect();
            if matches!(Tableau::minimize(m, &neg, cfg)?, LpOutcome::Unbounded) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// §4.11 step 4: the affine hull `a` has `k >= 1` equalities; work modulo
/// them by eliminating `k` coordinates via a basis completed from `a`'s
/// normals, recursing on the `(dim-k)`-dimensional image, then pulling
/// the result back and reattaching `a`.
fn hull_modulo_affine(s: &UnionSet, a: &Polyhedron, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = s.dim();
    let k = a.equalities().len();
    let seed_rows: Vec<Vec<Rational>> = a.equalities().iter().map(linear_part).collect();
    let consts: Vec<Rational> = a
        .equalities()
        .iter()
        .map(|e| rational::from_bigint(e.constant().clone()))
        .collect();

    let m = Matrix::complete_basis(dim, seed_rows);
    if m.rank() != dim {
        return Err(HullError::Invariant(
            "affine hull normals are not independent".to_string(),
        ));
    }
    let t = m.square_inverse()?;

    // `a`'s own i-th equality transforms to exactly `y_i + const_i = 0`
    // (its linear part is row `i` of `m`, and `m * t = I`), so every
    // member's transformed constraints can be reduced in place by
    // substituting `y_i = -const_i` for `i < k`, without any further
    // Gauss-Jordan elimination.
    let transform_row = |form: &LinForm| -> Vec<Rational> {
        let d = t.apply_row(&linear_part(form));
        let mut c0 = rational::from_bigint(form.constant().clone());
        for i in 0..k {
            c0 = c0 - &d[i] * &consts[i];
        }
        let mut row = vec![c0];
        row.extend(d[k..].iter().cloned());
        row
    };

    let mut reduced = UnionSet::new(dim - k);
    for mem in s.members() {
        if mem.is_empty() {
            reduced.push(Polyhedron::empty(dim - k));
            continue;
        }
        let equalities: Vec<LinForm> = mem
            .equalities()
            .iter()
            .map(|e| LinForm::from_rational_row(&transform_row(e)))
            .filter(|e| !e.is_zero_form())
            .collect();
        let inequalities: Vec<LinForm> = mem
            .inequalities()
            .iter()
            .map(|c| LinForm::from_rational_row(&transform_row(c)))
            .collect();
        reduced.push(Polyhedron::from_constraints(dim - k, equalities, inequalities));
    }

    let lower = convex_hull_wrap(&reduced, cfg)?;

    let pull_back = |form: &LinForm| -> LinForm {
        let mut padded = vec![form.constant().clone()];
        padded.extend(std::iter::repeat(BigInt::zero()).take(k));
        padded.extend(form.coeffs()[1..].iter().cloned());
        Matrix::preimage_linear(&LinForm::new(padded), &m)
    };

    let mut out = Polyhedron::new(dim);
    for e in a.equalities() {
        out.add_equality(e.clone());
    }
    for e in lower.equalities() {
        out.add_equality(pull_back(e));
    }
    for c in lower.inequalities() {
        out.add_inequality(pull_back(c));
    }
    reduce::convex_hull_of_single(out, cfg)
}

/// §4.11: chooses among the 0-D/1-D specializations, the trivial
/// single-member case, the unbounded (Minkowski/FM) path, and the
/// bounded (bounds-basis + wrapping) path.
pub fn convex_hull_wrap(s: &UnionSet, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = s.dim();
    if s.is_empty() {
        return Ok(Polyhedron::empty(dim));
    }

    let members: Vec<&Polyhedron> = s.nonempty_members().collect();
    if members.len() == 1 {
        return reduce::convex_hull_of_single(members[0].clone(), cfg);
    }

    let a = affine_hull::affine_hull(s, cfg)?;
    if !a.equalities().is_empty() {
        return hull_modulo_affine(s, &a, cfg);
    }

    if dim == 0 {
        return Ok(low_dim::hull_0d(s));
    }
    if dim == 1 {
        return reduce::convex_hull_of_single(low_dim::hull_1d(s), cfg);
    }

    if !is_bounded(s, cfg)? {
        return minkowski::iterated_fm_hull(s, cfg);
    }

    let bound_set = bounds::independent_bounds(s, cfg)?;
    let seed = initial_facet::initial_facet_constraint(s, &bound_set, cfg)?;
    extend::extend(s, seed, cfg)
}

/// §6: `convex_hull(S)`, the public entry point.
pub fn convex_hull(s: UnionSet, cfg: HullConfig) -> HullResult<Polyhedron> {
    convex_hull_wrap(&s, cfg)
}

/// §6/§4.11 step 2-3: `convex_hull(M)` for a map of relations reduces to
/// the union-of-polyhedra case once existentials/divs are already
/// resolved at the `Polyhedron` level (no separate symbolic existential
/// layer in this core — see `DESIGN.md`).
pub fn convex_hull_of_map(m: UnionSet, cfg: HullConfig) -> HullResult<Polyhedron> {
    convex_hull(m, cfg)
}

/// §6: `polyhedron_convex_hull(P)`, the single-polyhedron reduction.
pub fn polyhedron_convex_hull(p: Polyhedron, cfg: HullConfig) -> HullResult<Polyhedron> {
    reduce::convex_hull_of_single(p, cfg)
}

/// §4.10: a cheaper superset. Tightens each member inequality's constant
/// term to the minimum of its linear part over the whole union, drops it
/// if that minimum is unbounded, then reduces via §4.1.
pub fn simple_hull(s: &UnionSet, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = s.dim();
    if s.is_empty() {
        return Ok(Polyhedron::empty(dim));
    }

    let mut seen: Vec<LinForm> = Vec::new();
    let mut out = Polyhedron::new(dim);
    for mem in s.nonempty_members() {
        for c in mem.inequalities() {
            if seen.iter().any(|k| k == c) {
                continue;
            }
            seen.push(c.clone());

            let mut tightest: Option<Rational> = None;
            let mut unbounded = false;
            for other in s.nonempty_members() {
                match Tableau::minimize_form(other, c, cfg)? {
                    LpOutcome::Unbounded => {
                        unbounded = true;
                        break;
                    }
                    LpOutcome::Empty => continue,
                    LpOutcome::Optimal(v) => {
                        tightest = Some(match tightest {
                            None => v,
                            Some(cur) if v < cur => v,
                            Some(cur) => cur,
                        });
                    }
                }
            }
            if unbounded {
                continue;
            }
            let Some(min_val) = tightest else {
                continue;
            };

            let new_c0 = rational::from_bigint(c.constant().clone()) - min_val;
            let mut row = vec![new_c0];
            row.extend((1..=dim).map(|i| rational::from_bigint(c.coeff(i).clone())));
            out.add_inequality(LinForm::from_rational_row(&row));
        }
    }
    reduce::convex_hull_of_single(out, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    fn unit_square() -> Polyhedron {
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![0, 1, 0]));
        p.add_inequality(lf(vec![1, -1, 0]));
        p.add_inequality(lf(vec![0, 0, 1]));
        p.add_inequality(lf(vec![1, 0, -1]));
        p
    }

    #[test]
    fn e1_two_points_hull_to_segment() {
        let mut p0 = Polyhedron::new(1);
        p0.add_equality(lf(vec![0, 1]));
        let mut p1 = Polyhedron::new(1);
        p1.add_equality(lf(vec![-2, 1]));
        let s = UnionSet::from_members(1, vec![p0, p1]).unwrap();
        let hull = convex_hull_wrap(&s, HullConfig::default()).unwrap();
        assert!(hull.contains_point(&[rational::from_i64(1)]));
        assert!(!hull.contains_point(&[rational::from_i64(3)]));
    }

    #[test]
    fn single_square_member_is_trivial() {
        let s = UnionSet::from_members(2, vec![unit_square()]).unwrap();
        let hull = convex_hull_wrap(&s, HullConfig::default()).unwrap();
        assert_eq!(hull.inequalities().len(), 4);
    }

    #[test]
    fn two_disjoint_squares_hull_to_their_bounding_shape() {
        let mut right = Polyhedron::new(2);
        right.add_inequality(lf(vec![-2, 1, 0]));
        right.add_inequality(lf(vec![3, -1, 0]));
        right.add_inequality(lf(vec![0, 0, 1]));
        right.add_inequality(lf(vec![1, 0, -1]));
        let s = UnionSet::from_members(2, vec![unit_square(), right]).unwrap();
        let hull = convex_hull_wrap(&s, HullConfig::default()).unwrap();
        assert!(hull.contains_point(&[rational::from_i64(0), rational::from_i64(0)]));
        assert!(hull.contains_point(&[rational::from_i64(3), rational::from_i64(1)]));
        assert!(hull.contains_point(&[rational::from_i64(2), rational::from_i64(0)]));
        assert!(!hull.contains_point(&[rational::from_i64(0), rational::from_i64(2)]));
    }

    #[test]
    fn affine_hull_factoring_recurses_on_a_line() {
        // Both members pinned to y=0: hull should stay on that line.
        let mut p0 = Polyhedron::new(2);
        p0.add_equality(lf(vec![0, 0, 1]));
        p0.add_equality(lf(vec![0, 1, 0]));
        let mut p1 = Polyhedron::new(2);
        p1.add_equality(lf(vec![0, 0, 1]));
        p1.add_equality(lf(vec![-2, 1, 0]));
        let s = UnionSet::from_members(2, vec![p0, p1]).unwrap();
        let hull = convex_hull_wrap(&s, HullConfig::default()).unwrap();
        assert!(hull.contains_point(&[rational::from_i64(1), rational::from_i64(0)]));
        assert!(!hull.contains_point(&[rational::from_i64(1), rational::from_i64(1)]));
    }

    #[test]
    fn simple_hull_is_superset_and_reduces_exactly_for_a_square() {
        let s = UnionSet::from_members(2, vec![unit_square()]).unwrap();
        let approx = simple_hull(&s, HullConfig::default()).unwrap();
        let exact = convex_hull_wrap(&s, HullConfig::default()).unwrap();
        assert_eq!(approx.inequalities().len(), exact.inequalities().len());
        assert!(approx.contains_point(&[rational::from_i64(0), rational::from_i64(0)]));
        assert!(!approx.contains_point(&[rational::from_i64(2), rational::from_i64(0)]));
    }
}
