//! Affine hull of a union (§4.1/C3, "external" in the spec — no algorithm
//! is given there, so this module documents the chosen one).
//!
//! We reuse the "independent bounds" shape of §4.6, but for *directions*
//! instead of bounding hyperplanes: anchor at a feasible point of the
//! first nonempty member, then grow a spanning set of direction vectors
//! (each member's own internal equality null space, plus the vector
//! connecting that member's feasible point back to the anchor). The
//! orthogonal complement of that direction space, anchored at the
//! reference point, is exactly the union's affine hull. See `DESIGN.md`
//! for why this reading of C3 was chosen over alternatives.

use num_traits::{One, Zero};

use crate::config::HullConfig;
use crate::error::{HullError, HullResult};
use crate::linform::LinForm;
use crate::matrix::Matrix;
use crate::polyhedron::Polyhedron;
use crate::rational::{self, Rational};
use crate::reduce;
use crate::simplex::Tableau;
use crate::union_set::UnionSet;

/// Linear part (columns `1..=dim`) of each equality of `p`, as rational
/// rows, for feeding into `Matrix::null_space`.
fn member_equality_directions(p: &Polyhedron) -> Vec<Vec<Rational>> {
    let rows: Vec<Vec<Rational>> = p
        .equalities()
        .iter()
        .map(|e| {
            (1..=p.dim())
                .map(|i| rational::from_bigint(e.coeff(i).clone()))
                .collect()
        })
        .collect();
    if rows.is_empty() {
        return Vec::new();
    }
    Matrix::from_rows(rows).null_space()
}

/// Computes `aff(S)` as a polyhedron of pure equalities (§8.7: "the hull
/// lies in the affine hull"; this is what lets `hull::convex_hull`
/// recurse modulo the affine hull per §4.11 step 4).
pub fn affine_hull(s: &UnionSet, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = s.dim();
    if s.is_empty() {
        return Ok(Polyhedron::empty(dim));
    }

    let mut anchor: Option<Vec<Rational>> = None;
    let mut directions: Vec<Vec<Rational>> = Vec::new();

    for m in s.nonempty_members() {
        // A member can carry only *implicit* equalities (e.g. `{x>=0,
        // -x>=0}` with a free `y`): it has no explicit equality yet is
        // not full-dimensional. Reduce first so those get promoted
        // before we decide whether this member is genuinely full-dim.
        let m = reduce::convex_hull_of_single(m.clone(), cfg)?;
        if m.equalities().is_empty() {
            // A full-dimensional member drags the affine hull of the
            // whole union to the entire ambient space.
            return Ok(Polyhedron::universe(dim));
        }
        directions.extend(member_equality_directions(&m));

        let pt = Tableau::feasible_point(&m, cfg)?.ok_or_else(|| {
            HullError::Invariant("nonempty member reported no feasible point".to_string())
        })?;
        match &anchor {
            None => anchor = Some(pt),
            Some(a) => {
                let delta: Vec<Rational> = pt.iter().zip(a).map(|(x, y)| x - y).collect();
                directions.push(delta);
            }
        }
    }

    let anchor = anchor.expect("at least one nonempty member was iterated");
    if dim == 0 {
        return Ok(Polyhedron::universe(0));
    }

    let normals: Vec<Vec<Rational>> = if directions.is_empty() {
        // Single member at a single point with no internal freedom: the
        // affine hull is that point, i.e. every coordinate axis is a
        // normal direction.
        (0..dim)
            .map(|i| {
                let mut row = vec![Rational::zero(); dim];
                row[i] = Rational::one();
                row
            })
            .collect()
    } else {
        Matrix::from_rows(directions).null_space()
    };

    let mut out = Polyhedron::new(dim);
    for n in normals {
        let dot: Rational = n
            .iter()
            .zip(&anchor)
            .fold(Rational::zero(), |acc, (ni, ai)| acc + ni * ai);
        let mut row = vec![-dot];
        row.extend(n);
        out.add_equality(LinForm::from_rational_row(&row));
    }
    let mut flags = out.flags();
    flags.rational = true;
    flags.no_redundant = true;
    flags.no_implicit = true;
    out.set_flags(flags);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    #[test]
    fn two_points_hull_affine_span_is_the_line() {
        // {x=0,y=0} U {x=2,y=2}: affine hull should be the line x=y.
        let mut p0 = Polyhedron::new(2);
        p0.add_equality(lf(vec![0, 1, 0]));
        p0.add_equality(lf(vec![0, 0, 1]));
        let mut p1 = Polyhedron::new(2);
        p1.add_equality(lf(vec![-2, 1, 0]));
        p1.add_equality(lf(vec![-2, 0, 1]));
        let s = UnionSet::from_members(2, vec![p0, p1]).unwrap();
        let a = affine_hull(&s, HullConfig::default()).unwrap();
        assert_eq!(a.equalities().len(), 1);
        assert!(a.contains_point(&[rational::from_i64(1), rational::from_i64(1)]));
        assert!(!a.contains_point(&[rational::from_i64(1), rational::from_i64(0)]));
    }

    #[test]
    fn full_dimensional_member_gives_universe() {
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![0, 1, 0]));
        let s = UnionSet::from_members(2, vec![p]).unwrap();
        let a = affine_hull(&s, HullConfig::default()).unwrap();
        assert!(a.equalities().is_empty());
    }

    #[test]
    fn member_with_only_implicit_equality_is_not_mistaken_for_full_dimensional() {
        // {x>=0, -x>=0, y free}: no explicit equality, but x=0 is forced.
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![0, 1, 0]));
        p.add_inequality(lf(vec![0, -1, 0]));
        let s = UnionSet::from_members(2, vec![p]).unwrap();
        let a = affine_hull(&s, HullConfig::default()).unwrap();
        assert_eq!(a.equalities().len(), 1);
        assert!(a.contains_point(&[rational::from_i64(0), rational::from_i64(5)]));
        assert!(!a.contains_point(&[rational::from_i64(1), rational::from_i64(0)]));
    }
}
