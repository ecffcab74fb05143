//! Initial facet constructor (§4.7, C9): walks the independent-bounds
//! basis to produce one true facet to seed `extend`'s BFS.
//!
//! The spec's loop shrinks the bounds matrix by explicit coordinate
//! reduction (right-inverse `U`, its inverse `Q`) each time a candidate
//! turns out to be only a bounding hyperplane rather than a facet. We
//! take a simpler equivalent path that stays in the original ambient
//! coordinates throughout: when slicing by a candidate produces more
//! than one new affine-hull equality (the candidate is not yet a
//! facet), we rotate it toward one with `wrap::wrap_facet`, using
//! another still-untried bound as the ridge, and retry — the same
//! "wrap `bounds[0]` around `bounds[last]`" step §4.7 describes, minus
//! the dimension bookkeeping, since `wrap_facet`'s LP already operates
//! correctly in the full ambient space. See `DESIGN.md`.

use crate::affine_hull;
use crate::config::HullConfig;
use crate::error::{HullError, HullResult};
use crate::linform::LinForm;
use crate::polyhedron::Polyhedron;
use crate::union_set::UnionSet;
use crate::wrap;

fn slice_by_equality(s: &UnionSet, eq: &LinForm) -> UnionSet {
    let mut out = UnionSet::new(s.dim());
    for m in s.members() {
        if m.is_empty() {
            out.push(Polyhedron::empty(s.dim()));
            continue;
        }
        let mut mm = m.clone();
        mm.add_equality(eq.clone());
        out.push(mm);
    }
    out
}

/// §4.7: given the `dim` independent bounds of a full-dimensional,
/// bounded union, find one whose zero-slice is a genuine facet of the
/// hull (not merely a supporting hyperplane of lower-dimensional
/// contact).
pub fn initial_facet_constraint(
    s: &UnionSet,
    bounds: &[LinForm],
    cfg: HullConfig,
) -> HullResult<LinForm> {
    if bounds.is_empty() {
        return Err(HullError::Invariant(
            "initial_facet_constraint needs at least one bound".to_string(),
        ));
    }
    let mut pool: Vec<LinForm> = bounds.to_vec();

    loop {
        let candidate = pool[0].clone();
        let sliced = slice_by_equality(s, &candidate);
        let aff = affine_hull::affine_hull(&sliced, cfg)?;
        match aff.equalities().len() {
            1 => return Ok(candidate),
            0 => {
                // Candidate didn't touch the union tightly; try the next
                // one (shouldn't occur for bounds produced by
                // `bounds::independent_bounds`, which tightens every row).
                if pool.len() < 2 {
                    return Err(HullError::Invariant(
                        "no candidate bound produced a facet".to_string(),
                    ));
                }
                pool.remove(0);
            }
            _ => {
                if pool.len() < 2 {
                    return Err(HullError::Invariant(
                        "initial facet search exhausted its ridge candidates".to_string(),
                    ));
                }
                let ridge = pool[1].clone();
                let rotated = wrap::wrap_facet(s, &candidate, &ridge, cfg)?;
                pool[0] = rotated;
                pool.remove(1);
            }
        }
    }
}
