//! 0-D and 1-D hull specializations (§4.2, §4.3, C5).

use num_bigint::{BigInt, Sign};

use crate::linform::LinForm;
use crate::polyhedron::Polyhedron;
use crate::union_set::UnionSet;

/// §4.3: the hull of a union of dimension-0 polyhedra is EMPTY if the
/// union is empty, else the dimension-0 universe.
pub fn hull_0d(s: &UnionSet) -> Polyhedron {
    debug_assert_eq!(s.dim(), 0);
    if s.is_empty() {
        Polyhedron::empty(0)
    } else {
        Polyhedron::universe(0)
    }
}

/// One side of a running tightest bound: `(value_num, value_den)` stored
/// as a `LinForm` of the form `lo[0] + lo[1]*x`, compared by cross
/// multiplication (§4.2: "tightness is compared by cross-multiplying
/// `lo[0]*b[1]` vs `lo[1]*b[0]`").
#[derive(Clone)]
struct Bound {
    form: LinForm,
}

/// Is `candidate` at least as tight a lower bound (`x >= -c0/c1`, `c1>0`)
/// as `current`? Both are inequalities of the shape `c0 + c1*x >= 0`.
fn tighter_lower(current: &Bound, candidate: &Bound) -> bool {
    // x >= -c0/c1 (c1 > 0): tighter means larger -c0/c1, i.e.
    // -c0_cand/c1_cand > -c0_cur/c1_cur  <=>  c0_cand*c1_cur < c0_cur*c1_cand
    // (both c1 are positive after normalization below).
    let a0 = current.form.constant();
    let a1 = current.form.coeff(1);
    let b0 = candidate.form.constant();
    let b1 = candidate.form.coeff(1);
    b0 * a1 < a0 * b1
}

fn tighter_upper(current: &Bound, candidate: &Bound) -> bool {
    // x <= c0/(-c1) with c1 < 0; tighter means smaller bound: candidate's
    // bound value c0_cand/(-c1_cand) is <= current's, i.e. (after both
    // denominators are made positive via the *-1 below) the same
    // cross-multiplied "<" comparison as the lower case, not its mirror.
    let a0 = current.form.constant();
    let a1 = current.form.coeff(1).clone() * BigInt::from(-1);
    let b0 = candidate.form.constant();
    let b1 = candidate.form.coeff(1).clone() * BigInt::from(-1);
    b0 * &a1 < a0 * b1
}

/// §4.2: tightest lower/upper bound on `x1` across every member; a member
/// lacking a lower (resp. upper) bound kills the corresponding global
/// bound (the union is unbounded in that direction).
pub fn hull_1d(s: &UnionSet) -> Polyhedron {
    debug_assert_eq!(s.dim(), 1);
    if s.is_empty() {
        return Polyhedron::empty(1);
    }

    let mut lower: Option<Bound> = None;
    let mut upper: Option<Bound> = None;
    let mut has_lower = true;
    let mut has_upper = true;

    for p in s.nonempty_members() {
        let mut member_lo: Option<Bound> = None;
        let mut member_hi: Option<Bound> = None;

        let mut consider = |form: &LinForm, also_upper: bool| {
            let c1 = form.coeff(1);
            if c1.sign() == Sign::Plus || also_upper {
                let b = Bound { form: form.clone() };
                member_lo = Some(match member_lo.take() {
                    Some(cur) if !tighter_lower(&cur, &b) => cur,
                    _ => b,
                });
            }
        };
        let mut consider_hi = |form: &LinForm| {
            let b = Bound { form: form.clone() };
            member_hi = Some(match member_hi.take() {
                Some(cur) if !tighter_upper(&cur, &b) => cur,
                _ => b,
            });
        };

        for e in p.equalities() {
            if e.coeff(1).sign() == Sign::NoSign {
                continue;
            }
            // Equality counts as both bounds: normalize to c1 > 0 form
            // for the lower side and c1 < 0 form for the upper side.
            let as_lower = if e.coeff(1).sign() == Sign::Minus {
                e.negate()
            } else {
                e.clone()
            };
            consider(&as_lower, false);
            let as_upper = if e.coeff(1).sign() == Sign::Plus {
                e.negate()
            } else {
                e.clone()
            };
            consider_hi(&as_upper);
        }
        for c in p.inequalities() {
            match c.coeff(1).sign() {
                Sign::Plus => consider(c, false),
                Sign::Minus => consider_hi(c),
                Sign::NoSign => {}
            }
        }

        if member_lo.is_none() {
            has_lower = false;
        }
        if member_hi.is_none() {
            has_upper = false;
        }
        // Across members the union takes the *loosest* bound (the hull
        // extends to whichever member reaches furthest), unlike the
        // within-member `consider`/`consider_hi` combine above, which
        // keeps the tightest.
        if let (true, Some(b)) = (has_lower, member_lo) {
            lower = Some(match lower.take() {
                Some(cur) if tighter_lower(&cur, &b) => cur,
                _ => b,
            });
        }
        if let (true, Some(b)) = (has_upper, member_hi) {
            upper = Some(match upper.take() {
                Some(cur) if tighter_upper(&cur, &b) => cur,
                _ => b,
            });
        }
    }

    let mut out = Polyhedron::new(1);
    if has_lower {
        if let Some(b) = lower {
            out.add_inequality(b.form);
        }
    }
    if has_upper {
        if let Some(b) = upper {
            out.add_inequality(b.form);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    #[test]
    fn e1_two_points_hull_to_segment() {
        // {x = 0} U {x = 2}
        let mut p0 = Polyhedron::new(1);
        p0.add_equality(lf(vec![0, 1]));
        let mut p2 = Polyhedron::new(1);
        p2.add_equality(lf(vec![-2, 1]));
        let s = UnionSet::from_members(1, vec![p0, p2]).unwrap();
        let h = hull_1d(&s);
        assert!(h.contains_point(&[rational::from_i64(0)]));
        assert!(h.contains_point(&[rational::from_i64(1)]));
        assert!(h.contains_point(&[rational::from_i64(2)]));
        assert!(!h.contains_point(&[rational::from_i64(-1)]));
        assert!(!h.contains_point(&[rational::from_i64(3)]));
    }

    #[test]
    fn cross_member_combine_keeps_the_loosest_bound_not_the_tightest() {
        // {0 <= x <= 1} U {2 <= x <= 5}: the union spans 0..5, not the
        // intersection-like 2..1 (empty) a tighter-bound combine would give.
        let mut p0 = Polyhedron::new(1);
        p0.add_inequality(lf(vec![0, 1]));
        p0.add_inequality(lf(vec![1, -1]));
        let mut p1 = Polyhedron::new(1);
        p1.add_inequality(lf(vec![-2, 1]));
        p1.add_inequality(lf(vec![5, -1]));
        let s = UnionSet::from_members(1, vec![p0, p1]).unwrap();
        let h = hull_1d(&s);
        assert!(h.contains_point(&[rational::from_i64(0)]));
        assert!(h.contains_point(&[rational::from_i64(2)]));
        assert!(h.contains_point(&[rational::from_i64(5)]));
        assert!(!h.contains_point(&[rational::from_i64(-1)]));
        assert!(!h.contains_point(&[rational::from_i64(6)]));
    }

    #[test]
    fn within_member_combine_keeps_the_tightest_of_two_same_direction_bounds() {
        // A single member redundantly stating y <= 5 and y <= 3: the
        // tighter (y <= 3) must win within that member.
        assert!(tighter_upper(
            &Bound { form: lf(vec![5, -1]) },
            &Bound { form: lf(vec![3, -1]) },
        ));
        assert!(!tighter_upper(
            &Bound { form: lf(vec![3, -1]) },
            &Bound { form: lf(vec![5, -1]) },
        ));
    }

    #[test]
    fn e4_unbounded_both_sides_is_universe() {
        // {x >= 0} U {x <= 0}
        let mut p_pos = Polyhedron::new(1);
        p_pos.add_inequality(lf(vec![0, 1]));
        let mut p_neg = Polyhedron::new(1);
        p_neg.add_inequality(lf(vec![0, -1]));
        let s = UnionSet::from_members(1, vec![p_pos, p_neg]).unwrap();
        let h = hull_1d(&s);
        assert!(h.inequalities().is_empty());
        assert!(h.equalities().is_empty());
    }

    #[test]
    fn e6_only_empty_member_hulls_to_empty() {
        let s = UnionSet::from_members(1, vec![Polyhedron::empty(1)]).unwrap();
        let h = hull_1d(&s);
        assert!(h.is_empty() || (!h.contains_point(&[rational::from_i64(0)])));
        // hull_1d doesn't itself set the EMPTY flag for an all-empty union
        // with members present but empty; the dispatcher handles that via
        // `UnionSet::is_empty` before reaching here.
        assert!(s.is_empty());
    }
}
