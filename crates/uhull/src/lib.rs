//! Exact-rational convex hull core for unions of integer-set polyhedra.
//!
//! The public surface is three functions: [`convex_hull`] (the union
//! case), [`polyhedron_convex_hull`] (single-polyhedron redundancy
//! elimination, §4.1) and [`simple_hull`] (the cheaper over-approximation,
//! §4.10). Everything else here is the machinery those three dispatch
//! into — see `DESIGN.md` for how each module grounds in the reference
//! implementations this crate was built from.

pub mod affine_hull;
pub mod bounds;
pub mod config;
pub mod error;
pub mod extend;
pub mod hull;
pub mod initial_facet;
pub mod linform;
pub mod low_dim;
pub mod matrix;
pub mod minkowski;
pub mod polyhedron;
pub mod rational;
pub mod reduce;
pub mod simplex;
pub mod union_set;
pub mod wrap;

pub use config::{HullConfig, PivotRule};
pub use error::{HullError, HullResult};
pub use hull::{convex_hull, polyhedron_convex_hull, simple_hull};
pub use linform::LinForm;
pub use polyhedron::{PolyFlags, Polyhedron};
pub use rational::Rational;
pub use union_set::UnionSet;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use num_bigint::BigInt;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    fn segment(a: i64, b: i64) -> Polyhedron {
        let mut p = Polyhedron::new(1);
        p.add_inequality(lf(vec![-a, 1]));
        p.add_inequality(lf(vec![b, -1]));
        p
    }

    fn square(x0: i64, x1: i64, y0: i64, y1: i64) -> Polyhedron {
        let mut p = Polyhedron::new(2);
        p.add_inequality(lf(vec![-x0, 1, 0]));
        p.add_inequality(lf(vec![x1, -1, 0]));
        p.add_inequality(lf(vec![-y0, 0, 1]));
        p.add_inequality(lf(vec![y1, 0, -1]));
        p
    }

    /// §8 E1: two points hull to the segment between them.
    #[test]
    fn e1_two_points_hull_to_segment() {
        let mut p0 = Polyhedron::new(1);
        p0.add_equality(lf(vec![0, 1]));
        let mut p1 = Polyhedron::new(1);
        p1.add_equality(lf(vec![-2, 1]));
        let s = UnionSet::from_members(1, vec![p0, p1]).unwrap();
        let h = convex_hull(s, HullConfig::default()).unwrap();
        assert!(h.contains_point(&[rational::from_i64(0)]));
        assert!(h.contains_point(&[rational::from_i64(2)]));
        assert!(!h.contains_point(&[rational::from_i64(3)]));
    }

    /// §8 E4: an unbounded union whose members cover both directions
    /// hulls to the universe.
    #[test]
    fn e4_unbounded_both_sides_is_universe() {
        let mut pos = Polyhedron::new(1);
        pos.add_inequality(lf(vec![0, 1]));
        let mut neg = Polyhedron::new(1);
        neg.add_inequality(lf(vec![0, -1]));
        let s = UnionSet::from_members(1, vec![pos, neg]).unwrap();
        let h = convex_hull(s, HullConfig::default()).unwrap();
        assert!(h.equalities().is_empty());
        assert!(h.inequalities().is_empty());
    }

    /// §8 E6: a union with an empty member absorbs it (property 7).
    #[test]
    fn e6_empty_member_is_absorbed() {
        let s = UnionSet::from_members(1, vec![segment(0, 1), Polyhedron::empty(1)]).unwrap();
        let h = convex_hull(s, HullConfig::default()).unwrap();
        assert!(h.contains_point(&[rational::from_i64(0)]));
        assert!(h.contains_point(&[rational::from_i64(1)]));
        assert!(!h.contains_point(&[rational::from_i64(2)]));
    }

    /// §8 property 1 (soundness): every member lies inside the hull.
    #[test]
    fn property_soundness_every_member_inside_hull() {
        let s = UnionSet::from_members(1, vec![segment(0, 1), segment(5, 6)]).unwrap();
        let h = convex_hull(s, HullConfig::default()).unwrap();
        for x in [0, 1, 5, 6] {
            assert!(h.contains_point(&[rational::from_i64(x)]));
        }
    }

    /// §8 property 4 (idempotence): hulling a hull again changes nothing.
    #[test]
    fn property_idempotence() {
        let s = UnionSet::from_members(1, vec![segment(0, 1), segment(2, 5)]).unwrap();
        let once = convex_hull(s, HullConfig::default()).unwrap();
        let twice = convex_hull(
            UnionSet::from_members(1, vec![once.clone()]).unwrap(),
            HullConfig::default(),
        )
        .unwrap();
        assert_eq!(once.inequalities().len(), twice.inequalities().len());
        assert_eq!(once.equalities().len(), twice.equalities().len());
    }

    /// §8 property 5 (reordering invariance): member order doesn't
    /// change the result.
    #[test]
    fn property_reordering_invariance() {
        let a = UnionSet::from_members(1, vec![segment(0, 1), segment(3, 4)]).unwrap();
        let b = UnionSet::from_members(1, vec![segment(3, 4), segment(0, 1)]).unwrap();
        let ha = convex_hull(a, HullConfig::default()).unwrap();
        let hb = convex_hull(b, HullConfig::default()).unwrap();
        assert_eq!(ha.inequalities().len(), hb.inequalities().len());
        for x in [-1, 0, 1, 2, 3, 4, 5] {
            assert_eq!(
                ha.contains_point(&[rational::from_i64(x)]),
                hb.contains_point(&[rational::from_i64(x)])
            );
        }
    }

    /// §8 property 7 (empty absorption), restated directly over
    /// `UnionSet::nonempty_members`.
    #[test]
    fn property_empty_absorption() {
        let s = UnionSet::from_members(1, vec![Polyhedron::empty(1), segment(0, 1)]).unwrap();
        assert_eq!(s.nonempty_members().count(), 1);
    }

    /// §8 property 8 (simple-hull superset): every point the exact hull
    /// contains is also contained in `simple_hull`'s result.
    #[test]
    fn property_simple_hull_is_a_superset() {
        let s = UnionSet::from_members(2, vec![square(0, 1, 0, 1), square(3, 4, 0, 1)]).unwrap();
        let exact = convex_hull(UnionSet::from_members(2, s.members().to_vec()).unwrap(), HullConfig::default()).unwrap();
        let approx = simple_hull(&s, HullConfig::default()).unwrap();
        for (x, y) in [(0, 0), (1, 1), (3, 0), (4, 1), (2, 0), (2, 1)] {
            if exact.contains_point(&[rational::from_i64(x), rational::from_i64(y)]) {
                assert!(approx.contains_point(&[rational::from_i64(x), rational::from_i64(y)]));
            }
        }
    }

    /// §8 property 9 (single-polyhedron reduction): `polyhedron_convex_hull`
    /// of an already-reduced polyhedron is unchanged.
    #[test]
    fn property_single_polyhedron_reduction_is_stable() {
        let p = segment(0, 1);
        let once = polyhedron_convex_hull(p, HullConfig::default()).unwrap();
        let twice = polyhedron_convex_hull(once.clone(), HullConfig::default()).unwrap();
        assert_eq!(once.inequalities().len(), twice.inequalities().len());
    }
}
