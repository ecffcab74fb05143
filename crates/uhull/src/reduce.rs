//! Redundancy eliminator for a single polyhedron (§4.1, C4).
//!
//! `convex_hull_of_single` takes one polyhedron and returns an equal
//! point set flagged `NO_REDUNDANT` and `NO_IMPLICIT`: every inequality is
//! a genuine facet and every implicit equality has been promoted.

use num_traits::Zero;
use tracing::trace;

use crate::config::HullConfig;
use crate::error::HullResult;
use crate::linform::LinForm;
use crate::matrix::Matrix;
use crate::polyhedron::Polyhedron;
use crate::simplex::Tableau;

/// §4.1(a): Gaussian-eliminate the equalities into reduced row-echelon
/// form. Returns `true` if the system is found inconsistent (the
/// polyhedron is empty), in which case `p` is already marked empty.
fn canonicalize_equalities(p: &mut Polyhedron) -> bool {
    if p.equalities().is_empty() {
        return false;
    }
    let m = Matrix::from_linforms(p.equalities());
    let (echelon, pivots) = m.row_echelon();
    // Column 0 is the constant term (`LinForm` convention: `[c0, c1..cd]`).
    // A row that reduces to nonzero-constant-only (`k + 0*x = 0`, `k != 0`)
    // is a contradiction: the polyhedron is empty.
    for r in 0..echelon.rows() {
        let vars_all_zero = (1..echelon.cols()).all(|c| echelon.get(r, c).is_zero());
        if vars_all_zero && !echelon.get(r, 0).is_zero() {
            p.mark_empty();
            return true;
        }
    }
    let reduced: Vec<LinForm> = (0..pivots.len())
        .map(|r| {
            let row = echelon.row(r);
            LinForm::from_rational_row(&row)
        })
        .filter(|f| !f.is_zero_form())
        .collect();
    p.set_equalities(reduced);
    false
}

/// Cheap pre-screen (§4.1): if some coordinate `i` has `c_i != 0` and no
/// inequality of `p` shares sign with `c` on that coordinate, `c` cannot
/// be redundant and the LP call can be skipped.
fn cannot_be_redundant(p: &Polyhedron, idx: usize) -> bool {
    let c = &p.inequalities()[idx];
    for i in 1..=p.dim() {
        let ci = c.coeff(i);
        if ci.is_zero() {
            continue;
        }
        let same_sign_exists = p.inequalities().iter().enumerate().any(|(j, other)| {
            if j == idx {
                return false;
            }
            let oi = other.coeff(i);
            !oi.is_zero() && (oi.sign() == ci.sign())
        });
        if !same_sign_exists {
            return true;
        }
    }
    false
}

fn without_inequality(p: &Polyhedron, idx: usize) -> Polyhedron {
    let mut q = Polyhedron::from_constraints(
        p.dim(),
        p.equalities().to_vec(),
        p.inequalities()
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != idx)
            .map(|(_, c)| c.clone())
            .collect(),
    );
    if p.is_empty() {
        q.mark_empty();
    }
    q
}

/// §4.1: removes redundant inequalities from `p` and promotes implicit
/// equalities, returning a polyhedron flagged `NO_REDUNDANT | NO_IMPLICIT`.
pub fn convex_hull_of_single(mut p: Polyhedron, cfg: HullConfig) -> HullResult<Polyhedron> {
    if p.is_empty() {
        return Ok(p);
    }
    if canonicalize_equalities(&mut p) {
        return Ok(p);
    }
    if p.inequalities().len() <= 1 {
        let mut flags = p.flags();
        flags.no_redundant = true;
        flags.no_implicit = true;
        p.set_flags(flags);
        return Ok(p);
    }

    // (d) implicit-equality detection.
    let mut promoted = Vec::new();
    let mut remaining = Vec::new();
    for c in p.inequalities() {
        if Tableau::is_implicit_equality(&p, c, cfg)? {
            trace!(form = %c, "promoting implicit equality");
            promoted.push(c.clone());
        } else {
            remaining.push(c.clone());
        }
    }
    if !promoted.is_empty() {
        let mut eqs = p.equalities().to_vec();
        eqs.extend(promoted);
        p.set_equalities(eqs);
        p.set_inequalities(remaining);
        if canonicalize_equalities(&mut p) {
            return Ok(p);
        }
    }

    // Dedup identical normals (§3: "inequalities with identical normal up
    // to positive scaling are deduplicated") *before* redundancy: two
    // copies of the same inequality would otherwise each find the other
    // as a witness and both get dropped as "redundant", losing the bound
    // entirely instead of keeping one copy of it.
    let mut deduped: Vec<LinForm> = Vec::new();
    for c in p.inequalities() {
        if !deduped.iter().any(|d| d == c) {
            deduped.push(c.clone());
        }
    }
    p.set_inequalities(deduped);

    // (e) redundancy detection: for each candidate, minimize over P
    // without that candidate; redundant iff the minimum is still >= 0.
    let mut kept: Vec<LinForm> = Vec::new();
    let ineqs = p.inequalities().to_vec();
    for idx in 0..ineqs.len() {
        if cannot_be_redundant(&p, idx) {
            kept.push(ineqs[idx].clone());
            continue;
        }
        let without = without_inequality(&p, idx);
        if Tableau::is_redundant(&without, &ineqs[idx], cfg)? {
            trace!(form = %ineqs[idx], "dropping redundant inequality");
            continue;
        }
        kept.push(ineqs[idx].clone());
    }
    p.set_inequalities(kept);

    let mut flags = p.flags();
    flags.no_redundant = true;
    flags.no_implicit = true;
    p.set_flags(flags);
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational;
    use num_bigint::BigInt;

    fn lf(v: Vec<i64>) -> LinForm {
        LinForm::new(v.into_iter().map(BigInt::from).collect())
    }

    #[test]
    fn drops_redundant_inequality() {
        // 0 <= x <= 1, plus a redundant x <= 5.
        let mut p = Polyhedron::new(1);
        p.add_inequality(lf(vec![0, 1])); // x >= 0
        p.add_inequality(lf(vec![1, -1])); // 1 - x >= 0
        p.add_inequality(lf(vec![5, -1])); // 5 - x >= 0 (redundant)
        let reduced = convex_hull_of_single(p, HullConfig::default()).unwrap();
        assert_eq!(reduced.inequalities().len(), 2);
        assert!(reduced.flags().no_redundant);
    }

    #[test]
    fn duplicate_inequality_keeps_one_copy_instead_of_dropping_both() {
        // {x >= 0, x >= 0, x <= 1}: a literal duplicate must not vanish
        // along with its witness — one copy survives, and the bound it
        // carries must not be lost from the result.
        let mut p = Polyhedron::new(1);
        p.add_inequality(lf(vec![0, 1])); // x >= 0
        p.add_inequality(lf(vec![0, 1])); // x >= 0 (duplicate)
        p.add_inequality(lf(vec![1, -1])); // 1 - x >= 0
        let reduced = convex_hull_of_single(p, HullConfig::default()).unwrap();
        assert_eq!(reduced.inequalities().len(), 2);
        assert!(reduced.contains_point(&[rational::from_i64(0)]));
        assert!(reduced.contains_point(&[rational::from_i64(1)]));
        assert!(!reduced.contains_point(&[rational::from_i64(-1)]));
    }

    #[test]
    fn promotes_implicit_equality() {
        // x >= 0 and -x >= 0 together force x = 0.
        let mut p = Polyhedron::new(1);
        p.add_inequality(lf(vec![0, 1]));
        p.add_inequality(lf(vec![0, -1]));
        let reduced = convex_hull_of_single(p, HullConfig::default()).unwrap();
        assert_eq!(reduced.inequalities().len(), 0);
        assert_eq!(reduced.equalities().len(), 1);
        assert!(reduced.contains_point(&[rational::from_i64(0)]));
    }

    #[test]
    fn detects_inconsistent_equalities_as_empty() {
        let mut p = Polyhedron::new(1);
        p.add_equality(lf(vec![1, 0])); // 1 = 0, impossible
        let reduced = convex_hull_of_single(p, HullConfig::default()).unwrap();
        assert!(reduced.is_empty());
    }
}
