//! Pairwise Minkowski-sum hull via Fourier-Motzkin elimination (§4.4,
//! §4.5, C6) — the unbounded path of the dispatcher.
//!
//! Builds the homogeneous-coordinates system over `(z, y1, y2)` from
//! §4.4, eliminates `y1` and `y2` (first via Gaussian substitution on
//! whatever is pinned down by equalities, then via genuine
//! Fourier-Motzkin on whatever is left), and reduces the remaining
//! `z`-only system via `reduce::convex_hull_of_single`. `z`'s own layout
//! (`[t, x1..xd]`) is exactly a `LinForm`'s `[c0, c1..cd]`, so no
//! homogeneous/non-homogeneous conversion step is needed at the end.

use std::ops::Range;

use num_traits::{One, Zero};

use crate::config::HullConfig;
use crate::error::HullResult;
use crate::linform::LinForm;
use crate::polyhedron::Polyhedron;
use crate::rational::{self, Rational};
use crate::reduce;
use crate::union_set::UnionSet;

/// Eliminates every column in `cols` from `eqs` via Gauss-Jordan,
/// applying the same row operations to `others`. Returns the pivot
/// columns actually eliminated, in pivot order. Rows of `eqs` beyond the
/// returned pivot count are left with zero entries in `cols` (and
/// therefore describe relations purely among the *other* columns).
fn eliminate_via_equalities(
    eqs: &mut [Vec<Rational>],
    others: &mut [Vec<Rational>],
    cols: Range<usize>,
    width: usize,
) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut pr = 0;
    for pc in cols {
        if pr >= eqs.len() {
            break;
        }
        let Some(piv) = (pr..eqs.len()).find(|&r| !eqs[r][pc].is_zero()) else {
            continue;
        };
        eqs.swap(pr, piv);
        let pivot_val = eqs[pr][pc].clone();
        for c in 0..width {
            eqs[pr][c] = &eqs[pr][c] / &pivot_val;
        }
        for r in 0..eqs.len() {
            if r == pr {
                continue;
            }
            let factor = eqs[r][pc].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..width {
                let sub = &factor * &eqs[pr][c];
                eqs[r][c] = &eqs[r][c] - sub;
            }
        }
        for row in others.iter_mut() {
            let factor = row[pc].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..width {
                let sub = &factor * &eqs[pr][c];
                row[c] = &row[c] - sub;
            }
        }
        pivots.push(pc);
        pr += 1;
    }
    pivots
}

/// Classic Fourier-Motzkin elimination of one column from a set of
/// `>= 0` rows: rows with a zero coefficient pass through unchanged,
/// every (positive, negative) pair is combined into one new row with a
/// positive combination (so the `>= 0` direction is preserved exactly).
fn fm_eliminate_column(rows: Vec<Vec<Rational>>, col: usize, width: usize) -> Vec<Vec<Rational>> {
    let mut zero = Vec::new();
    let mut pos = Vec::new();
    let mut neg = Vec::new();
    for r in rows {
        if r[col].is_zero() {
            zero.push(r);
        } else if r[col] > Rational::zero() {
            pos.push(r);
        } else {
            neg.push(r);
        }
    }
    let mut out = zero;
    for p in &pos {
        for n in &neg {
            let a = -n[col].clone();
            let b = p[col].clone();
            let mut row = vec![Rational::zero(); width];
            for c in 0..width {
                row[c] = &a * &p[c] + &b * &n[c];
            }
            out.push(row);
        }
    }
    out
}

fn place_block(form: &LinForm, base: usize, width: usize) -> Vec<Rational> {
    let mut row = vec![Rational::zero(); width];
    for (k, c) in form.coeffs().iter().enumerate() {
        row[base + k] = rational::from_bigint(c.clone());
    }
    row
}

/// §4.4: the convex hull of `p1 ∪ p2`, obtained as their Minkowski sum
/// in homogeneous coordinates.
pub fn pairwise_fm_hull(p1: &Polyhedron, p2: &Polyhedron, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = p1.dim();
    debug_assert_eq!(p2.dim(), dim);

    if p1.is_empty() && p2.is_empty() {
        return Ok(Polyhedron::empty(dim));
    }
    if p1.is_empty() {
        return reduce::convex_hull_of_single(p2.clone(), cfg);
    }
    if p2.is_empty() {
        return reduce::convex_hull_of_single(p1.clone(), cfg);
    }

    let block = dim + 1; // length of each homogeneous (t, x) block
    let width = 3 * block; // z, y1, y2
    let z0 = 0;
    let y1_0 = block;
    let y2_0 = 2 * block;

    let mut eqs: Vec<Vec<Rational>> = Vec::new();
    let mut ineqs: Vec<Vec<Rational>> = Vec::new();

    for e in p1.equalities() {
        eqs.push(place_block(e, y1_0, width));
    }
    for e in p2.equalities() {
        eqs.push(place_block(e, y2_0, width));
    }
    for c in p1.inequalities() {
        ineqs.push(place_block(c, y1_0, width));
    }
    for c in p2.inequalities() {
        ineqs.push(place_block(c, y2_0, width));
    }
    // t_yi >= 0
    let mut row = vec![Rational::zero(); width];
    row[y1_0] = Rational::one();
    ineqs.push(row);
    let mut row = vec![Rational::zero(); width];
    row[y2_0] = Rational::one();
    ineqs.push(row);
    // z = y1 + y2, coordinatewise.
    for k in 0..block {
        let mut row = vec![Rational::zero(); width];
        row[z0 + k] = Rational::one();
        row[y1_0 + k] = -Rational::one();
        row[y2_0 + k] = -Rational::one();
        eqs.push(row);
    }

    // Eliminate every y-column reachable via equality substitution; the
    // pivot search is restricted to the y-range so z is never pivoted on.
    let pivots = eliminate_via_equalities(&mut eqs, &mut ineqs, block..width, width);

    // Leftover equality rows (beyond the pivots used) have zero entries
    // across the whole y-range by construction, so whatever survives in
    // their z-range is a genuine output equality.
    let mut out_eqs: Vec<LinForm> = Vec::new();
    for row in eqs.iter().skip(pivots.len()) {
        let z_part = &row[z0..z0 + block];
        if z_part.iter().any(|v| !v.is_zero()) {
            out_eqs.push(LinForm::from_rational_row(z_part));
        }
    }

    // Whatever y-columns weren't pivoted by an equality still need
    // genuine Fourier-Motzkin elimination from the inequalities.
    let free_y_cols: Vec<usize> = (block..width).filter(|c| !pivots.contains(c)).collect();
    let mut rows = ineqs;
    for col in free_y_cols {
        rows = fm_eliminate_column(rows, col, width);
    }

    let mut out_ineqs: Vec<LinForm> = Vec::new();
    for row in rows {
        let z_part = &row[z0..z0 + block];
        if z_part.iter().any(|v| !v.is_zero()) {
            out_ineqs.push(LinForm::from_rational_row(z_part));
        }
    }

    let p = Polyhedron::from_constraints(dim, out_eqs, out_ineqs);
    reduce::convex_hull_of_single(p, cfg)
}

/// §4.5: fold `pairwise_fm_hull` across a whole union; order is
/// irrelevant to the final result (only to intermediate work).
pub fn iterated_fm_hull(s: &UnionSet, cfg: HullConfig) -> HullResult<Polyhedron> {
    let dim = s.dim();
    let mut members = s.nonempty_members();
    let Some(first) = members.next() else {
        return Ok(Polyhedron::empty(dim));
    };
    let mut acc = first.clone();
    for m in members {
        acc = pairwise_fm_hull(&acc, m, cfg)?;
    }
    reduce::convex_hull_of_single(acc, cfg)
}
