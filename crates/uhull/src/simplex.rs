//! Exact-rational simplex engine (§6: "LP oracle" and "simplex tableau").
//!
//! The spec treats the LP oracle (C1) and the low-level tableau used only
//! for redundancy/equality detection (§4.1) as two separate external
//! contracts. Both are, in the end, the same exact-rational simplex
//! method over the same standard form, so this crate implements one
//! engine (`Tableau`) and exposes two thin call shapes: [`minimize`] for
//! the general LP oracle, and [`Tableau::from_polyhedron`] plus
//! [`Tableau::detect_equalities`]/[`Tableau::detect_redundant`] for the
//! reduction primitives `reduce::convex_hull_of_single` needs.
//!
//! Variables of a `Polyhedron` are unrestricted in sign, so each is split
//! `x_i = u_i - v_i` with `u_i, v_i >= 0` (the classic reduction to
//! standard form; grounded in the two-phase shape of
//! `other_examples/.../simplex_primal.rs.rs`). Every inequality gets a
//! slack `s_j >= 0`. Phase 1 minimizes the sum of artificial variables to
//! find a feasible basis (or prove infeasibility); phase 2 optimizes the
//! caller's objective from there.
//!
//! Pivot rule is fixed to Bland's smallest-index rule by default (§5:
//! "implementations must document and hold fixed their LP pivot rule"),
//! which guarantees termination on every input since ties never cycle.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::config::{HullConfig, PivotRule};
use crate::error::{HullError, HullResult};
use crate::linform::LinForm;
use crate::polyhedron::Polyhedron;
use crate::rational::{self, Rational};

/// Outcome of `solve_lp` (§6 C1 contract): `ok(num, den)` becomes
/// `Optimal`; `unbounded` and `empty` are distinct signals, not errors
/// (§7.3).
#[derive(Clone, Debug, PartialEq)]
pub enum LpOutcome {
    Optimal(Rational),
    Unbounded,
    Empty,
}

/// Column layout of the standard-form tableau built from a `Polyhedron`.
struct Layout {
    dim: usize,
    n_eq: usize,
    n_ineq: usize,
    n_artificial: usize,
}

impl Layout {
    fn total_vars(&self) -> usize {
        2 * self.dim + self.n_ineq + self.n_artificial
    }
    fn u(&self, i: usize) -> usize {
        i
    }
    fn v(&self, i: usize) -> usize {
        self.dim + i
    }
    fn slack(&self, j: usize) -> usize {
        2 * self.dim + j
    }
    fn artificial(&self, k: usize) -> usize {
        2 * self.dim + self.n_ineq + k
    }
}

/// Exact-rational simplex tableau in the classic augmented form: `rows`
/// constraint rows plus one trailing objective row, all updated together
/// by the same pivot operation (§4.1: "Build an exact-rational simplex
/// tableau from P").
pub struct Tableau {
    layout: Layout,
    /// `rows.len() == n_eq + n_ineq`; each row has `total_vars() + 1`
    /// entries (last one is the RHS).
    rows: Vec<Vec<Rational>>,
    obj: Vec<Rational>,
    basis: Vec<usize>,
}

impl Tableau {
    /// Builds the phase-1-ready tableau for `p`: one artificial variable
    /// per constraint row, basis initialized to the artificials.
    pub fn from_polyhedron(p: &Polyhedron) -> HullResult<Tableau> {
        let dim = p.dim();
        let n_eq = p.equalities().len();
        let n_ineq = p.inequalities().len();
        let n_rows = n_eq + n_ineq;
        let layout = Layout {
            dim,
            n_eq,
            n_ineq,
            n_artificial: n_rows,
        };
        let width = layout.total_vars() + 1;
        let mut rows = Vec::with_capacity(n_rows);
        let mut basis = Vec::with_capacity(n_rows);

        let mut push_row = |form: &LinForm, slack_col: Option<usize>, row_idx: usize, rows: &mut Vec<Vec<Rational>>, basis: &mut Vec<usize>| {
            let mut row = vec![Rational::zero(); width];
            for i in 0..dim {
                let ci = rational::from_bigint(form.coeff(i + 1).clone());
                row[layout.u(i)] = ci.clone();
                row[layout.v(i)] = -ci;
            }
            if let Some(s) = slack_col {
                row[s] = -Rational::from_integer(BigInt::from(1));
            }
            let mut rhs = -rational::from_bigint(form.constant().clone());
            if rhs.is_negative() {
                for v in row.iter_mut() {
                    *v = -v.clone();
                }
                rhs = -rhs;
            }
            row[layout.artificial(row_idx)] = Rational::from_integer(BigInt::from(1));
            row[width - 1] = rhs;
            rows.push(row);
            basis.push(layout.artificial(row_idx));
        };

        for e in p.equalities() {
            let idx = rows.len();
            push_row(e, None, idx, &mut rows, &mut basis);
        }
        for (j, c) in p.inequalities().iter().enumerate() {
            let idx = rows.len();
            push_row(c, Some(layout.slack(j)), idx, &mut rows, &mut basis);
        }

        let obj = vec![Rational::zero(); width];
        let mut t = Tableau {
            layout,
            rows,
            obj,
            basis,
        };
        t.set_phase1_objective();
        Ok(t)
    }

    fn width(&self) -> usize {
        self.layout.total_vars() + 1
    }

    fn artificial_cols(&self) -> std::ops::Range<usize> {
        let start = self.layout.artificial(0);
        start..start + self.layout.n_artificial
    }

    /// Phase-1 objective: minimize the sum of artificial variables,
    /// expressed (after folding out the basic artificials) as `-sum` of
    /// each constraint row, so the tableau's reduced costs are correct
    /// from the start.
    fn set_phase1_objective(&mut self) {
        let width = self.width();
        self.obj = vec![Rational::zero(); width];
        for col in self.artificial_cols() {
            self.obj[col] = Rational::from_integer(BigInt::from(1));
        }
        for row in &self.rows {
            for c in 0..width {
                self.obj[c] = &self.obj[c] - &row[c];
            }
        }
    }

    fn set_phase2_objective(&mut self, direction: &[BigInt]) {
        let width = self.width();
        self.obj = vec![Rational::zero(); width];
        for (i, d) in direction.iter().enumerate() {
            let di = rational::from_bigint(d.clone());
            self.obj[self.layout.u(i)] = di.clone();
            self.obj[self.layout.v(i)] = -di;
        }
        // Fold out basic variables so reduced costs are correct (the
        // objective row must be zero in every basic column).
        for (row_idx, &bcol) in self.basis.clone().iter().enumerate() {
            let coeff = self.obj[bcol].clone();
            if coeff.is_zero() {
                continue;
            }
            for c in 0..width {
                let sub = &coeff * &self.rows[row_idx][c];
                self.obj[c] = &self.obj[c] - sub;
            }
        }
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let width = self.width();
        let pivot_val = self.rows[row][col].clone();
        for c in 0..width {
            self.rows[row][c] = &self.rows[row][c] / &pivot_val;
        }
        for r in 0..self.rows.len() {
            if r == row {
                continue;
            }
            let factor = self.rows[r][col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..width {
                let sub = &factor * &self.rows[row][c];
                self.rows[r][c] = &self.rows[r][c] - sub;
            }
        }
        let factor = self.obj[col].clone();
        if !factor.is_zero() {
            for c in 0..width {
                let sub = &factor * &self.rows[row][c];
                self.obj[c] = &self.obj[c] - sub;
            }
        }
        self.basis[row] = col;
    }

    /// Runs pivots until optimal or unbounded, restricted to candidate
    /// entering columns in `allowed` (used to forbid re-entering
    /// artificial columns once phase 1 is done).
    fn run(&mut self, rule: PivotRule, allowed: impl Fn(usize) -> bool) -> HullResult<bool> {
        let width = self.width();
        let n_cols = width - 1;
        let max_iters = 10_000 + 50 * self.rows.len() * n_cols;
        // Dantzig's rule has no anti-cycling guarantee on degenerate
        // inputs; after this many pivots without reaching the bound we
        // fall back to Bland's rule, which always terminates.
        let force_bland_after = self.rows.len() * n_cols + 64;
        let mut iters = 0usize;
        loop {
            iters += 1;
            if iters > max_iters {
                return Err(HullError::TableauError(
                    "simplex did not terminate within the iteration bound".to_string(),
                ));
            }
            let use_bland = matches!(rule, PivotRule::Bland) || iters > force_bland_after;
            let entering = if use_bland {
                (0..n_cols).find(|&c| allowed(c) && self.obj[c].is_negative())
            } else {
                (0..n_cols)
                    .filter(|&c| allowed(c) && self.obj[c].is_negative())
                    .min_by(|&a, &b| self.obj[a].cmp(&self.obj[b]))
            };
            let Some(col) = entering else {
                return Ok(true); // optimal
            };
            let mut best_row: Option<usize> = None;
            let mut best_ratio: Option<Rational> = None;
            for r in 0..self.rows.len() {
                let a = &self.rows[r][col];
                if !a.is_positive() {
                    continue;
                }
                let ratio = &self.rows[r][width - 1] / a;
                let better = match &best_ratio {
                    None => true,
                    Some(b) => {
                        ratio < *b
                            || (ratio == *b && self.basis[r] < self.basis[best_row.unwrap()])
                    }
                };
                if better {
                    best_ratio = Some(ratio);
                    best_row = Some(r);
                }
            }
            match best_row {
                None => return Ok(false), // unbounded
                Some(r) => self.pivot(r, col),
            }
        }
    }

    fn rhs_value(&self) -> Rational {
        -self.obj[self.width() - 1].clone()
    }

    /// Recovers `x_i = u_i - v_i` for the current basic feasible
    /// solution.
    fn point(&self) -> Vec<Rational> {
        let width = self.width();
        let mut values = vec![Rational::zero(); self.layout.total_vars()];
        for (row_idx, &col) in self.basis.iter().enumerate() {
            values[col] = self.rows[row_idx][width - 1].clone();
        }
        (0..self.layout.dim)
            .map(|i| &values[self.layout.u(i)] - &values[self.layout.v(i)])
            .collect()
    }

    fn run_phase1(&mut self, cfg: HullConfig) -> HullResult<bool> {
        let art_start = self.layout.artificial(0);
        let ok = self.run(cfg.pivot_rule, |c| c < art_start)?;
        debug_assert!(ok, "phase 1 objective is always bounded below by 0");
        Ok(self.rhs_value().is_zero())
    }

    /// Drives any artificial variable still in the basis (at value 0,
    /// since phase 1 succeeded) out, preferring any non-artificial
    /// column with a nonzero entry in that row.
    fn purge_artificials_from_basis(&mut self) {
        let art_start = self.layout.artificial(0);
        for row_idx in 0..self.rows.len() {
            if self.basis[row_idx] < art_start {
                continue;
            }
            if let Some(col) = (0..art_start).find(|&c| !self.rows[row_idx][c].is_zero()) {
                self.pivot(row_idx, col);
            }
        }
    }

    /// General LP oracle (§6 C1): minimize `direction . x` over `p`,
    /// ignoring `direction`'s constant term (there isn't one — the caller
    /// passes a length-`dim` vector) per the spec's contract.
    pub fn minimize(p: &Polyhedron, direction: &[BigInt], cfg: HullConfig) -> HullResult<LpOutcome> {
        if p.is_empty() {
            return Ok(LpOutcome::Empty);
        }
        assert_eq!(direction.len(), p.dim());
        let mut t = Tableau::from_polyhedron(p)?;
        if !t.run_phase1(cfg)? {
            return Ok(LpOutcome::Empty);
        }
        t.purge_artificials_from_basis();
        t.set_phase2_objective(direction);
        let art_start = t.layout.artificial(0);
        let bounded = t.run(cfg.pivot_rule, |c| c < art_start)?;
        if !bounded {
            return Ok(LpOutcome::Unbounded);
        }
        Ok(LpOutcome::Optimal(t.rhs_value()))
    }

    /// Finds any feasible point of `p` (phase 1 only), or `None` if `p`
    /// is empty. Used by `affine_hull` to anchor the running affine span.
    pub fn feasible_point(p: &Polyhedron, cfg: HullConfig) -> HullResult<Option<Vec<Rational>>> {
        if p.is_empty() {
            return Ok(None);
        }
        let mut t = Tableau::from_polyhedron(p)?;
        if !t.run_phase1(cfg)? {
            return Ok(None);
        }
        Ok(Some(t.point()))
    }

    /// Minimum of the *full* linear form `c0 + c.x` over `p` (unlike
    /// [`Tableau::minimize`], which per the C1 contract ignores the
    /// constant term and must have it re-added by the caller).
    pub fn minimize_form(p: &Polyhedron, form: &LinForm, cfg: HullConfig) -> HullResult<LpOutcome> {
        let dir: Vec<BigInt> = (1..=form.dim()).map(|i| form.coeff(i).clone()).collect();
        let out = Tableau::minimize(p, &dir, cfg)?;
        Ok(match out {
            LpOutcome::Optimal(v) => {
                LpOutcome::Optimal(v + rational::from_bigint(form.constant().clone()))
            }
            other => other,
        })
    }

    /// Maximum of the full linear form `c0 + c.x` over `p`, via
    /// `minimize_form` on the negated direction.
    pub fn maximize_form(p: &Polyhedron, form: &LinForm, cfg: HullConfig) -> HullResult<LpOutcome> {
        let out = Tableau::minimize_form(p, &form.negate(), cfg)?;
        Ok(match out {
            LpOutcome::Optimal(v) => LpOutcome::Optimal(-v),
            other => other,
        })
    }

    /// §4.1(d): an inequality is an implicit equality iff its minimum and
    /// maximum over `p` are both 0.
    pub fn is_implicit_equality(p: &Polyhedron, c: &LinForm, cfg: HullConfig) -> HullResult<bool> {
        let min = Tableau::minimize_form(p, c, cfg)?;
        let max = Tableau::maximize_form(p, c, cfg)?;
        Ok(matches!(
            (min, max),
            (LpOutcome::Optimal(a), LpOutcome::Optimal(b))
                if a.is_zero() && b.is_zero()
        ))
    }

    /// §4.1(e): `c` is redundant in `p` iff minimizing `c` over `p`
    /// *without* `c` itself is still `>= 0` (that is, `>= -c0`, but
    /// `minimize_form` already folds `c0` in).
    pub fn is_redundant(p_without_c: &Polyhedron, c: &LinForm, cfg: HullConfig) -> HullResult<bool> {
        match Tableau::minimize_form(p_without_c, c, cfg)? {
            LpOutcome::Optimal(v) => Ok(!v.is_negative()),
            LpOutcome::Unbounded => Ok(false),
            LpOutcome::Empty => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn unit_interval() -> Polyhedron {
        // 0 <= x <= 1
        let mut p = Polyhedron::new(1);
        p.add_inequality(LinForm::new(vec![BigInt::from(0), BigInt::from(1)]));
        p.add_inequality(LinForm::new(vec![BigInt::from(1), BigInt::from(-1)]));
        p
    }

    #[test]
    fn minimize_x_over_unit_interval() {
        let p = unit_interval();
        let out = Tableau::minimize(&p, &[BigInt::from(1)], HullConfig::default()).unwrap();
        assert_eq!(out, LpOutcome::Optimal(rational::from_i64(0)));
    }

    #[test]
    fn maximize_x_over_unit_interval() {
        let p = unit_interval();
        let out = Tableau::minimize(&p, &[BigInt::from(-1)], HullConfig::default()).unwrap();
        assert_eq!(out, LpOutcome::Optimal(rational::from_i64(-1)));
    }

    #[test]
    fn unbounded_halfline() {
        let mut p = Polyhedron::new(1);
        p.add_inequality(LinForm::new(vec![BigInt::from(0), BigInt::from(1)])); // x >= 0
        let out = Tableau::minimize(&p, &[BigInt::from(-1)], HullConfig::default()).unwrap();
        assert_eq!(out, LpOutcome::Unbounded);
    }

    #[test]
    fn infeasible_is_empty() {
        let mut p = Polyhedron::new(1);
        p.add_inequality(LinForm::new(vec![BigInt::from(-1), BigInt::from(1)])); // x >= 1
        p.add_inequality(LinForm::new(vec![BigInt::from(0), BigInt::from(-1)])); // -x >= 0 i.e. x <= 0
        let out = Tableau::minimize(&p, &[BigInt::from(1)], HullConfig::default()).unwrap();
        assert_eq!(out, LpOutcome::Empty);
    }

    #[test]
    fn feasible_point_satisfies_constraints() {
        let p = unit_interval();
        let pt = Tableau::feasible_point(&p, HullConfig::default()).unwrap().unwrap();
        assert!(p.contains_point(&pt));
    }
}
