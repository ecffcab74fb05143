//! Linear forms of length `1+d` (§3).
//!
//! A `LinForm` represents `c0 + c1*x1 + ... + cd*xd`, used either as an
//! equality (`= 0`) or an inequality (`>= 0`) depending on which sequence
//! of a `Polyhedron` it lives in. Coefficients are exact integers; scaling
//! by a positive integer never changes meaning, so every constructor that
//! can produce a non-primitive row reduces it by the gcd of its entries.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

use crate::rational::{self, Rational};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinForm {
    /// `coeffs[0]` is the constant term; `coeffs[1..=dim]` are `x1..xd`.
    coeffs: Vec<BigInt>,
}

impl LinForm {
    pub fn new(coeffs: Vec<BigInt>) -> Self {
        assert!(!coeffs.is_empty(), "LinForm needs at least a constant term");
        let mut f = Self { coeffs };
        f.reduce();
        f
    }

    pub fn zero(dim: usize) -> Self {
        Self {
            coeffs: vec![BigInt::zero(); dim + 1],
        }
    }

    /// Builds `xi + shift`-style single-variable rows, e.g. the canonical
    /// `x1 >= lo` / `x1 <= hi` bounds used by the 1-D specialization.
    pub fn single_var(dim: usize, var: usize, coeff: BigInt, constant: BigInt) -> Self {
        let mut coeffs = vec![BigInt::zero(); dim + 1];
        coeffs[0] = constant;
        coeffs[var] = coeff;
        Self::new(coeffs)
    }

    pub fn dim(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn constant(&self) -> &BigInt {
        &self.coeffs[0]
    }

    pub fn set_constant(&mut self, c: BigInt) {
        self.coeffs[0] = c;
    }

    /// Coefficient of `x_i` for `i` in `1..=dim`.
    pub fn coeff(&self, i: usize) -> &BigInt {
        &self.coeffs[i]
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    pub fn is_zero_form(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// True when every variable coefficient is zero (only the constant
    /// term may be nonzero) — a trivially true/false constraint.
    pub fn is_constant_only(&self) -> bool {
        self.coeffs[1..].iter().all(|c| c.is_zero())
    }

    pub fn negate(&self) -> LinForm {
        LinForm::new(self.coeffs.iter().map(|c| -c).collect())
    }

    pub fn scale(&self, k: &BigInt) -> LinForm {
        LinForm::new(self.coeffs.iter().map(|c| c * k).collect())
    }

    /// `ka * a + kb * b`, reduced to primitive form.
    pub fn combine(a: &LinForm, ka: &BigInt, b: &LinForm, kb: &BigInt) -> LinForm {
        assert_eq!(a.dim(), b.dim(), "combine requires matching dimension");
        let coeffs = a
            .coeffs
            .iter()
            .zip(b.coeffs.iter())
            .map(|(ai, bi)| ai * ka + bi * kb)
            .collect();
        LinForm::new(coeffs)
    }

    /// Evaluate at a rational point of length `dim`.
    pub fn eval(&self, point: &[Rational]) -> Rational {
        assert_eq!(point.len(), self.dim());
        let mut acc = rational::from_bigint(self.coeffs[0].clone());
        for (ci, xi) in self.coeffs[1..].iter().zip(point) {
            acc += rational::from_bigint(ci.clone()) * xi;
        }
        acc
    }

    /// Divide through by the gcd of all (nonzero) coefficients, including
    /// the constant term, preserving sign of the leading nonzero entry.
    pub fn reduce(&mut self) {
        let g = self
            .coeffs
            .iter()
            .filter(|c| !c.is_zero())
            .fold(BigInt::zero(), |acc, c| rational::gcd(&acc, c));
        if g.is_zero() || g.is_one() {
            return;
        }
        for c in self.coeffs.iter_mut() {
            *c /= &g;
        }
    }

    /// Builds a `LinForm` from an exact rational row by clearing
    /// denominators (multiply by their LCM, always positive) and then
    /// reducing by the gcd of the resulting integers. Used whenever a row
    /// comes out of rational matrix algebra (coordinate changes, FM
    /// elimination combinations) and must be re-expressed as the spec's
    /// integer-coefficient linear form.
    pub fn from_rational_row(row: &[BigRational]) -> LinForm {
        let mut lcm = BigInt::one();
        for r in row {
            let d = r.denom().abs();
            if d.is_zero() {
                continue;
            }
            let g = rational::gcd(&lcm, &d);
            lcm = (&lcm / &g) * &d;
        }
        let coeffs: Vec<BigInt> = row.iter().map(|r| (r * &lcm).to_integer()).collect();
        LinForm::new(coeffs)
    }

    pub fn to_rational_row(&self) -> Vec<BigRational> {
        self.coeffs
            .iter()
            .map(|c| rational::from_bigint(c.clone()))
            .collect()
    }

    /// Canonical key for deduplicating *inequalities*: same direction
    /// (positive-scalar-equivalent) collapses to the same key, but an
    /// inequality and its negation are distinct (§3: "inequalities with
    /// identical normal up to positive scaling are deduplicated").
    pub fn dedup_key(&self) -> LinForm {
        self.clone()
    }
}

impl fmt::Display for LinForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if i == 0 {
                write!(f, "{}", c)?;
            } else {
                write!(f, "{}*x{}", c, i)?;
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
