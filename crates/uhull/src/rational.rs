//! Exact rational scalar used throughout the hull core.
//!
//! All comparisons and arithmetic here are exact (§3: "All comparisons are
//! exact"). We build on `num-rational`/`num-bigint` rather than `f64` —
//! Fourier-Motzkin elimination and repeated wrapping pivots can grow
//! coefficients well past `i64`/`f64` precision.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type Rational = BigRational;

pub fn from_bigint(n: BigInt) -> Rational {
    Rational::from_integer(n)
}

pub fn from_i64(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

pub fn zero() -> Rational {
    Rational::zero()
}

pub fn one() -> Rational {
    Rational::one()
}

pub fn is_zero(r: &Rational) -> bool {
    r.is_zero()
}

pub fn is_positive(r: &Rational) -> bool {
    r.is_positive()
}

pub fn is_negative(r: &Rational) -> bool {
    r.is_negative()
}

/// Greatest common divisor of two non-negative `BigInt`s.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.abs(), b.abs());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}
