//! Polyhedron / basic set (§3).
//!
//! Ambient dimension `d`; an ordered sequence of equalities and an ordered
//! sequence of inequalities, each a `LinForm` of length `1+d`. Flags track
//! which normal-form invariants currently hold.

use std::fmt;

use crate::linform::LinForm;
use crate::rational::Rational;

/// Normal-form flags (§3). All default to `false`: a freshly-built
/// polyhedron makes no claims about redundancy or implicit equalities
/// until an operation (typically `reduce::convex_hull_of_single`) proves
/// them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolyFlags {
    pub empty: bool,
    pub rational: bool,
    pub no_redundant: bool,
    pub no_implicit: bool,
}

#[derive(Clone, Debug)]
pub struct Polyhedron {
    dim: usize,
    equalities: Vec<LinForm>,
    inequalities: Vec<LinForm>,
    flags: PolyFlags,
}

impl Polyhedron {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            equalities: Vec::new(),
            inequalities: Vec::new(),
            flags: PolyFlags::default(),
        }
    }

    pub fn from_constraints(dim: usize, equalities: Vec<LinForm>, inequalities: Vec<LinForm>) -> Self {
        for e in &equalities {
            debug_assert_eq!(e.dim(), dim);
        }
        for c in &inequalities {
            debug_assert_eq!(c.dim(), dim);
        }
        Self {
            dim,
            equalities,
            inequalities,
            flags: PolyFlags::default(),
        }
    }

    /// The whole ambient space, `R^dim`.
    pub fn universe(dim: usize) -> Self {
        let mut p = Self::new(dim);
        p.flags.rational = true;
        p.flags.no_redundant = true;
        p.flags.no_implicit = true;
        p
    }

    /// The empty set of dimension `dim`.
    pub fn empty(dim: usize) -> Self {
        let mut p = Self::new(dim);
        p.flags.empty = true;
        p.flags.rational = true;
        p.flags.no_redundant = true;
        p.flags.no_implicit = true;
        p
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.flags.empty
    }

    pub fn mark_empty(&mut self) {
        self.flags.empty = true;
        self.equalities.clear();
        self.inequalities.clear();
        self.flags.no_redundant = true;
        self.flags.no_implicit = true;
    }

    pub fn flags(&self) -> PolyFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PolyFlags) {
        self.flags = flags;
    }

    pub fn equalities(&self) -> &[LinForm] {
        &self.equalities
    }

    pub fn inequalities(&self) -> &[LinForm] {
        &self.inequalities
    }

    pub fn equalities_mut(&mut self) -> &mut Vec<LinForm> {
        &mut self.equalities
    }

    pub fn inequalities_mut(&mut self) -> &mut Vec<LinForm> {
        &mut self.inequalities
    }

    pub fn add_equality(&mut self, e: LinForm) {
        debug_assert_eq!(e.dim(), self.dim);
        self.flags.no_implicit = false;
        self.equalities.push(e);
    }

    pub fn add_inequality(&mut self, c: LinForm) {
        debug_assert_eq!(c.dim(), self.dim);
        self.flags.no_redundant = false;
        self.inequalities.push(c);
    }

    pub fn set_equalities(&mut self, eqs: Vec<LinForm>) {
        self.equalities = eqs;
    }

    pub fn set_inequalities(&mut self, ineqs: Vec<LinForm>) {
        self.inequalities = ineqs;
    }

    /// Exact membership test: every equality evaluates to 0 and every
    /// inequality evaluates to >= 0 at `point`.
    pub fn contains_point(&self, point: &[Rational]) -> bool {
        if self.is_empty() {
            return false;
        }
        assert_eq!(point.len(), self.dim);
        self.equalities.iter().all(|e| e.eval(point).is_zero_val())
            && self.inequalities.iter().all(|c| !c.eval(point).is_negative_val())
    }
}

// Small local extension trait so `contains_point` reads naturally without
// importing num-traits at every call site.
trait RationalExt {
    fn is_zero_val(&self) -> bool;
    fn is_negative_val(&self) -> bool;
}

impl RationalExt for Rational {
    fn is_zero_val(&self) -> bool {
        use num_traits::Zero;
        self.is_zero()
    }
    fn is_negative_val(&self) -> bool {
        use num_traits::Signed;
        self.is_negative()
    }
}

impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{ [dim {}] : false }}", self.dim);
        }
        write!(f, "{{ [dim {}] :", self.dim)?;
        let mut first = true;
        for e in &self.equalities {
            write!(f, " {}{} = 0", if first { "" } else { "and " }, e)?;
            first = false;
        }
        for c in &self.inequalities {
            write!(f, " {}{} >= 0", if first { "" } else { "and " }, c)?;
            first = false;
        }
        if first {
            write!(f, " true")?;
        }
        write!(f, " }}")
    }
}
