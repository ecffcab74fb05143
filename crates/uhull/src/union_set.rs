//! Union / set: a finite disjunction of polyhedra sharing ambient
//! dimension (§3). Order is semantically irrelevant but iteration is
//! stable (§5).

use crate::error::{HullError, HullResult};
use crate::polyhedron::Polyhedron;

#[derive(Clone, Debug)]
pub struct UnionSet {
    dim: usize,
    members: Vec<Polyhedron>,
}

impl UnionSet {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            members: Vec::new(),
        }
    }

    pub fn from_members(dim: usize, members: Vec<Polyhedron>) -> HullResult<Self> {
        for m in &members {
            if m.dim() != dim {
                return Err(HullError::DimensionMismatch {
                    expected: dim,
                    got: m.dim(),
                });
            }
        }
        Ok(Self { dim, members })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn push(&mut self, p: Polyhedron) {
        debug_assert_eq!(p.dim(), self.dim);
        self.members.push(p);
    }

    pub fn members(&self) -> &[Polyhedron] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Polyhedron> {
        self.members
    }

    /// Members that are not flagged empty, in original order (§8, "empty
    /// absorption": dropping empty members never changes the hull).
    pub fn nonempty_members(&self) -> impl Iterator<Item = &Polyhedron> {
        self.members.iter().filter(|m| !m.is_empty())
    }

    pub fn nonempty_count(&self) -> usize {
        self.nonempty_members().count()
    }

    /// The union has no points at all (every member empty, or no members).
    pub fn is_empty(&self) -> bool {
        self.nonempty_count() == 0
    }
}
