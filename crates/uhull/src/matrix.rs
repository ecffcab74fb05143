//! Exact-rational matrix kit (§6, "Matrix kit": `right_inverse`, `product`,
//! `drop_rows/cols`, `preimage`).
//!
//! `nalgebra` (the teacher's matrix library) is dropped here: it targets
//! `Copy` numeric scalars on the stack, which `BigRational` is not, and
//! none of its SIMD/decomposition machinery applies to exact arithmetic
//! anyway. This module is a small dense row-major matrix over
//! `num_rational::BigRational`, grounded in the same Gauss-Jordan shape
//! used by `other_examples/.../gf2_linalg.rs` but over the rationals
//! instead of GF(2).

use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::{HullError, HullResult};
use crate::linform::LinForm;
use crate::rational::{self, Rational};

#[derive(Clone, Debug)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Rational::zero(); rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, Rational::one());
        }
        m
    }

    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for r in rows {
            assert_eq!(r.len(), ncols, "jagged matrix rows");
            data.extend(r);
        }
        Self {
            rows: nrows,
            cols: ncols,
            data,
        }
    }

    /// Each `LinForm`'s full coefficient row (constant + all variables)
    /// becomes one matrix row of width `1+dim`.
    pub fn from_linforms(forms: &[LinForm]) -> Self {
        Self::from_rows(forms.iter().map(|f| f.to_rational_row()).collect())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> &Rational {
        &self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, v: Rational) {
        self.data[r * self.cols + c] = v;
    }

    pub fn row(&self, r: usize) -> Vec<Rational> {
        self.data[r * self.cols..(r + 1) * self.cols].to_vec()
    }

    pub fn row_to_linform(&self, r: usize) -> LinForm {
        LinForm::from_rational_row(&self.row(r))
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c).clone());
            }
        }
        out
    }

    /// Standard matrix product `self * other`.
    pub fn product(&self, other: &Matrix) -> HullResult<Matrix> {
        if self.cols != other.rows {
            return Err(HullError::DimensionMismatch {
                expected: self.cols,
                got: other.rows,
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.cols {
                    let add = a * other.get(k, j);
                    let cur = out.get(i, j).clone();
                    out.set(i, j, cur + add);
                }
            }
        }
        Ok(out)
    }

    /// `row * self`, as a length-`cols` vector.
    pub fn apply_row(&self, row: &[Rational]) -> Vec<Rational> {
        assert_eq!(row.len(), self.rows);
        let mut out = vec![Rational::zero(); self.cols];
        for (k, rk) in row.iter().enumerate() {
            if rk.is_zero() {
                continue;
            }
            for j in 0..self.cols {
                out[j] = &out[j] + rk * self.get(k, j);
            }
        }
        out
    }

    pub fn drop_rows(&self, idx: &[usize]) -> Matrix {
        let keep: Vec<Vec<Rational>> = (0..self.rows)
            .filter(|r| !idx.contains(r))
            .map(|r| self.row(r))
            .collect();
        if keep.is_empty() {
            Matrix::zeros(0, self.cols)
        } else {
            Matrix::from_rows(keep)
        }
    }

    pub fn drop_cols(&self, idx: &[usize]) -> Matrix {
        let keep_cols: Vec<usize> = (0..self.cols).filter(|c| !idx.contains(c)).collect();
        let mut out = Matrix::zeros(self.rows, keep_cols.len());
        for r in 0..self.rows {
            for (j, &c) in keep_cols.iter().enumerate() {
                out.set(r, j, self.get(r, c).clone());
            }
        }
        out
    }

    /// Gauss-Jordan reduction to row-echelon form; returns the reduced
    /// matrix and the pivot column for each pivot row, in row order.
    pub fn row_echelon(&self) -> (Matrix, Vec<usize>) {
        let mut m = self.clone();
        let mut pivots = Vec::new();
        let mut pr = 0;
        for pc in 0..m.cols {
            if pr >= m.rows {
                break;
            }
            let Some(pivot_row) = (pr..m.rows).find(|&r| !m.get(r, pc).is_zero()) else {
                continue;
            };
            m.swap_rows(pr, pivot_row);
            let pivot_val = m.get(pr, pc).clone();
            for c in 0..m.cols {
                let v = m.get(pr, c) / &pivot_val;
                m.set(pr, c, v);
            }
            for r in 0..m.rows {
                if r == pr {
                    continue;
                }
                let factor = m.get(r, pc).clone();
                if factor.is_zero() {
                    continue;
                }
                for c in 0..m.cols {
                    let sub = &factor * m.get(pr, c);
                    let v = m.get(r, c) - sub;
                    m.set(r, c, v);
                }
            }
            pivots.push(pc);
            pr += 1;
        }
        (m, pivots)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    pub fn rank(&self) -> usize {
        self.row_echelon().1.len()
    }

    /// A right-inverse `R` of a full-row-rank `n x m` matrix (`n <= m`)
    /// such that `self.product(&R) == identity(n)` (§6: `right_inverse`).
    ///
    /// Non-unique: we build it by inverting the square submatrix formed
    /// by the pivot columns found during row reduction and leaving the
    /// remaining rows of `R` zero. That is a valid right-inverse because
    /// `self * R = self[:, pivots] * inv(self[:, pivots]) = I`.
    pub fn right_inverse(&self) -> HullResult<Matrix> {
        let (_, pivots) = self.row_echelon();
        if pivots.len() != self.rows {
            return Err(HullError::RankDeficient(format!(
                "expected full row rank {}, found rank {}",
                self.rows,
                pivots.len()
            )));
        }
        // Invert the square submatrix formed by the pivot columns of
        // `self` directly, rather than tracking elimination operators.
        let pivot_cols: Vec<Vec<Rational>> = (0..self.rows).map(|r| {
            pivots.iter().map(|&c| self.get(r, c).clone()).collect()
        }).collect();
        let pivot_matrix = Matrix::from_rows(pivot_cols);
        let inv = pivot_matrix.square_inverse()?;
        let mut out = Matrix::zeros(self.cols, self.rows);
        for (i, &pc) in pivots.iter().enumerate() {
            for j in 0..self.rows {
                out.set(pc, j, inv.get(i, j).clone());
            }
        }
        Ok(out)
    }

    /// Inverse of a square matrix via Gauss-Jordan on `[self | I]`.
    pub fn square_inverse(&self) -> HullResult<Matrix> {
        if self.rows != self.cols {
            return Err(HullError::DimensionMismatch {
                expected: self.rows,
                got: self.cols,
            });
        }
        let n = self.rows;
        let mut aug = Matrix::zeros(n, 2 * n);
        for r in 0..n {
            for c in 0..n {
                aug.set(r, c, self.get(r, c).clone());
            }
            aug.set(r, n + r, Rational::one());
        }
        let (reduced, pivots) = aug.row_echelon();
        if pivots.len() < n || pivots.iter().copied().take(n).ne(0..n) {
            return Err(HullError::RankDeficient("matrix is singular".to_string()));
        }
        let mut inv = Matrix::zeros(n, n);
        for r in 0..n {
            for c in 0..n {
                inv.set(r, c, reduced.get(r, n + c).clone());
            }
        }
        Ok(inv)
    }

    /// A basis of the null space `{ v : self * v = 0 }`, as row vectors of
    /// length `cols`. Used by `affine_hull` to turn a spanning set of
    /// directions into the orthogonal equality system, and vice versa.
    pub fn null_space(&self) -> Vec<Vec<Rational>> {
        let (echelon, pivots) = self.row_echelon();
        let free_cols: Vec<usize> = (0..self.cols).filter(|c| !pivots.contains(c)).collect();
        let mut basis = Vec::new();
        for &fc in &free_cols {
            let mut v = vec![Rational::zero(); self.cols];
            v[fc] = Rational::one();
            for (pr, &pc) in pivots.iter().enumerate() {
                v[pc] = -echelon.get(pr, fc).clone();
            }
            basis.push(v);
        }
        basis
    }

    /// Completes `seed_rows` (assumed independent) to an invertible `dim
    /// x dim` matrix by appending standard basis vectors that keep every
    /// row independent. Used by `wrap`/`extend` to build a coordinate
    /// change that pins a facet (and, for wrapping, a ridge) normal to a
    /// leading coordinate (§4.7/§4.8).
    pub fn complete_basis(dim: usize, seed_rows: Vec<Vec<Rational>>) -> Matrix {
        let mut rows = seed_rows;
        for k in 0..dim {
            if rows.len() == dim {
                break;
            }
            let mut e = vec![Rational::zero(); dim];
            e[k] = Rational::one();
            rows.push(e);
            let (_, pivots) = Matrix::from_rows(rows.clone()).row_echelon();
            if pivots.len() < rows.len() {
                rows.pop();
            }
        }
        Matrix::from_rows(rows)
    }

    /// Pulls a `LinForm` back through a linear coordinate change `x = T
    /// y` (`T` is `dim x dim'`), leaving the constant term untouched
    /// (§4.7/§4.8 coordinate changes act only on the linear part; the
    /// constant column is carried separately by convention in this
    /// crate — see `preimage_full` for the variant acting on the whole
    /// `1+dim` row at once).
    pub fn preimage_linear(f: &LinForm, t: &Matrix) -> LinForm {
        assert_eq!(f.dim(), t.rows());
        let lin: Vec<Rational> = (1..=f.dim())
            .map(|i| rational::from_bigint(f.coeff(i).clone()))
            .collect();
        let transformed = t.apply_row(&lin);
        let mut row = vec![rational::from_bigint(f.constant().clone())];
        row.extend(transformed);
        LinForm::from_rational_row(&row)
    }
}
