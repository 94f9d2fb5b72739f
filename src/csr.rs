//! CSR containers and structural validation
//!
//! The kernels in this crate operate on raw CSR triples (`row_ptr`,
//! `col_ind`, `values`) so that callers keep ownership of every buffer.
//! [`CsrMatrix`] is the owned convenience container for building those
//! triples, transposing them, and pairing a strength pattern with the values
//! of the operator it was derived from.
//!
//! Column indices within a row are not required to be sorted, and the
//! diagonal entry may or may not be stored explicitly.

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Coarse/fine classification of a node
///
/// `Unassigned` only appears inside the splitting algorithms; every public
/// operation returns slices containing `Fine` and `Coarse` alone.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    /// Node kept only on the fine grid
    Fine = 0,
    /// Node selected for the coarse grid
    Coarse = 1,
    /// Not yet classified (transient)
    Unassigned = 2,
}

impl NodeTag {
    /// True for coarse-grid nodes
    #[inline]
    pub fn is_coarse(self) -> bool {
        self == NodeTag::Coarse
    }

    /// True for fine-grid nodes
    #[inline]
    pub fn is_fine(self) -> bool {
        self == NodeTag::Fine
    }
}

/// Validate a CSR pattern: row pointer endpoints, monotonicity, column bounds
///
/// `nnz` is taken from `row_ptr[n_rows]` and checked against `col_ind.len()`.
pub fn validate_pattern(
    n_rows: usize,
    n_cols: usize,
    row_ptr: &[usize],
    col_ind: &[usize],
) -> Result<()> {
    if row_ptr.len() != n_rows + 1 {
        return Err(Error::length_mismatch("row_ptr", n_rows + 1, row_ptr.len()));
    }
    if row_ptr[0] != 0 {
        return Err(Error::InvalidRowPointer {
            position: 0,
            reason: format!("expected 0, got {}", row_ptr[0]),
        });
    }
    for i in 0..n_rows {
        if row_ptr[i + 1] < row_ptr[i] {
            return Err(Error::InvalidRowPointer {
                position: i + 1,
                reason: format!("decreasing: {} after {}", row_ptr[i + 1], row_ptr[i]),
            });
        }
    }
    if row_ptr[n_rows] != col_ind.len() {
        return Err(Error::length_mismatch(
            "col_ind",
            row_ptr[n_rows],
            col_ind.len(),
        ));
    }
    for &j in col_ind {
        if j >= n_cols {
            return Err(Error::ColumnOutOfBounds { index: j, n_cols });
        }
    }
    Ok(())
}

/// Debug-build structural check used at kernel entry
///
/// Release builds skip it; callers are the guardians of buffer sizing.
#[inline]
pub(crate) fn debug_validate_pattern(
    n_rows: usize,
    n_cols: usize,
    row_ptr: &[usize],
    col_ind: &[usize],
) {
    #[cfg(debug_assertions)]
    if let Err(e) = validate_pattern(n_rows, n_cols, row_ptr, col_ind) {
        panic!("malformed CSR input: {e}");
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = (n_rows, n_cols, row_ptr, col_ind);
    }
}

/// Owned CSR (Compressed Sparse Row) matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    row_ptr: Vec<usize>,
    col_ind: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Create a CSR matrix from its three arrays
    ///
    /// # Errors
    ///
    /// Returns an error if `row_ptr` has the wrong length or endpoints, is
    /// decreasing, any column index is out of range, or `values` and
    /// `col_ind` disagree in length.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_ind: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        validate_pattern(n_rows, n_cols, &row_ptr, &col_ind)?;
        if values.len() != col_ind.len() {
            return Err(Error::length_mismatch(
                "values",
                col_ind.len(),
                values.len(),
            ));
        }
        Ok(Self {
            n_rows,
            n_cols,
            row_ptr,
            col_ind,
            values,
        })
    }

    /// Number of rows
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.col_ind.len()
    }

    /// Row pointer array (length `n_rows + 1`)
    #[inline]
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column index array
    #[inline]
    pub fn col_ind(&self) -> &[usize] {
        &self.col_ind
    }

    /// Value array
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable value array (pattern stays fixed)
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Column indices and values of row `i`
    #[inline]
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        (&self.col_ind[range.clone()], &self.values[range])
    }

    /// Value at (i, j), if stored (linear scan over row i)
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        let (cols, vals) = self.row(i);
        cols.iter().position(|&c| c == j).map(|p| vals[p])
    }

    /// Transpose by counting sort on column indices
    ///
    /// The result has sorted column indices within each row.
    pub fn transpose(&self) -> Self {
        let nnz = self.nnz();
        let mut t_row_ptr = vec![0usize; self.n_cols + 1];
        for &j in &self.col_ind {
            t_row_ptr[j + 1] += 1;
        }
        for j in 0..self.n_cols {
            t_row_ptr[j + 1] += t_row_ptr[j];
        }

        let mut t_col_ind = vec![0usize; nnz];
        let mut t_values = vec![T::ZERO; nnz];
        let mut next = t_row_ptr.clone();
        for i in 0..self.n_rows {
            for jj in self.row_ptr[i]..self.row_ptr[i + 1] {
                let j = self.col_ind[jj];
                let dest = next[j];
                t_col_ind[dest] = i;
                t_values[dest] = self.values[jj];
                next[j] += 1;
            }
        }

        Self {
            n_rows: self.n_cols,
            n_cols: self.n_rows,
            row_ptr: t_row_ptr,
            col_ind: t_col_ind,
            values: t_values,
        }
    }

    /// Matrix with this matrix's sparsity pattern and values copied from `a`
    ///
    /// This builds the C operand of the standard and distance-two
    /// interpolation families: the pattern of a strength matrix filled with
    /// the entries of the operator it was derived from. Positions absent
    /// from `a` become zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` has a different shape.
    pub fn with_pattern_values_of(&self, a: &CsrMatrix<T>) -> Result<CsrMatrix<T>> {
        if a.n_rows != self.n_rows || a.n_cols != self.n_cols {
            return Err(Error::PatternMismatch(format!(
                "shape {}x{} vs {}x{}",
                self.n_rows, self.n_cols, a.n_rows, a.n_cols
            )));
        }
        let mut values = Vec::with_capacity(self.nnz());
        for i in 0..self.n_rows {
            let (cols, _) = self.row(i);
            for &j in cols {
                values.push(a.get(i, j).unwrap_or(T::ZERO));
            }
        }
        Ok(CsrMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_ptr: self.row_ptr.clone(),
            col_ind: self.col_ind.clone(),
            values,
        })
    }
}
