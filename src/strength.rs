//! Classical strength-of-connection measures
//!
//! An off-diagonal entry A\[i,j\] is a strong connection when it is large
//! relative to the largest off-diagonal of its row:
//!
//! ```text
//! |A[i,j]| >= theta * max_{k != i} |A[i,k]|
//! ```
//!
//! The absolute variant compares magnitudes (so it applies to complex
//! matrices); the min variant compares signed negations, Ruge and Stüben's
//! original measure for M-matrices with negative off-diagonals.
//!
//! Both produce a CSR matrix S with the same shape as A in which the
//! diagonal entry, when stored in A, is always retained regardless of the
//! threshold. Output storage must be preallocated by the caller; since S is
//! a subset of A's entries, A's nnz is a safe bound.

use crate::csr::debug_validate_pattern;
use crate::scalar::{RealScalar, Scalar};

/// Strength of connection by magnitude, `|A[i,j]| >= theta * max|A[i,k]|`
///
/// `theta` is in `[0, 1]` by convention and the comparison is `>=`. A row
/// without off-diagonals keeps only its diagonal: the max over the empty set
/// is the identity −∞ and no off-diagonal exists to test.
///
/// `s_row_ptr` is fully populated; `s_col_ind` and `s_values` are populated
/// up to `s_row_ptr[n_row]`.
pub fn classical_strength_of_connection_abs<T: Scalar>(
    n_row: usize,
    theta: f64,
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
    s_row_ptr: &mut [usize],
    s_col_ind: &mut [usize],
    s_values: &mut [T],
) {
    debug_validate_pattern(n_row, n_row, a_row_ptr, a_col_ind);
    debug_assert_eq!(a_values.len(), a_col_ind.len());
    debug_assert_eq!(s_row_ptr.len(), n_row + 1);

    let mut nnz = 0;
    s_row_ptr[0] = 0;

    for i in 0..n_row {
        let row_start = a_row_ptr[i];
        let row_end = a_row_ptr[i + 1];

        let mut max_offdiagonal = f64::NEG_INFINITY;
        for jj in row_start..row_end {
            if a_col_ind[jj] != i {
                max_offdiagonal = max_offdiagonal.max(a_values[jj].magnitude());
            }
        }

        let threshold = theta * max_offdiagonal;
        for jj in row_start..row_end {
            if a_col_ind[jj] != i {
                // Keep the entry if it reaches the threshold
                if a_values[jj].magnitude() >= threshold {
                    s_col_ind[nnz] = a_col_ind[jj];
                    s_values[nnz] = a_values[jj];
                    nnz += 1;
                }
            } else {
                // Always keep the diagonal
                s_col_ind[nnz] = a_col_ind[jj];
                s_values[nnz] = a_values[jj];
                nnz += 1;
            }
        }

        s_row_ptr[i + 1] = nnz;
    }
}

/// Strength of connection by signed negation, `-A[i,j] >= theta * max(-A[i,k])`
///
/// No absolute value is taken: positive off-diagonals have negative measure
/// and the per-row max is seeded at zero, so they can only pass at
/// `theta = 0`. The diagonal is always retained.
pub fn classical_strength_of_connection_min<T: RealScalar>(
    n_row: usize,
    theta: T,
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
    s_row_ptr: &mut [usize],
    s_col_ind: &mut [usize],
    s_values: &mut [T],
) {
    debug_validate_pattern(n_row, n_row, a_row_ptr, a_col_ind);
    debug_assert_eq!(a_values.len(), a_col_ind.len());
    debug_assert_eq!(s_row_ptr.len(), n_row + 1);

    let mut nnz = 0;
    s_row_ptr[0] = 0;

    for i in 0..n_row {
        let row_start = a_row_ptr[i];
        let row_end = a_row_ptr[i + 1];

        let mut max_offdiagonal = T::ZERO;
        for jj in row_start..row_end {
            if a_col_ind[jj] != i {
                let neg = -a_values[jj];
                if neg > max_offdiagonal {
                    max_offdiagonal = neg;
                }
            }
        }

        let threshold = theta * max_offdiagonal;
        for jj in row_start..row_end {
            if a_col_ind[jj] != i {
                if -a_values[jj] >= threshold {
                    s_col_ind[nnz] = a_col_ind[jj];
                    s_values[nnz] = a_values[jj];
                    nnz += 1;
                }
            } else {
                s_col_ind[nnz] = a_col_ind[jj];
                s_values[nnz] = a_values[jj];
                nnz += 1;
            }
        }

        s_row_ptr[i + 1] = nnz;
    }
}

/// Per-row maximum entry magnitude, diagonal included
///
/// `x[i]` receives the largest magnitude in row i, or −∞ for an empty row.
pub fn maximum_row_value<T: Scalar>(
    n_row: usize,
    x: &mut [f64],
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
) {
    debug_validate_pattern(n_row, n_row, a_row_ptr, a_col_ind);
    debug_assert_eq!(x.len(), n_row);

    for i in 0..n_row {
        let mut max_entry = f64::NEG_INFINITY;
        for jj in a_row_ptr[i]..a_row_ptr[i + 1] {
            max_entry = max_entry.max(a_values[jj].magnitude());
        }
        x[i] = max_entry;
    }
}
