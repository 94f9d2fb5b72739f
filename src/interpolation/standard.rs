//! Standard and modified standard interpolation
//!
//! An F-point i interpolates from its strong C-neighbors, and every strong
//! F-neighbor k of i redistributes its coupling a_ik over those C-points in
//! proportion to a_kj, normalized by k's total coupling to i's strong C-set.
//! The modified variant drops any a_kj whose sign matches the diagonal a_kk,
//! which keeps the redistribution meaningful for rows with mixed signs; it
//! assumes strong F-F pairs without a common C-neighbor were removed first
//! (see [`remove_strong_ff_connections`]).

use crate::csr::{NodeTag, debug_validate_pattern};
use crate::interpolation::map_to_coarse_indices;
use crate::scalar::RealScalar;

/// Magnitudes below this are treated as numerically zero
const ZERO_TOL: f64 = 1e-16;

fn standard_pass2_impl<T: RealScalar>(
    n_nodes: usize,
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
    c_row_ptr: &[usize],
    c_col_ind: &[usize],
    c_values: &[T],
    splitting: &[NodeTag],
    p_row_ptr: &[usize],
    p_col_ind: &mut [usize],
    p_values: &mut [T],
    sign_filtered: bool,
) {
    debug_validate_pattern(n_nodes, n_nodes, a_row_ptr, a_col_ind);
    debug_validate_pattern(n_nodes, n_nodes, c_row_ptr, c_col_ind);
    debug_assert_eq!(splitting.len(), n_nodes);
    debug_assert_eq!(p_row_ptr.len(), n_nodes + 1);
    debug_assert!(p_col_ind.len() >= p_row_ptr[n_nodes]);
    debug_assert!(p_values.len() >= p_row_ptr[n_nodes]);

    for i in 0..n_nodes {
        // C-points interpolate by injection
        if splitting[i].is_coarse() {
            p_col_ind[p_row_ptr[i]] = i;
            p_values[p_row_ptr[i]] = T::ONE;
            continue;
        }

        // Denominator: a_ii plus the weak couplings, i.e. the full row sum
        // of A minus the strong connections (diagonal left in)
        let mut denominator = T::ZERO;
        for mm in a_row_ptr[i]..a_row_ptr[i + 1] {
            denominator += a_values[mm];
        }
        for mm in c_row_ptr[i]..c_row_ptr[i + 1] {
            if c_col_ind[mm] != i {
                denominator -= c_values[mm];
            }
        }
        if denominator.magnitude() < ZERO_TOL {
            tracing::warn!(
                row = i,
                "interpolation denominator is zero: diagonal plus weak connections vanished"
            );
        }

        let mut nnz = p_row_ptr[i];
        for jj in c_row_ptr[i]..c_row_ptr[i + 1] {
            let j = c_col_ind[jj];
            if !splitting[j].is_coarse() {
                continue;
            }

            // Column stays a global index until the final coarse re-map
            p_col_ind[nnz] = j;
            let mut numerator = c_values[jj];

            // Fold in the strong F-neighbors of i
            for kk in c_row_ptr[i]..c_row_ptr[i + 1] {
                let k = c_col_ind[kk];
                if splitting[k] != NodeTag::Fine || k == i {
                    continue;
                }
                let a_ik = c_values[kk];

                // a_kj and a_kk live somewhere in row k of A
                let mut a_kj = T::ZERO;
                let mut a_kk = T::ZERO;
                for search_ind in a_row_ptr[k]..a_row_ptr[k + 1] {
                    if a_col_ind[search_ind] == j {
                        a_kj = a_values[search_ind];
                    } else if a_col_ind[search_ind] == k {
                        a_kk = a_values[search_ind];
                    }
                }
                if sign_filtered && a_kj.signof() == a_kk.signof() {
                    a_kj = T::ZERO;
                }
                if a_kj.magnitude() <= ZERO_TOL {
                    continue;
                }

                // Normalize by k's total coupling to i's strong C-points
                let mut inner_denominator = T::ZERO;
                for ll in c_row_ptr[i]..c_row_ptr[i + 1] {
                    let l = c_col_ind[ll];
                    if !splitting[l].is_coarse() {
                        continue;
                    }
                    for search_ind in a_row_ptr[k]..a_row_ptr[k + 1] {
                        if a_col_ind[search_ind] == l {
                            let a_kl = a_values[search_ind];
                            if !sign_filtered || a_kl.signof() != a_kk.signof() {
                                inner_denominator += a_kl;
                            }
                            break;
                        }
                    }
                }
                if inner_denominator.magnitude() < ZERO_TOL {
                    tracing::warn!(row = i, neighbor = k, "inner interpolation denominator is zero");
                }
                numerator += a_ik * a_kj / inner_denominator;
            }

            p_values[nnz] = -numerator / denominator;
            nnz += 1;
        }
    }

    map_to_coarse_indices(n_nodes, splitting, &mut p_col_ind[..p_row_ptr[n_nodes]]);
}

/// Fill the columns and weights of the standard-interpolation prolongator
///
/// `c_*` is the strength pattern of S carrying the values of A, and
/// `p_row_ptr` comes from
/// [`classical_interpolation_pass1`](crate::interpolation::classical_interpolation_pass1).
/// Column indices are rewritten to coarse numbering before returning.
pub fn standard_interpolation_pass2<T: RealScalar>(
    n_nodes: usize,
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
    c_row_ptr: &[usize],
    c_col_ind: &[usize],
    c_values: &[T],
    splitting: &[NodeTag],
    p_row_ptr: &[usize],
    p_col_ind: &mut [usize],
    p_values: &mut [T],
) {
    standard_pass2_impl(
        n_nodes, a_row_ptr, a_col_ind, a_values, c_row_ptr, c_col_ind, c_values, splitting,
        p_row_ptr, p_col_ind, p_values, false,
    );
}

/// Standard interpolation with sign-filtered F-neighbor contributions
///
/// Differs from [`standard_interpolation_pass2`] by zeroing every a_kj and
/// excluding every a_kl whose sign matches the diagonal a_kk. Expects the
/// strength matrix to have been preprocessed by
/// [`remove_strong_ff_connections`].
pub fn modified_standard_interpolation_pass2<T: RealScalar>(
    n_nodes: usize,
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
    c_row_ptr: &[usize],
    c_col_ind: &[usize],
    c_values: &[T],
    splitting: &[NodeTag],
    p_row_ptr: &[usize],
    p_col_ind: &mut [usize],
    p_values: &mut [T],
) {
    standard_pass2_impl(
        n_nodes, a_row_ptr, a_col_ind, a_values, c_row_ptr, c_col_ind, c_values, splitting,
        p_row_ptr, p_col_ind, p_values, true,
    );
}

/// Zero out strong F-F connections without a common strong C-neighbor
///
/// For every F-row, each strong F-neighbor j is kept only if the two rows
/// share at least one strong C-point. The sparsity pattern of C is
/// untouched; removed connections become explicit zeros, which the
/// interpolation passes treat as sentinels rather than dropping.
pub fn remove_strong_ff_connections<T: RealScalar>(
    n_nodes: usize,
    c_row_ptr: &[usize],
    c_col_ind: &[usize],
    c_values: &mut [T],
    splitting: &[NodeTag],
) {
    debug_validate_pattern(n_nodes, n_nodes, c_row_ptr, c_col_ind);
    debug_assert_eq!(splitting.len(), n_nodes);

    for row in 0..n_nodes {
        if !splitting[row].is_fine() {
            continue;
        }
        for jj in c_row_ptr[row]..c_row_ptr[row + 1] {
            let j = c_col_ind[jj];
            if !splitting[j].is_fine() {
                continue;
            }

            // Do rows `row` and `j` share a strong C-point?
            let mut dependence = false;
            'search: for ii in c_row_ptr[row]..c_row_ptr[row + 1] {
                let row_ind = c_col_ind[ii];
                if splitting[row_ind].is_coarse() {
                    for kk in c_row_ptr[j]..c_row_ptr[j + 1] {
                        if c_col_ind[kk] == row_ind {
                            dependence = true;
                            break 'search;
                        }
                    }
                }
            }

            if !dependence {
                c_values[jj] = T::ZERO;
            }
        }
    }
}
