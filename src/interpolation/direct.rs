//! Direct interpolation
//!
//! The cheapest classical prolongator: an F-point interpolates from its
//! strong C-neighbors alone, with the weak and strong-F couplings collapsed
//! onto the strong C-set by the ratio of full-row to strong-row sums,
//! separately for the negative and positive parts.

use crate::csr::{NodeTag, debug_validate_pattern};
use crate::interpolation::map_to_coarse_indices;
use crate::scalar::RealScalar;

/// Fill the columns and weights of the direct-interpolation prolongator
///
/// `p_row_ptr` comes from
/// [`classical_interpolation_pass1`](crate::interpolation::classical_interpolation_pass1)
/// over the strength matrix S. A C-row receives the single entry 1 at its
/// own coarse index; an F-row i receives, for each strong C-neighbor j,
///
/// ```text
/// P[i,j] = -(A⁻/S⁻) S[i,j] / a_ii   (S[i,j] < 0)
/// P[i,j] = -(A⁺/S⁺) S[i,j] / a_ii   (S[i,j] ≥ 0)
/// ```
///
/// where A±/S± are the positive/negative off-diagonal sums over the full row
/// of A and over the strong C-entries of S. When S⁺ is zero the positive
/// couplings are folded into the diagonal instead. Column indices are
/// rewritten to coarse numbering before returning.
pub fn direct_interpolation_pass2<T: RealScalar>(
    n_nodes: usize,
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    a_values: &[T],
    s_row_ptr: &[usize],
    s_col_ind: &[usize],
    s_values: &[T],
    splitting: &[NodeTag],
    p_row_ptr: &[usize],
    p_col_ind: &mut [usize],
    p_values: &mut [T],
) {
    debug_validate_pattern(n_nodes, n_nodes, a_row_ptr, a_col_ind);
    debug_validate_pattern(n_nodes, n_nodes, s_row_ptr, s_col_ind);
    debug_assert_eq!(splitting.len(), n_nodes);
    debug_assert_eq!(p_row_ptr.len(), n_nodes + 1);
    debug_assert!(p_col_ind.len() >= p_row_ptr[n_nodes]);
    debug_assert!(p_values.len() >= p_row_ptr[n_nodes]);

    for i in 0..n_nodes {
        if splitting[i].is_coarse() {
            p_col_ind[p_row_ptr[i]] = i;
            p_values[p_row_ptr[i]] = T::ONE;
            continue;
        }

        let mut sum_strong_pos = T::ZERO;
        let mut sum_strong_neg = T::ZERO;
        for jj in s_row_ptr[i]..s_row_ptr[i + 1] {
            if splitting[s_col_ind[jj]].is_coarse() && s_col_ind[jj] != i {
                if s_values[jj] < T::ZERO {
                    sum_strong_neg += s_values[jj];
                } else {
                    sum_strong_pos += s_values[jj];
                }
            }
        }

        let mut sum_all_pos = T::ZERO;
        let mut sum_all_neg = T::ZERO;
        let mut diag = T::ZERO;
        for jj in a_row_ptr[i]..a_row_ptr[i + 1] {
            if a_col_ind[jj] == i {
                diag += a_values[jj];
            } else if a_values[jj] < T::ZERO {
                sum_all_neg += a_values[jj];
            } else {
                sum_all_pos += a_values[jj];
            }
        }

        let alpha = sum_all_neg / sum_strong_neg;
        let mut beta = sum_all_pos / sum_strong_pos;

        if sum_strong_pos == T::ZERO {
            diag += sum_all_pos;
            beta = T::ZERO;
        }

        let neg_coeff = -alpha / diag;
        let pos_coeff = -beta / diag;

        let mut nnz = p_row_ptr[i];
        for jj in s_row_ptr[i]..s_row_ptr[i + 1] {
            if splitting[s_col_ind[jj]].is_coarse() && s_col_ind[jj] != i {
                p_col_ind[nnz] = s_col_ind[jj];
                p_values[nnz] = if s_values[jj] < T::ZERO {
                    neg_coeff * s_values[jj]
                } else {
                    pos_coeff * s_values[jj]
                };
                nnz += 1;
            }
        }
    }

    map_to_coarse_indices(n_nodes, splitting, &mut p_col_ind[..p_row_ptr[n_nodes]]);
}
