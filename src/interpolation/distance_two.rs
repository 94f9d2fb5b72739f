//! Extended and extended+i distance-two interpolation
//!
//! An F-point i may interpolate from C-points two strength-edges away: the
//! strong C-neighbors of its strong F-neighbors. Every a_kj that flows into
//! a weight is sign-filtered against the diagonal a_kk, and the inner
//! normalization runs over the full distance-one plus distance-two strong
//! C-set of i. The +i variant additionally folds each F-neighbor's coupling
//! back to i (a_ki) into the inner sums and the row denominator.

use crate::csr::{NodeTag, debug_validate_pattern};
use crate::interpolation::map_to_coarse_indices;
use crate::scalar::RealScalar;

/// Magnitudes below this are treated as numerically zero
const ZERO_TOL: f64 = 1e-16;

/// Borrowed view of the inputs shared by every helper of one pass-2 call
struct DistanceTwoCtx<'a, T> {
    a_row_ptr: &'a [usize],
    a_col_ind: &'a [usize],
    a_values: &'a [T],
    c_row_ptr: &'a [usize],
    c_col_ind: &'a [usize],
    c_values: &'a [T],
    splitting: &'a [NodeTag],
    plus_i: bool,
}

impl<T: RealScalar> DistanceTwoCtx<'_, T> {
    /// Entry (row, col) of A, zero if not stored (linear scan, rows unsorted)
    fn find_a(&self, row: usize, col: usize) -> T {
        for jj in self.a_row_ptr[row]..self.a_row_ptr[row + 1] {
            if self.a_col_ind[jj] == col {
                return self.a_values[jj];
            }
        }
        T::ZERO
    }

    /// a_kl zeroed when its sign matches the diagonal a_kk
    fn sign_filtered(&self, a_kl: T, a_kk: T) -> T {
        if a_kl.signof() == a_kk.signof() {
            T::ZERO
        } else {
            a_kl
        }
    }

    /// Sign-filtered sum of row k's couplings to the distance-one and
    /// distance-two strong C-neighbors of i; the +i variant also folds in
    /// the filtered coupling a_ki
    fn inner_denominator(&self, i: usize, k: usize, a_kk: T) -> T {
        let mut inner = T::ZERO;
        for ll in self.c_row_ptr[i]..self.c_row_ptr[i + 1] {
            let this_point = self.c_col_ind[ll];
            if self.splitting[this_point].is_coarse() {
                inner += self.sign_filtered(self.find_a(k, this_point), a_kk);
            } else if this_point != i {
                for ff in self.c_row_ptr[this_point]..self.c_row_ptr[this_point + 1] {
                    let d2_point = self.c_col_ind[ff];
                    if self.splitting[d2_point].is_coarse() {
                        inner += self.sign_filtered(self.find_a(k, d2_point), a_kk);
                    }
                }
            }
        }
        if self.plus_i {
            inner += self.sign_filtered(self.find_a(k, i), a_kk);
        }
        inner
    }

    /// Interpolation weight numerator for F-row i and coarse target column
    ///
    /// Starts from the direct coupling `seed` and folds in every strong
    /// F-neighbor k of i whose filtered coupling to the target survives.
    fn weight_numerator(&self, i: usize, target: usize, seed: T) -> T {
        let mut numerator = seed;
        for kk in self.c_row_ptr[i]..self.c_row_ptr[i + 1] {
            let k = self.c_col_ind[kk];
            if self.splitting[k] != NodeTag::Fine || k == i {
                continue;
            }
            let a_ik = self.c_values[kk];

            let mut a_kj = T::ZERO;
            let mut a_kk = T::ZERO;
            for search_ind in self.a_row_ptr[k]..self.a_row_ptr[k + 1] {
                if self.a_col_ind[search_ind] == target {
                    a_kj = self.a_values[search_ind];
                } else if self.a_col_ind[search_ind] == k {
                    a_kk = self.a_values[search_ind];
                }
            }
            a_kj = self.sign_filtered(a_kj, a_kk);
            if a_kj.magnitude() <= ZERO_TOL {
                continue;
            }

            let inner = self.inner_denominator(i, k, a_kk);
            if inner.magnitude() < ZERO_TOL {
                tracing::warn!(row = i, neighbor = k, "inner interpolation denominator is zero");
            }
            numerator += a_ik * a_kj / inner;
        }
        numerator
    }

    /// Row denominator: a_ii plus the couplings that interpolate nowhere
    ///
    /// Full row sum of A, minus the strong C-neighbors of i, minus the
    /// distance-two strong C-points reachable through strong F-neighbors
    /// (looked up in row i of A). The +i variant adds each F-neighbor's
    /// round trip a_ik a_ki over its inner normalization.
    fn row_denominator(&self, i: usize) -> T {
        let mut denominator = T::ZERO;
        for mm in self.a_row_ptr[i]..self.a_row_ptr[i + 1] {
            denominator += self.a_values[mm];
        }
        for mm in self.c_row_ptr[i]..self.c_row_ptr[i + 1] {
            let this_point = self.c_col_ind[mm];
            if this_point != i {
                denominator -= self.c_values[mm];
            }
            if self.splitting[this_point].is_fine() && this_point != i {
                for ff in self.c_row_ptr[this_point]..self.c_row_ptr[this_point + 1] {
                    let d2_point = self.c_col_ind[ff];
                    if self.splitting[d2_point].is_coarse() {
                        denominator -= self.find_a(i, d2_point);
                    }
                }
            }
        }

        if self.plus_i {
            for kk in self.c_row_ptr[i]..self.c_row_ptr[i + 1] {
                let k = self.c_col_ind[kk];
                if self.splitting[k] != NodeTag::Fine || k == i {
                    continue;
                }
                let a_ik = self.c_values[kk];

                let mut a_ki = T::ZERO;
                let mut a_kk = T::ZERO;
                for search_ind in self.a_row_ptr[k]..self.a_row_ptr[k + 1] {
                    if self.a_col_ind[search_ind] == i {
                        a_ki = self.a_values[search_ind];
                    } else if self.a_col_ind[search_ind] == k {
                        a_kk = self.a_values[search_ind];
                    }
                }
                a_ki = self.sign_filtered(a_ki, a_kk);
                if a_ki.magnitude() <= ZERO_TOL {
                    continue;
                }

                let inner = self.inner_denominator(i, k, a_kk);
                if inner.magnitude() < ZERO_TOL {
                    tracing::warn!(
                        row = i,
                        neighbor = k,
                        "inner denominator of the row denominator is zero"
                    );
                }
                denominator += a_ik * a_ki / inner;
            }
        }

        denominator
    }
}

fn distance_two_pass2_impl<T: RealScalar>(
    n_nodes: usize,
    ctx: &DistanceTwoCtx<'_, T>,
    p_row_ptr: &[usize],
    p_col_ind: &mut [usize],
    p_values: &mut [T],
) {
    for i in 0..n_nodes {
        if ctx.splitting[i].is_coarse() {
            p_col_ind[p_row_ptr[i]] = i;
            p_values[p_row_ptr[i]] = T::ONE;
            continue;
        }

        let denominator = ctx.row_denominator(i);
        if denominator.magnitude() < ZERO_TOL {
            tracing::warn!(row = i, "interpolation denominator is zero");
        }

        let mut nnz = p_row_ptr[i];
        for jj in ctx.c_row_ptr[i]..ctx.c_row_ptr[i + 1] {
            let neighbor = ctx.c_col_ind[jj];
            if ctx.splitting[neighbor].is_coarse() {
                // Distance-one coarse target; the direct coupling seeds the weight
                p_col_ind[nnz] = neighbor;
                let numerator = ctx.weight_numerator(i, neighbor, ctx.c_values[jj]);
                p_values[nnz] = -numerator / denominator;
                nnz += 1;
            } else if neighbor != i {
                // Distance-two coarse targets through a strong F-neighbor;
                // the seed coupling must be looked up in A (it may be weak)
                for dd in ctx.c_row_ptr[neighbor]..ctx.c_row_ptr[neighbor + 1] {
                    let neighbor2 = ctx.c_col_ind[dd];
                    if !ctx.splitting[neighbor2].is_coarse() {
                        continue;
                    }
                    p_col_ind[nnz] = neighbor2;
                    let seed = ctx.find_a(i, neighbor2);
                    let numerator = ctx.weight_numerator(i, neighbor2, seed);
                    p_values[nnz] = -numerator / denominator;
                    nnz += 1;
                }
            }
        }
    }

    map_to_coarse_indices(n_nodes, ctx.splitting, &mut p_col_ind[..p_row_ptr[n_nodes]]);
}

/// Fill the columns and weights of the extended distance-two prolongator
///
/// `c_*` is the strength pattern of S carrying the values of A and
/// `p_row_ptr` comes from
/// [`distance_two_interpolation_pass1`](crate::interpolation::distance_two_interpolation_pass1).
/// Column indices are rewritten to coarse numbering before returning.
pub fn extended_interpolation_pass2<T: RealScalar>(
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
    debug_validate_pattern(n_nodes, n_nodes, a_row_ptr, a_col_ind);
    debug_validate_pattern(n_nodes, n_nodes, c_row_ptr, c_col_ind);
    debug_assert_eq!(splitting.len(), n_nodes);
    debug_assert_eq!(p_row_ptr.len(), n_nodes + 1);

    let ctx = DistanceTwoCtx {
        a_row_ptr,
        a_col_ind,
        a_values,
        c_row_ptr,
        c_col_ind,
        c_values,
        splitting,
        plus_i: false,
    };
    distance_two_pass2_impl(n_nodes, &ctx, p_row_ptr, p_col_ind, p_values);
}

/// Extended interpolation including the connections back to the F-point
///
/// The +i refinement of [`extended_interpolation_pass2`]: each strong
/// F-neighbor's coupling a_ki to the row's own F-point enters the inner
/// normalizations and the row denominator.
pub fn extended_plusi_interpolation_pass2<T: RealScalar>(
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
    debug_validate_pattern(n_nodes, n_nodes, a_row_ptr, a_col_ind);
    debug_validate_pattern(n_nodes, n_nodes, c_row_ptr, c_col_ind);
    debug_assert_eq!(splitting.len(), n_nodes);
    debug_assert_eq!(p_row_ptr.len(), n_nodes + 1);

    let ctx = DistanceTwoCtx {
        a_row_ptr,
        a_col_ind,
        a_values,
        c_row_ptr,
        c_col_ind,
        c_values,
        splitting,
        plus_i: true,
    };
    distance_two_pass2_impl(n_nodes, &ctx, p_row_ptr, p_col_ind, p_values);
}
