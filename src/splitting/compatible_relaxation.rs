//! Compatible relaxation splitting update
//!
//! One step of the compatible-relaxation coarsening loop: given a relaxed
//! error vector `e` and a target near-null-space vector `b`, measure how
//! badly relaxation treats each F-point, collect the poorly-relaxed ones as
//! coarse-grid candidates, and promote an independent set of them to
//! C-points.
//!
//! The caller keeps the current F/C membership packed in `indices`:
//! `indices[0]` is the number of F-points nf, positions `1..nf+1` hold the
//! F-point indices and positions `nf+1..n+1` the C-point indices. The array
//! is rewritten on return (F ascending from position 1, C descending from
//! position n).

use crate::csr::{NodeTag, debug_validate_pattern};
use crate::scalar::RealScalar;

/// Augment a splitting with new C-points chosen by compatible relaxation
///
/// `e` is overwritten with the scaled error magnitudes, `gamma` with the
/// candidate-set measure (zeroed for promoted points), and `splitting` and
/// `indices` with the updated membership. `theta_cs` is the candidate
/// threshold on the normalized measure.
pub fn cr_helper<T: RealScalar>(
    a_row_ptr: &[usize],
    a_col_ind: &[usize],
    b: &[T],
    e: &mut [T],
    indices: &mut [usize],
    splitting: &mut [NodeTag],
    gamma: &mut [T],
    theta_cs: T,
) {
    let n = splitting.len();
    debug_validate_pattern(n, n, a_row_ptr, a_col_ind);
    debug_assert_eq!(b.len(), n);
    debug_assert_eq!(e.len(), n);
    debug_assert_eq!(gamma.len(), n);
    debug_assert_eq!(indices.len(), n + 1);

    let num_fpts = indices[0];

    // Scale the error against the target vector and take the sup norm
    let mut inf_norm = T::ZERO;
    for i in 1..(num_fpts + 1) {
        let pt = indices[i];
        e[pt] = (e[pt] / b[pt]).abs();
        if e[pt] > inf_norm {
            inf_norm = e[pt];
        }
    }

    // Candidate set: F-points whose normalized measure exceeds the threshold
    let mut candidates: Vec<usize> = Vec::new();
    for i in 1..(num_fpts + 1) {
        let pt = indices[i];
        gamma[pt] = e[pt] / inf_norm;
        if gamma[pt] > theta_cs {
            candidates.push(pt);
        }
    }

    // Weights: omega_i = |N_i ∩ F| + gamma_i
    let mut omega = vec![T::ZERO; n];
    for &pt in &candidates {
        let mut num_neighbors = 0usize;
        for jj in a_row_ptr[pt]..a_row_ptr[pt + 1] {
            if splitting[a_col_ind[jj]] == NodeTag::Fine {
                num_neighbors += 1;
            }
        }
        omega[pt] = T::from_f64(num_neighbors as f64) + gamma[pt];
    }

    // Greedy maximum independent set over the candidate weights
    loop {
        // Promote the candidate with the greatest positive weight; ties keep
        // the first one seen
        let mut max_weight = T::ZERO;
        let mut new_pt = None;
        for &pt in &candidates {
            if omega[pt] > max_weight {
                max_weight = omega[pt];
                new_pt = Some(pt);
            }
        }
        let Some(new_pt) = new_pt else {
            break;
        };
        splitting[new_pt] = NodeTag::Coarse;
        gamma[new_pt] = T::ZERO;

        // Knock every neighbor of the new C-point out of the candidate set
        let mut neighbors: Vec<usize> = Vec::new();
        for jj in a_row_ptr[new_pt]..a_row_ptr[new_pt + 1] {
            let neighbor = a_col_ind[jj];
            neighbors.push(neighbor);
            omega[neighbor] = T::ZERO;
        }

        // Each removal makes the remaining candidates around it more attractive
        for &pt in &neighbors {
            for jj in a_row_ptr[pt]..a_row_ptr[pt + 1] {
                let far = a_col_ind[jj];
                if omega[far] != T::ZERO {
                    omega[far] += T::ONE;
                }
            }
        }
    }

    // Repack indices: count, then F ascending, C descending from the back
    let mut num_fpts = 0;
    let mut next_find = 1;
    let mut next_cind = n;
    for i in 0..n {
        if splitting[i] == NodeTag::Fine {
            indices[next_find] = i;
            next_find += 1;
            num_fpts += 1;
        } else {
            indices[next_cind] = i;
            next_cind -= 1;
        }
    }
    indices[0] = num_fpts;
}
