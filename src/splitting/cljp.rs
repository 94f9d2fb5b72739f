//! CLJP splitting (Cleary-Luby-Jones-Plassmann)
//!
//! Splitting by rounds of independent-set selection: every unassigned node
//! whose weight beats all of its unassigned neighbors in S and Sᵀ becomes
//! coarse, then the weights of the nodes coupled to the new C-points are
//! decremented along still-marked edges (heuristics P5 and P6 of the CLJP
//! scheme). A node whose weight drops below one can no longer become a
//! useful C-point and is made fine.
//!
//! Weights are a fractional base plus the number of nodes the node strongly
//! influences. The base either comes from a graph coloring of S (each color
//! normalized by the color count, deterministic) or from a pseudo-random
//! generator seeded per call with a fixed constant, so both modes are
//! reproducible run to run.
//!
//! "Naive" because the caller must supply the transpose of S explicitly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::csr::{NodeTag, debug_validate_pattern};
use crate::graph::vertex_coloring_mis;

/// Fixed seed for the random weight base
const WEIGHT_SEED: u64 = 2448422;

/// CLJP C/F splitting from a strength matrix S and its transpose
///
/// `use_coloring` selects the weight base: graph-coloring driven when true,
/// seeded-random otherwise. On return every entry of `splitting` is
/// [`NodeTag::Coarse`] or [`NodeTag::Fine`].
pub fn cljp_naive_splitting(
    n: usize,
    s_row_ptr: &[usize],
    s_col_ind: &[usize],
    t_row_ptr: &[usize],
    t_col_ind: &[usize],
    splitting: &mut [NodeTag],
    use_coloring: bool,
) {
    debug_validate_pattern(n, n, s_row_ptr, s_col_ind);
    debug_validate_pattern(n, n, t_row_ptr, t_col_ind);
    debug_assert_eq!(splitting.len(), n);

    let nnz = s_row_ptr[n];
    let mut edgemark = vec![true; nnz];
    let mut weight = vec![0.0f64; n];
    let mut selected = vec![false; n];
    let mut selected_list: Vec<usize> = Vec::with_capacity(n);
    // last C-point each node was seen depending on, for the P6 test
    let mut c_dep_cache = vec![usize::MAX; n];

    splitting.fill(NodeTag::Unassigned);

    if use_coloring {
        let mut coloring = vec![0usize; n];
        let ncolors = vertex_coloring_mis(n, s_row_ptr, s_col_ind, &mut coloring);
        for i in 0..n {
            weight[i] = coloring[i] as f64 / ncolors as f64;
        }
    } else {
        let mut rng = StdRng::seed_from_u64(WEIGHT_SEED);
        for w in weight.iter_mut() {
            *w = rng.random::<f64>();
        }
    }

    // Add the influence count: one per node this column strongly influences
    for i in 0..n {
        for jj in s_row_ptr[i]..s_row_ptr[i + 1] {
            let j = s_col_ind[jj];
            if i != j {
                weight[j] += 1.0;
            }
        }
    }

    let mut unassigned = n;
    let mut pass = 0u32;
    while unassigned > 0 {
        pass += 1;

        // Select the independent set: unassigned nodes whose weight is
        // strictly greater than every unassigned neighbor in S and Sᵀ
        selected_list.clear();
        for i in 0..n {
            if splitting[i] != NodeTag::Unassigned {
                selected[i] = false;
                continue;
            }
            selected[i] = true;
            for jj in s_row_ptr[i]..s_row_ptr[i + 1] {
                let j = s_col_ind[jj];
                if splitting[j] == NodeTag::Unassigned && weight[j] > weight[i] {
                    selected[i] = false;
                    break;
                }
            }
            if selected[i] {
                for jj in t_row_ptr[i]..t_row_ptr[i + 1] {
                    let j = t_col_ind[jj];
                    if splitting[j] == NodeTag::Unassigned && weight[j] > weight[i] {
                        selected[i] = false;
                        break;
                    }
                }
            }
            if selected[i] {
                selected_list.push(i);
                unassigned -= 1;
            }
        }
        for &c in &selected_list {
            splitting[c] = NodeTag::Coarse;
        }
        tracing::trace!(
            pass,
            selected = selected_list.len(),
            unassigned,
            "cljp selection round"
        );

        // P5: neighbors that influence new C-points lose value as C-points
        for &c in &selected_list {
            for jj in s_row_ptr[c]..s_row_ptr[c + 1] {
                let j = s_col_ind[jj];
                // c <--- j
                if splitting[j] == NodeTag::Unassigned && edgemark[jj] {
                    edgemark[jj] = false;
                    weight[j] -= 1.0;
                    if weight[j] < 1.0 {
                        splitting[j] = NodeTag::Fine;
                        unassigned -= 1;
                    }
                }
            }
        }

        // P6: if k and j both depend on a new C-point c and k influences j,
        // k is less valuable as a C-point
        for &c in &selected_list {
            for jj in t_row_ptr[c]..t_row_ptr[c + 1] {
                let j = t_col_ind[jj];
                // j <--- c
                if splitting[j] == NodeTag::Unassigned {
                    c_dep_cache[j] = c;
                }
            }

            for jj in t_row_ptr[c]..t_row_ptr[c + 1] {
                let j = t_col_ind[jj];
                for kk in s_row_ptr[j]..s_row_ptr[j + 1] {
                    let k = s_col_ind[kk];
                    // j <--- k, and c ---> k?
                    if splitting[k] == NodeTag::Unassigned
                        && edgemark[kk]
                        && c_dep_cache[k] == c
                    {
                        edgemark[kk] = false;
                        weight[k] -= 1.0;
                        if weight[k] < 1.0 {
                            splitting[k] = NodeTag::Fine;
                            unassigned -= 1;
                        }
                    }
                }
            }
        }
    }

    for tag in splitting.iter_mut() {
        if *tag == NodeTag::Unassigned {
            *tag = NodeTag::Fine;
        }
    }
}
