//! Classical Ruge-Stüben coarse grid selection
//!
//! Nodes are picked in descending order of their measure λ (the number of
//! nodes they strongly influence, i.e. the size of their row in Sᵀ). A
//! selected node becomes coarse, everything it influences becomes fine, and
//! the measures of the remaining unassigned nodes are updated. The λ values
//! are kept in a bucket structure over a pair of mutually inverse
//! permutations, so every priority update is O(1) without a heap.

use crate::csr::{NodeTag, debug_validate_pattern};

/// Bucket priority queue over node measures
///
/// `index_to_node` holds all nodes grouped by λ value in contiguous
/// intervals; `node_to_index` is its inverse. For every λ the interval
/// `interval_ptr[λ] .. interval_ptr[λ] + interval_count[λ]` covers exactly
/// the unassigned nodes with that measure. Moving a node between adjacent
/// buckets is a swap with one end of its interval plus boundary adjustments.
struct BucketQueue {
    lambda: Vec<usize>,
    interval_ptr: Vec<usize>,
    interval_count: Vec<usize>,
    index_to_node: Vec<usize>,
    node_to_index: Vec<usize>,
}

impl BucketQueue {
    fn new(lambda: Vec<usize>) -> Self {
        let n = lambda.len();
        let mut interval_ptr = vec![0usize; n + 1];
        let mut interval_count = vec![0usize; n + 1];
        let mut index_to_node = vec![0usize; n];
        let mut node_to_index = vec![0usize; n];

        for &l in &lambda {
            interval_count[l] += 1;
        }
        let mut cumsum = 0;
        for i in 0..n {
            interval_ptr[i] = cumsum;
            cumsum += interval_count[i];
            interval_count[i] = 0;
        }
        for (i, &l) in lambda.iter().enumerate() {
            let index = interval_ptr[l] + interval_count[l];
            index_to_node[index] = i;
            node_to_index[i] = index;
            interval_count[l] += 1;
        }

        Self {
            lambda,
            interval_ptr,
            interval_count,
            index_to_node,
            node_to_index,
        }
    }

    /// Move node `k` from its bucket into the next-higher one
    ///
    /// `k` swaps with the rightmost node of its interval, which then becomes
    /// the leftmost slot of bucket λ+1.
    fn increment(&mut self, k: usize) {
        let lambda_k = self.lambda[k];
        let old_pos = self.node_to_index[k];
        let new_pos = self.interval_ptr[lambda_k] + self.interval_count[lambda_k] - 1;

        self.node_to_index[self.index_to_node[old_pos]] = new_pos;
        self.node_to_index[self.index_to_node[new_pos]] = old_pos;
        self.index_to_node.swap(old_pos, new_pos);

        self.interval_count[lambda_k] -= 1;
        self.interval_count[lambda_k + 1] += 1;
        self.interval_ptr[lambda_k + 1] = new_pos;

        self.lambda[k] += 1;
    }

    /// Move node `j` from its bucket into the next-lower one
    ///
    /// `j` swaps with the leftmost node of its interval, which then becomes
    /// the rightmost slot of bucket λ−1.
    fn decrement(&mut self, j: usize) {
        let lambda_j = self.lambda[j];
        let old_pos = self.node_to_index[j];
        let new_pos = self.interval_ptr[lambda_j];

        self.node_to_index[self.index_to_node[old_pos]] = new_pos;
        self.node_to_index[self.index_to_node[new_pos]] = old_pos;
        self.index_to_node.swap(old_pos, new_pos);

        self.interval_count[lambda_j] -= 1;
        self.interval_count[lambda_j - 1] += 1;
        self.interval_ptr[lambda_j] += 1;
        self.interval_ptr[lambda_j - 1] =
            self.interval_ptr[lambda_j] - self.interval_count[lambda_j - 1];

        self.lambda[j] -= 1;
    }
}

/// Ruge-Stüben C/F splitting from a strength matrix S and its transpose
///
/// `s_*` is the strength pattern (row i lists the nodes influencing i) and
/// `t_*` its transpose (row i lists the nodes i influences). On return every
/// entry of `splitting` is [`NodeTag::Coarse`] or [`NodeTag::Fine`].
///
/// Nodes that influence nothing (empty or self-only Sᵀ row) are fine from
/// the start. Ties in λ are broken by bucket position, which this
/// implementation fixes as the counting-sort insertion order (ascending node
/// index), so the result is deterministic for a given input.
pub fn rs_cf_splitting(
    n_nodes: usize,
    s_row_ptr: &[usize],
    s_col_ind: &[usize],
    t_row_ptr: &[usize],
    t_col_ind: &[usize],
    splitting: &mut [NodeTag],
) {
    debug_validate_pattern(n_nodes, n_nodes, s_row_ptr, s_col_ind);
    debug_validate_pattern(n_nodes, n_nodes, t_row_ptr, t_col_ind);
    debug_assert_eq!(splitting.len(), n_nodes);

    let lambda: Vec<usize> = (0..n_nodes)
        .map(|i| t_row_ptr[i + 1] - t_row_ptr[i])
        .collect();

    // Nodes influencing nobody can never be selected
    for i in 0..n_nodes {
        splitting[i] =
            if lambda[i] == 0 || (lambda[i] == 1 && t_col_ind[t_row_ptr[i]] == i) {
                NodeTag::Fine
            } else {
                NodeTag::Unassigned
            };
    }

    let mut buckets = BucketQueue::new(lambda);

    // Visit nodes in descending order of lambda
    for top_index in (0..n_nodes).rev() {
        let i = buckets.index_to_node[top_index];
        let lambda_i = buckets.lambda[i];

        // i leaves its interval whether or not it gets selected
        buckets.interval_count[lambda_i] -= 1;

        if splitting[i] == NodeTag::Fine {
            continue;
        }
        debug_assert_eq!(splitting[i], NodeTag::Unassigned);
        splitting[i] = NodeTag::Coarse;

        // Everything i influences becomes fine, and the influencers of those
        // new F-nodes gain a measure point each
        for jj in t_row_ptr[i]..t_row_ptr[i + 1] {
            let j = t_col_ind[jj];
            if splitting[j] != NodeTag::Unassigned {
                continue;
            }
            splitting[j] = NodeTag::Fine;

            for kk in s_row_ptr[j]..s_row_ptr[j + 1] {
                let k = s_col_ind[kk];
                if splitting[k] == NodeTag::Unassigned {
                    // lambda is capped; a node this influential gets picked soon anyway
                    if buckets.lambda[k] >= n_nodes - 1 {
                        continue;
                    }
                    buckets.increment(k);
                }
            }
        }

        // Unassigned nodes influencing i lose a measure point
        for jj in s_row_ptr[i]..s_row_ptr[i + 1] {
            let j = s_col_ind[jj];
            if splitting[j] == NodeTag::Unassigned && buckets.lambda[j] > 0 {
                buckets.decrement(j);
            }
        }
    }
}
