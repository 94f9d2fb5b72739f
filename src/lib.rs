//! # amgr
//!
//! **Classical Ruge-Stüben AMG coarsening and interpolation kernels.**
//!
//! amgr is the numerical core of a classical algebraic multigrid setup
//! phase. Given a sparse operator A in CSR form it computes, in order:
//!
//! 1. A **strength-of-connection** matrix S ([`strength`]).
//! 2. A **C/F splitting** of the nodes over S ([`splitting`]).
//! 3. A **prolongation operator** P mapping coarse-grid vectors to
//!    fine-grid vectors ([`interpolation`]).
//!
//! The surrounding multigrid machinery — hierarchy driver, smoothers, cycle
//! orchestration, matrix I/O — is the caller's business: every kernel here
//! is a pure, single-threaded transformation of caller-allocated CSR
//! buffers (`row_ptr`, `col_ind`, `values` triples), with scratch memory
//! whose lifetime is exactly one call.
//!
//! ## Conventions
//!
//! - Column indices within a CSR row need not be sorted; kernels that look
//!   up a specific column scan the row linearly.
//! - The strength matrix S always retains the diagonal of A; entry (i,j)
//!   of S means j strongly influences i, so row i of Sᵀ lists the nodes i
//!   influences.
//! - Splittings use [`NodeTag`]: `Fine = 0`, `Coarse = 1`, with
//!   `Unassigned` appearing only inside the splitting algorithms.
//! - Interpolation runs in two passes: pass one sizes P's rows, the caller
//!   allocates `p_row_ptr[n]` entries, pass two fills them and re-indexes
//!   columns to the coarse grid.
//!
//! ## Quick Start
//!
//! ```rust
//! use amgr::prelude::*;
//!
//! // 1D Laplacian, tridiag(-1, 2, -1), n = 5
//! let a = CsrMatrix::new(
//!     5,
//!     5,
//!     vec![0, 2, 5, 8, 11, 13],
//!     vec![0, 1, 0, 1, 2, 1, 2, 3, 2, 3, 4, 3, 4],
//!     vec![2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0],
//! )?;
//!
//! // strength of connection
//! let n = a.n_rows();
//! let mut sp = vec![0; n + 1];
//! let mut sj = vec![0; a.nnz()];
//! let mut sx = vec![0.0; a.nnz()];
//! classical_strength_of_connection_abs(
//!     n, 0.25, a.row_ptr(), a.col_ind(), a.values(), &mut sp, &mut sj, &mut sx,
//! );
//! let nnz = sp[n];
//! sj.truncate(nnz);
//! sx.truncate(nnz);
//! let s = CsrMatrix::new(n, n, sp, sj, sx)?;
//!
//! // C/F splitting
//! let t = s.transpose();
//! let mut splitting = vec![NodeTag::Unassigned; n];
//! rs_cf_splitting(n, s.row_ptr(), s.col_ind(), t.row_ptr(), t.col_ind(), &mut splitting);
//!
//! // prolongation
//! let mut p_row_ptr = vec![0; n + 1];
//! classical_interpolation_pass1(n, s.row_ptr(), s.col_ind(), &splitting, &mut p_row_ptr);
//! let mut p_col_ind = vec![0; p_row_ptr[n]];
//! let mut p_values = vec![0.0; p_row_ptr[n]];
//! direct_interpolation_pass2(
//!     n,
//!     a.row_ptr(), a.col_ind(), a.values(),
//!     s.row_ptr(), s.col_ind(), s.values(),
//!     &splitting, &p_row_ptr, &mut p_col_ind, &mut p_values,
//! );
//! # Ok::<(), amgr::error::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod csr;
pub mod error;
pub mod graph;
pub mod interpolation;
pub mod scalar;
pub mod splitting;
pub mod strength;

pub use csr::{CsrMatrix, NodeTag};
pub use error::{Error, Result};
pub use scalar::{RealScalar, Scalar};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::csr::{CsrMatrix, NodeTag};
    pub use crate::error::{Error, Result};
    pub use crate::graph::{maximal_independent_set_serial, vertex_coloring_mis};
    pub use crate::interpolation::{
        classical_interpolation_pass1, direct_interpolation_pass2,
        distance_two_interpolation_pass1, extended_interpolation_pass2,
        extended_plusi_interpolation_pass2, modified_standard_interpolation_pass2,
        remove_strong_ff_connections, standard_interpolation_pass2,
    };
    pub use crate::scalar::{RealScalar, Scalar};
    pub use crate::splitting::{cljp_naive_splitting, cr_helper, rs_cf_splitting};
    pub use crate::strength::{
        classical_strength_of_connection_abs, classical_strength_of_connection_min,
        maximum_row_value,
    };
}
