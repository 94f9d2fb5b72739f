//! C/F splitting of the strength graph
//!
//! Three ways to classify nodes as coarse or fine:
//!
//! - [`rs_cf_splitting`]: the classical Ruge-Stüben selection, driven by a
//!   bucket priority queue over influence counts.
//! - [`cljp_naive_splitting`]: CLJP rounds of independent-set selection over
//!   node weights, with edge-mark bookkeeping.
//! - [`cr_helper`]: one compatible-relaxation step that promotes F-points to
//!   C based on a relaxed error vector.
//!
//! All three fill a caller-allocated `&mut [NodeTag]` in which only
//! [`NodeTag::Fine`] and [`NodeTag::Coarse`] remain on return.

mod cljp;
mod compatible_relaxation;
mod ruge_stuben;

pub use cljp::cljp_naive_splitting;
pub use compatible_relaxation::cr_helper;
pub use ruge_stuben::rs_cf_splitting;
