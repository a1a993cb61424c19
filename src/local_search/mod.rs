//! Local search operators for improving tours.
//!
//! - [`two_opt`] — Edge-reversal 2-opt on a closed tour

mod two_opt;

pub use two_opt::{two_opt_improve, two_opt_improve_with_limit, MAX_TWO_OPT_PASSES};
