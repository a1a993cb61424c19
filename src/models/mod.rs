//! Domain model types.
//!
//! A [`Tour`] is a node permutation with its cached cost; a [`Population`]
//! keeps tours in ascending cost order with cost-based duplicate
//! suppression.

mod population;
mod tour;

pub use population::{max_population, FillOutcome, Population};
pub use tour::{validate_permutation, Tour};
