//! # u-tsp-memetic
//!
//! Memetic genetic algorithm for the symmetric Traveling Salesman Problem
//! on 2D coordinates.
//!
//! ## Modules
//!
//! - [`distance`] — Rounded Euclidean distance matrix and sorted neighbor lists
//! - [`constructive`] — Nearest-neighbor construction
//! - [`local_search`] — 2-opt refinement
//! - [`models`] — Tour and Population types
//! - [`ga`] — Genetic operators and the evolver loop
//! - [`error`] — Error type
//!
//! ## Quick start
//!
//! ```
//! use u_tsp_memetic::ga::{Evolver, EvolverConfig};
//!
//! let coords = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
//! let mut evolver = Evolver::new(&coords, EvolverConfig::default().with_seed(7))
//!     .expect("valid instance");
//! let best = evolver.solve(|| true, 0.0).expect("solve");
//! assert_eq!(best.cost, 4.0);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod ga;
pub mod local_search;
pub mod models;

pub use error::{Result, TspError};
