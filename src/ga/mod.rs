//! Memetic genetic algorithm for the TSP.
//!
//! - [`Evolver`] — The generational loop: selection, OX mating, 2-opt
//!   refinement, duplicate suppression, extinction
//! - [`EvolverConfig`] — Loop parameters with builder and presets
//! - [`operators`] — Order crossover, swap mutation, inversion
//! - [`selection`] — Rank-window parent selection and extinction draws
//! - [`TspGaProblem`] — [`GaProblem`](u_metaheur::ga::GaProblem)
//!   implementation for running the generic GA as a baseline

mod config;
mod evolver;
pub mod operators;
mod problem;
pub mod selection;

pub use config::EvolverConfig;
pub use evolver::{BestTour, Evolver, EvolverState};
pub use operators::{invert, order_crossover, random_cut, swap_mutation, Inversion};
pub use problem::TspGaProblem;
