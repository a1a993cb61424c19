//! Bridge to the generic GA framework.
//!
//! Implements the [`GaProblem`](u_metaheur::ga::GaProblem) trait over
//! [`Tour`] so the generic [`GaRunner`](u_metaheur::ga::GaRunner) can run on
//! the same instance as [`Evolver`](super::Evolver), as a baseline.
//!
//! # Operators
//!
//! - **Creation**: uniform shuffle refined by 2-opt
//! - **Crossover**: Order crossover (OX), children refined by 2-opt
//! - **Mutation**: Swap, followed by 2-opt
//! - **Evaluation**: Full tour length

use std::sync::Arc;

use rand::Rng;
use u_metaheur::ga::GaProblem;

use super::operators::{order_crossover, swap_mutation};
use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// GA problem for the symmetric TSP over a shared distance matrix.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp_memetic::distance::DistanceMatrix;
/// use u_tsp_memetic::ga::TspGaProblem;
/// use u_metaheur::ga::{GaConfig, GaRunner};
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
///     .expect("non-empty");
/// let problem = TspGaProblem::new(Arc::new(dm));
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(42);
///
/// let result = GaRunner::run(&problem, &config).expect("valid config");
/// assert_eq!(result.best_fitness, 40.0);
/// ```
pub struct TspGaProblem {
    distances: Arc<DistanceMatrix>,
}

impl TspGaProblem {
    /// Creates a problem over the given distance matrix.
    pub fn new(distances: Arc<DistanceMatrix>) -> Self {
        Self { distances }
    }
}

impl GaProblem for TspGaProblem {
    type Individual = Tour;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Tour {
        Tour::random(&self.distances, rng)
    }

    fn evaluate(&self, individual: &Tour) -> f64 {
        self.distances.tour_cost(individual.nodes())
    }

    fn crossover<R: Rng>(&self, parent1: &Tour, parent2: &Tour, rng: &mut R) -> Vec<Tour> {
        match order_crossover(parent1.nodes(), parent2.nodes(), rng) {
            Ok((c1, c2)) => vec![
                Tour::refined(c1, &self.distances),
                Tour::refined(c2, &self.distances),
            ],
            // Fewer than two nodes: nothing to recombine
            Err(_) => vec![parent1.clone()],
        }
    }

    fn mutate<R: Rng>(&self, individual: &mut Tour, rng: &mut R) {
        if individual.len() < 2 {
            return;
        }
        let mut nodes = individual.nodes().to_vec();
        swap_mutation(&mut nodes, rng);
        *individual = Tour::refined(nodes, &self.distances);
    }
}
