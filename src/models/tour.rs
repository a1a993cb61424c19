//! Tour: a permutation of nodes with its cached cost.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use u_metaheur::ga::Individual;

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::local_search::two_opt_improve;

/// A closed tour over all nodes and its total length.
///
/// Tours built through [`Tour::random`] or [`Tour::from_permutation`] are
/// 2-opt local optima whose cached cost matches a full evaluation of the
/// node sequence. The sequence is only reachable immutably, so the cost
/// can never go stale.
///
/// # Examples
///
/// ```
/// use u_tsp_memetic::distance::DistanceMatrix;
/// use u_tsp_memetic::models::Tour;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
///     .expect("non-empty");
/// let tour = Tour::from_permutation(vec![0, 2, 1, 3], &dm).expect("valid permutation");
/// assert_eq!(tour.cost(), 40.0);
/// assert_eq!(tour.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    nodes: Vec<usize>,
    cost: f64,
}

impl Tour {
    /// Creates a tour of the given size with zeroed content and zero cost.
    ///
    /// Only useful as a buffer; it is not a valid permutation for `size > 1`.
    pub fn placeholder(size: usize) -> Self {
        Self {
            nodes: vec![0; size],
            cost: 0.0,
        }
    }

    /// Creates a uniformly shuffled tour and refines it with 2-opt.
    pub fn random<R: Rng>(distances: &DistanceMatrix, rng: &mut R) -> Self {
        let mut nodes: Vec<usize> = (0..distances.size()).collect();
        nodes.shuffle(rng);
        Self::refined(nodes, distances)
    }

    /// Validates an explicit permutation and refines it with 2-opt.
    pub fn from_permutation(nodes: Vec<usize>, distances: &DistanceMatrix) -> Result<Self> {
        validate_permutation(&nodes, distances.size())?;
        Ok(Self::refined(nodes, distances))
    }

    /// Validates an explicit permutation and computes its cost without refining.
    pub fn evaluated(nodes: Vec<usize>, distances: &DistanceMatrix) -> Result<Self> {
        validate_permutation(&nodes, distances.size())?;
        let cost = distances.tour_cost(&nodes);
        Ok(Self { nodes, cost })
    }

    /// Refines a sequence already known to be a permutation.
    pub(crate) fn refined(mut nodes: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let cost = two_opt_improve(&mut nodes, distances);
        Self { nodes, cost }
    }

    /// Node sequence in visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Consumes the tour and returns its node sequence.
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }

    /// Cached total length, closing edge included.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tour has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total order on cost, for sorting.
    pub fn cmp_cost(&self, other: &Self) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }
}

impl PartialOrd for Tour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.cost.partial_cmp(&other.cost)
    }
}

impl Individual for Tour {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.cost
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.cost = fitness;
    }
}

/// Checks that `nodes` holds every index of `0..size` exactly once.
pub fn validate_permutation(nodes: &[usize], size: usize) -> Result<()> {
    if nodes.len() != size {
        return Err(TspError::SizeMismatch {
            expected: size,
            found: nodes.len(),
        });
    }
    let mut seen = vec![false; size];
    for &node in nodes {
        if node >= size || seen[node] {
            return Err(TspError::NotAPermutation { node });
        }
        seen[node] = true;
    }
    Ok(())
}
