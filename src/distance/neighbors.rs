//! Per-node neighbor lists sorted by distance.

use super::DistanceMatrix;
use crate::error::{Result, TspError};

/// For each node, every other node ordered by ascending distance.
///
/// Ties keep ascending node order. Built once per instance in
/// O(N² log N) and read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_tsp_memetic::distance::{DistanceMatrix, NeighborIndex};
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0)])
///     .expect("non-empty");
/// let index = NeighborIndex::new(&dm).expect("non-empty");
/// assert_eq!(index.neighbors(0), &[2, 1]);
/// assert_eq!(index.nearest(0), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    lists: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Builds the neighbor lists for every node in `distances`.
    pub fn new(distances: &DistanceMatrix) -> Result<Self> {
        let n = distances.size();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }
        let lists = (0..n)
            .map(|i| {
                let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                others.sort_by(|&a, &b| distances.get(i, a).total_cmp(&distances.get(i, b)));
                others
            })
            .collect();
        Ok(Self { lists })
    }

    /// Other nodes sorted by distance from `node`, closest first.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }

    /// Closest other node, or `None` for single-node instances.
    pub fn nearest(&self, node: usize) -> Option<usize> {
        self.lists[node].first().copied()
    }

    /// Number of nodes covered by this index.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if the index covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
