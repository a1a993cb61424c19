//! Dense distance matrix.

use crate::error::{Result, TspError};

/// A dense n×n distance matrix stored in row-major order.
///
/// Built from node coordinates using rounded Euclidean distances
/// (TSPLIB `EUC_2D`), or from an explicit grid. Immutable once built.
///
/// # Examples
///
/// ```
/// use u_tsp_memetic::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)])
///     .expect("non-empty");
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes a rounded Euclidean distance matrix from node coordinates.
    ///
    /// Returns [`TspError::EmptyInstance`] if `coordinates` is empty,
    /// [`TspError::NonFiniteCoordinate`] for a NaN or infinite coordinate and
    /// [`TspError::NonFiniteDistance`] if two points are too far apart to
    /// measure.
    pub fn from_coordinates(coordinates: &[(f64, f64)]) -> Result<Self> {
        let n = coordinates.len();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }
        if let Some(node) = coordinates
            .iter()
            .position(|&(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(TspError::NonFiniteCoordinate { node });
        }

        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = rounded_euclidean(coordinates[i], coordinates[j]);
                if !d.is_finite() {
                    return Err(TspError::NonFiniteDistance { from: i, to: j });
                }
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Creates a distance matrix from an explicit n×n grid.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(TspError::EmptyInstance);
        }
        if data.len() != size * size {
            return Err(TspError::SizeMismatch {
                expected: size * size,
                found: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|d| !d.is_finite()) {
            return Err(TspError::NonFiniteDistance {
                from: index / size,
                to: index % size,
            });
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Total length of a closed tour: consecutive edges plus the closing edge.
    ///
    /// Tours with fewer than two nodes have zero length.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let mut dist = 0.0;
        for pair in tour.windows(2) {
            dist += self.get(pair[0], pair[1]);
        }
        dist + self.get(tour[tour.len() - 1], tour[0])
    }
}

fn rounded_euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt().round()
}
