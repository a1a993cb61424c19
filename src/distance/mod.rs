//! Distance matrix and nearest-neighbor lists.
//!
//! Both structures are computed once per instance and shared read-only
//! by every solve on that instance.

mod matrix;
mod neighbors;

pub use matrix::DistanceMatrix;
pub use neighbors::NeighborIndex;
