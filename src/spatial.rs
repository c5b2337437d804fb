//! Spatial indexing for fast position-to-tile lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over tile centers
///
/// Converts arbitrary 3D positions (ray hits, clicks, unit positions) into
/// the ID of the tile whose center is closest. Construction is O(n log n),
/// queries are O(log n).
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 3, 32>,
    len: usize,
}

impl SpatialIndex {
    /// Build spatial index from tile centers
    ///
    /// The position of each center in `centers` is the ID returned by
    /// [`find_nearest`](Self::find_nearest).
    ///
    /// # Example
    ///
    /// ```
    /// use geodesic_planet::*;
    ///
    /// let centers = vec![
    ///     DVec3::new(1.0, 0.0, 0.0),
    ///     DVec3::new(0.0, 1.0, 0.0),
    ///     DVec3::new(0.0, 0.0, 1.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(DVec3::new(1.0, 0.1, 0.0)), 0);
    /// ```
    pub fn new(centers: &[DVec3]) -> Self {
        let points: Vec<[f64; 3]> = centers.iter().map(|c| c.to_array()).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            len: points.len(),
        }
    }

    /// Number of indexed centers
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the tile whose center is nearest to `position`
    ///
    /// Positions need not lie on the sphere; a point scaled along the same
    /// direction usually resolves to the same tile.
    pub fn find_nearest(&self, position: DVec3) -> usize {
        let result = self.tree.nearest_one::<SquaredEuclidean>(&position.to_array());
        result.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let centers = vec![
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(-1.0, 0.0, 0.0),
        ];

        let index = SpatialIndex::new(&centers);
        assert_eq!(index.len(), 4);

        assert_eq!(index.find_nearest(DVec3::new(0.9, 0.1, 0.0)), 0);
        assert_eq!(index.find_nearest(DVec3::new(0.0, 0.95, 0.0)), 1);
        assert_eq!(index.find_nearest(DVec3::new(0.0, 0.1, 0.9)), 2);
        assert_eq!(index.find_nearest(DVec3::new(-0.8, 0.0, 0.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let centers = vec![DVec3::new(10.0, 0.0, 0.0), DVec3::new(0.0, 10.0, 0.0)];
        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(centers[0]), 0);
        assert_eq!(index.find_nearest(centers[1]), 1);
    }
}
