//! Planet Tile Structure
//!
//! A tile is one cell of the dual mesh: the polygon around an icosphere node
//! whose corners are the centroids of the node's incident faces.

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single tile on the planet surface
///
/// Twelve tiles (the base icosahedron vertices) are pentagons, all others
/// are hexagons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Identifier, equal to the index of the owning icosphere node
    pub id: usize,

    /// Average of the corners
    ///
    /// Lies slightly below the sphere surface, since the corners are face
    /// centroids rather than points on the sphere.
    pub center: DVec3,

    /// Miller UV of `center`, used for terrain lookups
    pub uv: DVec2,

    /// Boundary polygon, ordered so that consecutive corners share a mesh
    /// edge and the fan `(0, i, i + 1)` faces away from the sphere center
    pub corners: Vec<DVec3>,

    /// Miller UV of each corner
    pub corner_uvs: Vec<DVec2>,

    /// Icosphere faces whose centroids form `corners`, in the same order
    pub faces: Vec<usize>,

    /// IDs of adjacent tiles, sorted ascending
    pub neighbors: Vec<usize>,
}

impl Tile {
    /// Get the number of corners (5 or 6)
    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Check if this tile is a neighbor of another tile
    #[inline]
    pub fn is_neighbor_of(&self, other_tile_id: usize) -> bool {
        self.neighbors.binary_search(&other_tile_id).is_ok()
    }

    /// Whether this is one of the twelve pentagons
    #[inline]
    pub fn is_pentagon(&self) -> bool {
        self.corners.len() == 5
    }

    /// Closed boundary loop: the corners followed by the first corner again
    ///
    /// Suitable for drawing a selection outline as a line strip.
    pub fn border(&self) -> Vec<DVec3> {
        let mut border = Vec::with_capacity(self.corners.len() + 1);
        border.extend_from_slice(&self.corners);
        if let Some(&first) = self.corners.first() {
            border.push(first);
        }
        border
    }

    /// Outward unit normal at the tile center
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.center.normalize_or_zero()
    }

    /// Calculate the approximate surface area of this tile
    ///
    /// Sum of the flat triangles (center, cornerᵢ, cornerᵢ₊₁).
    pub fn approximate_area(&self) -> f64 {
        if self.corners.len() < 3 {
            return 0.0;
        }

        let n = self.corners.len();
        (0..n)
            .map(|i| {
                let a = self.corners[i] - self.center;
                let b = self.corners[(i + 1) % n] - self.center;
                a.cross(b).length() * 0.5
            })
            .sum()
    }

    /// Great-circle distance between tile centers on a sphere of `radius`
    pub fn distance_to(&self, other: &Tile, radius: f64) -> f64 {
        let denom = self.center.length() * other.center.length();
        if !(denom > 0.0) {
            return 0.0;
        }
        let cos_angle = (self.center.dot(other.center) / denom).clamp(-1.0, 1.0);
        radius * cos_angle.acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_tile(center: DVec3) -> Tile {
        let corners = vec![
            center + DVec3::new(0.0, 1.0, 0.0),
            center + DVec3::new(0.0, 0.0, 1.0),
            center + DVec3::new(0.0, -1.0, 0.0),
            center + DVec3::new(0.0, 0.0, -1.0),
        ];
        Tile {
            id: 0,
            center,
            uv: DVec2::ZERO,
            corner_uvs: vec![DVec2::ZERO; 4],
            corners,
            faces: vec![0, 1, 2, 3],
            neighbors: vec![1, 4, 9],
        }
    }

    #[test]
    fn test_tile_accessors() {
        let tile = square_tile(DVec3::new(10.0, 0.0, 0.0));
        assert_eq!(tile.corner_count(), 4);
        assert!(!tile.is_pentagon());
        assert!(tile.is_neighbor_of(4));
        assert!(!tile.is_neighbor_of(5));
        assert_eq!(tile.normal(), DVec3::X);
    }

    #[test]
    fn test_border_is_closed() {
        let tile = square_tile(DVec3::new(10.0, 0.0, 0.0));
        let border = tile.border();
        assert_eq!(border.len(), 5);
        assert_eq!(border[0], border[4]);
    }

    #[test]
    fn test_approximate_area() {
        // Square with diagonals of length 2
        let tile = square_tile(DVec3::new(10.0, 0.0, 0.0));
        assert!((tile.approximate_area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to() {
        let a = square_tile(DVec3::new(10.0, 0.0, 0.0));
        let b = square_tile(DVec3::new(0.0, 10.0, 0.0));
        let distance = a.distance_to(&b, 10.0);
        let expected = 10.0 * std::f64::consts::FRAC_PI_2;
        assert!((distance - expected).abs() < 1e-9);
    }
}
