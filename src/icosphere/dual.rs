//! Dual mesh: one tile per icosphere node

use glam::DVec3;
use rayon::prelude::*;

use super::IcoMesh;
use crate::projection::miller_uv;
use crate::tile::Tile;

/// Build one [`Tile`] per node of `mesh`
///
/// Tile corners are the centroids of the node's faces in fan order. If the
/// fan winds clockwise seen from outside, corners after the first are
/// reversed so fan triangles `(0, i, i + 1)` face outward.
pub fn extract_tiles(mesh: &IcoMesh) -> Vec<Tile> {
    let tiles: Vec<Tile> = mesh
        .nodes
        .par_iter()
        .enumerate()
        .map(|(id, node)| {
            let mut faces = node.faces.clone();
            let mut corners: Vec<DVec3> = faces.iter().map(|&f| mesh.faces[f].centroid).collect();

            if signed_volume(&corners) < 0.0 {
                corners[1..].reverse();
                faces[1..].reverse();
            }

            let weight = 1.0 / corners.len() as f64;
            let center = corners.iter().fold(DVec3::ZERO, |acc, &c| acc + c * weight);

            let mut neighbors: Vec<usize> = node
                .edges
                .iter()
                .filter_map(|&e| mesh.edges[e].other_node(id))
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();

            Tile {
                id,
                center,
                uv: miller_uv(center),
                corner_uvs: corners.iter().map(|&c| miller_uv(c)).collect(),
                corners,
                faces,
                neighbors,
            }
        })
        .collect();

    log::debug!("extracted {} tiles", tiles.len());
    tiles
}

/// Six times the signed volume of the fan `(origin, c0, ci, ci+1)`
fn signed_volume(corners: &[DVec3]) -> f64 {
    let Some(&first) = corners.first() else {
        return 0.0;
    };
    corners
        .windows(2)
        .skip(1)
        .map(|w| first.dot(w[0].cross(w[1])))
        .sum()
}
