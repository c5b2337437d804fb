//! Icosphere construction
//!
//! Builds a geodesic sphere by subdividing an icosahedron: nodes, edges and
//! faces live in flat arenas and refer to each other by index. After
//! construction every node's face list is reordered into a cyclic fan, which
//! is what the dual mesh ([`extract_tiles`]) relies on.
//!
//! # Example
//!
//! ```rust
//! use geodesic_planet::build_icosphere;
//!
//! let mesh = build_icosphere(20.0, 2).unwrap();
//! assert_eq!(mesh.nodes.len(), 42);
//! assert_eq!(mesh.faces.len(), 80);
//! ```

mod base;
mod dual;
mod subdivide;

pub use dual::extract_tiles;

use std::time::Instant;

use glam::DVec3;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlanetError, Result};

/// A mesh vertex
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IcoNode {
    pub position: DVec3,
    /// Incident edge indices
    pub edges: Vec<usize>,
    /// Incident face indices, in cyclic fan order once the mesh is built
    pub faces: Vec<usize>,
}

impl IcoNode {
    fn new(position: DVec3) -> Self {
        Self {
            position,
            edges: Vec::with_capacity(6),
            faces: Vec::with_capacity(6),
        }
    }
}

/// A mesh edge between two nodes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IcoEdge {
    pub nodes: [usize; 2],
    /// Incident faces (two on a closed mesh)
    pub faces: Vec<usize>,
}

impl IcoEdge {
    fn new(a: usize, b: usize) -> Self {
        Self {
            nodes: [a, b],
            faces: Vec::with_capacity(2),
        }
    }

    /// The face across this edge from `face`
    pub fn opposite_face(&self, face: usize) -> Option<usize> {
        match self.faces.as_slice() {
            &[a, b] if a == face => Some(b),
            &[a, b] if b == face => Some(a),
            _ => None,
        }
    }

    /// The endpoint that is not `node`
    pub fn other_node(&self, node: usize) -> Option<usize> {
        match self.nodes {
            [a, b] if a == node => Some(b),
            [a, b] if b == node => Some(a),
            _ => None,
        }
    }
}

/// A triangular mesh face
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IcoFace {
    pub nodes: [usize; 3],
    /// `edges[i]` is the edge opposite `nodes[i]`
    pub edges: [usize; 3],
    pub centroid: DVec3,
}

impl IcoFace {
    fn new(nodes: [usize; 3], edges: [usize; 3]) -> Self {
        Self {
            nodes,
            edges,
            centroid: DVec3::ZERO,
        }
    }

    /// Slot of `node` within this face
    #[inline]
    pub fn slot_of(&self, node: usize) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }
}

/// A fully built icosphere
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IcoMesh {
    pub scale: f64,
    pub degree: usize,
    pub nodes: Vec<IcoNode>,
    pub edges: Vec<IcoEdge>,
    pub faces: Vec<IcoFace>,
}

impl IcoMesh {
    /// Face adjacent to `face` across the edge that joins `node` to the
    /// face's next-but-one node
    ///
    /// Repeated application walks the fan of faces around `node`.
    pub fn next_face_around(&self, node: usize, face: usize) -> Result<usize> {
        next_face_around(&self.faces, &self.edges, node, face)
    }
}

/// Build an icosphere of radius `scale` with `degree` subdivisions per base edge
///
/// The mesh has `10·degree² + 2` nodes, `30·degree²` edges and `20·degree²`
/// faces. Every node lies at distance `scale` from the origin and every
/// node's face list is a closed cyclic fan.
///
/// # Errors
///
/// - `InvalidArgument` if `degree < 1` or `scale` is not a positive finite number
/// - `TopologyViolation` if the face fan of a node cannot be closed
pub fn build_icosphere(scale: f64, degree: usize) -> Result<IcoMesh> {
    if degree < 1 {
        return Err(PlanetError::InvalidArgument(format!(
            "degree must be >= 1 (got {})",
            degree
        )));
    }
    if !(scale > 0.0) || !scale.is_finite() {
        return Err(PlanetError::InvalidArgument(format!(
            "scale must be positive and finite (got {})",
            scale
        )));
    }

    let start = Instant::now();
    let subdivide::MeshArena { mut nodes, edges, mut faces } = subdivide::subdivide(degree);
    log::debug!(
        "subdivided to {} nodes, {} edges, {} faces in {:.2?}",
        nodes.len(),
        edges.len(),
        faces.len(),
        start.elapsed()
    );

    nodes
        .par_iter_mut()
        .for_each(|node| node.position = node.position.normalize() * scale);

    faces.par_iter_mut().for_each(|face| {
        let [a, b, c] = face.nodes;
        face.centroid = centroid(nodes[a].position, nodes[b].position, nodes[c].position);
    });

    nodes
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(index, node)| order_fan(index, &mut node.faces, &faces, &edges))?;

    log::info!(
        "Built icosphere (scale {}, degree {}): {} nodes, {} faces in {:.2?}",
        scale,
        degree,
        nodes.len(),
        faces.len(),
        start.elapsed()
    );

    Ok(IcoMesh {
        scale,
        degree,
        nodes,
        edges,
        faces,
    })
}

/// Barycenter of a triangle via the midpoint of `ab`, then a third of the way to `c`
#[inline]
fn centroid(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let ab_half = a + (b - a) * 0.5;
    (c - ab_half) * (1.0 / 3.0) + ab_half
}

fn next_face_around(faces: &[IcoFace], edges: &[IcoEdge], node: usize, face: usize) -> Result<usize> {
    let current = faces
        .get(face)
        .ok_or_else(|| PlanetError::TopologyViolation(format!("face {} does not exist", face)))?;
    let slot = current.slot_of(node).ok_or_else(|| {
        PlanetError::TopologyViolation(format!("node {} is not a corner of face {}", node, face))
    })?;
    // The edge joining nodes[slot] and nodes[slot + 2]
    let edge = current.edges[(slot + 1) % 3];
    edges[edge].opposite_face(face).ok_or_else(|| {
        PlanetError::TopologyViolation(format!("edge {} has no face opposite face {}", edge, face))
    })
}

/// Reorder `fan` in place so consecutive faces share an edge around `node`
fn order_fan(node: usize, fan: &mut [usize], faces: &[IcoFace], edges: &[IcoEdge]) -> Result<()> {
    if fan.len() < 3 {
        return Err(PlanetError::TopologyViolation(format!(
            "node {} has only {} incident faces",
            node,
            fan.len()
        )));
    }

    let mut current = fan[0];
    for j in 1..fan.len() {
        let next = next_face_around(faces, edges, node, current)?;
        let k = fan[j..]
            .iter()
            .position(|&f| f == next)
            .map(|offset| j + offset)
            .ok_or_else(|| {
                PlanetError::TopologyViolation(format!(
                    "fan walk around node {} reached face {} out of order",
                    node, next
                ))
            })?;
        fan.swap(j, k);
        current = next;
    }

    let closing = next_face_around(faces, edges, node, current)?;
    if closing != fan[0] {
        return Err(PlanetError::TopologyViolation(format!(
            "fan around node {} does not close (ends at face {}, started at {})",
            node, closing, fan[0]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(build_icosphere(20.0, 0), Err(PlanetError::InvalidArgument(_))));
        assert!(matches!(build_icosphere(0.0, 2), Err(PlanetError::InvalidArgument(_))));
        assert!(matches!(build_icosphere(-1.0, 2), Err(PlanetError::InvalidArgument(_))));
        assert!(matches!(build_icosphere(f64::NAN, 2), Err(PlanetError::InvalidArgument(_))));
    }

    #[test]
    fn test_counts_and_euler() {
        for d in [1, 2, 3, 7] {
            let mesh = build_icosphere(20.0, d).unwrap();
            let (v, e, f) = (mesh.nodes.len(), mesh.edges.len(), mesh.faces.len());
            assert_eq!(v, 10 * d * d + 2);
            assert_eq!(e, 30 * d * d);
            assert_eq!(f, 20 * d * d);
            assert_eq!(v as i64 - e as i64 + f as i64, 2);
        }
    }

    #[test]
    fn test_nodes_on_sphere() {
        let mesh = build_icosphere(20.0, 5).unwrap();
        for node in &mesh.nodes {
            assert!((node.position.length() - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_closed_manifold() {
        let mesh = build_icosphere(1.0, 4).unwrap();
        for (i, edge) in mesh.edges.iter().enumerate() {
            assert_eq!(edge.faces.len(), 2, "edge {} should have two faces", i);
        }
        for face in &mesh.faces {
            for i in 0..3 {
                let edge = &mesh.edges[face.edges[i]];
                assert!(!edge.nodes.contains(&face.nodes[i]));
                assert!(edge.nodes.contains(&face.nodes[(i + 1) % 3]));
                assert!(edge.nodes.contains(&face.nodes[(i + 2) % 3]));
            }
        }
    }

    #[test]
    fn test_valence() {
        let mesh = build_icosphere(1.0, 6).unwrap();
        for (i, node) in mesh.nodes.iter().enumerate() {
            let expected = if i < 12 { 5 } else { 6 };
            assert_eq!(node.faces.len(), expected);
        }
    }

    #[test]
    fn test_fans_are_cyclic() {
        let mesh = build_icosphere(1.0, 3).unwrap();
        for (n, node) in mesh.nodes.iter().enumerate() {
            let k = node.faces.len();
            for i in 0..k {
                let a = node.faces[i];
                let b = node.faces[(i + 1) % k];
                assert_eq!(mesh.next_face_around(n, a).unwrap(), b);

                // Consecutive faces share an edge touching the node
                let shared = mesh.faces[a]
                    .edges
                    .iter()
                    .filter(|e| mesh.faces[b].edges.contains(e))
                    .count();
                assert_eq!(shared, 1);
            }
            let mut sorted = node.faces.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), k, "fan of node {} repeats a face", n);
        }
    }

    #[test]
    fn test_centroid_formula() {
        let mesh = build_icosphere(3.0, 2).unwrap();
        for face in &mesh.faces {
            let [a, b, c] = face.nodes.map(|n| mesh.nodes[n].position);
            let mean = (a + b + c) / 3.0;
            assert!((face.centroid - mean).length() < 1e-12);
            assert_eq!(face.centroid, centroid(a, b, c));
        }
    }

    #[test]
    fn test_broken_fan_is_reported() {
        let mut mesh = build_icosphere(1.0, 1).unwrap();
        let mut fan = mesh.nodes[0].faces.clone();
        // Sever an edge so the walk cannot continue
        let edge = mesh.faces[fan[0]].edges[(mesh.faces[fan[0]].slot_of(0).unwrap() + 1) % 3];
        mesh.edges[edge].faces.truncate(1);
        let result = order_fan(0, &mut fan, &mesh.faces, &mesh.edges);
        assert!(matches!(result, Err(PlanetError::TopologyViolation(_))));
    }
}
