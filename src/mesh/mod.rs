//! Mesh generation for the planet surface
//!
//! Generates engine-agnostic render buffers from dual-mesh tiles. Each tile
//! is fan-triangulated from its first corner and gets its own vertices, so
//! tiles are flat-shaded with a single color each.

mod colors;

pub use colors::{ColorMapper, RandomColorMapper, TerrainColorMapper, TileColor, UniformColorMapper};

use glam::DVec3;

use crate::tile::Tile;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions (one vertex per tile corner)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (normalized direction from sphere center)
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Miller-projected texture coordinates
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Tile ID for each triangle, for picking
    pub face_to_tile: Vec<usize>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Tile that owns triangle `triangle`
    #[inline]
    pub fn tile_for_triangle(&self, triangle: usize) -> Option<usize> {
        self.face_to_tile.get(triangle).copied()
    }
}

/// Generate mesh from tiles with color mapping
pub fn generate_mesh<C>(tiles: &[Tile], color_mapper: &C) -> MeshData
where
    C: ColorMapper + ?Sized,
{
    generate_mesh_with_elevation(tiles, color_mapper, |_| 0.0)
}

/// Generate mesh with every tile lifted radially
///
/// # Arguments
/// * `tiles` - Tiles to triangulate, in ID order
/// * `color_mapper` - Picks one color per tile
/// * `elevation` - Radial offset in world units for each tile's corners
pub fn generate_mesh_with_elevation<C, F>(tiles: &[Tile], color_mapper: &C, elevation: F) -> MeshData
where
    C: ColorMapper + ?Sized,
    F: Fn(&Tile) -> f64,
{
    let corners: usize = tiles.iter().map(|t| t.corners.len()).sum();
    let triangles: usize = tiles.iter().map(|t| t.corners.len().saturating_sub(2)).sum();
    let mut mesh = MeshData {
        positions: Vec::with_capacity(corners),
        normals: Vec::with_capacity(corners),
        colors: Vec::with_capacity(corners),
        uvs: Vec::with_capacity(corners),
        indices: Vec::with_capacity(triangles * 3),
        face_to_tile: Vec::with_capacity(triangles),
    };

    for tile in tiles {
        // Skip degenerate tiles
        if tile.corners.len() < 3 {
            continue;
        }

        let color = color_mapper.map_color(tile);
        triangulate_tile(tile, color, elevation(tile), &mut mesh);
    }

    mesh
}

/// Triangulate a single tile as a fan from its first corner
fn triangulate_tile(tile: &Tile, color: TileColor, offset: f64, mesh: &mut MeshData) {
    let base_idx = mesh.positions.len() as u32;

    for (corner, uv) in tile.corners.iter().zip(&tile.corner_uvs) {
        let normal = corner.normalize_or_zero();
        let position: DVec3 = *corner + normal * offset;
        mesh.positions.push(position.as_vec3().to_array());
        mesh.normals.push(normal.as_vec3().to_array());
        mesh.colors.push(color);
        mesh.uvs.push(uv.as_vec2().to_array());
    }

    for i in 1..tile.corners.len() as u32 - 1 {
        mesh.indices.push(base_idx);
        mesh.indices.push(base_idx + i);
        mesh.indices.push(base_idx + i + 1);
        mesh.face_to_tile.push(tile.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icosphere::{build_icosphere, extract_tiles};
    use glam::Vec3;

    fn tiles(degree: usize) -> Vec<Tile> {
        extract_tiles(&build_icosphere(20.0, degree).unwrap())
    }

    #[test]
    fn test_generate_mesh() {
        let tiles = tiles(3);
        let mesh = generate_mesh(&tiles, &UniformColorMapper::default());

        assert!(!mesh.is_empty());
        // 12 pentagons (5 corners, 3 triangles), the rest hexagons (6 corners, 4 triangles)
        let hexagons = tiles.len() - 12;
        assert_eq!(mesh.vertex_count(), 12 * 5 + hexagons * 6);
        assert_eq!(mesh.triangle_count(), 12 * 3 + hexagons * 4);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.positions.len(), mesh.uvs.len());
        assert_eq!(mesh.face_to_tile.len(), mesh.triangle_count());
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_face_to_tile() {
        let tiles = tiles(1);
        let mesh = generate_mesh(&tiles, &UniformColorMapper::default());
        // Pentagons only: three fan triangles per tile, in tile order
        for (triangle, &tile) in mesh.face_to_tile.iter().enumerate() {
            assert_eq!(tile, triangle / 3);
        }
        assert_eq!(mesh.tile_for_triangle(35), Some(11));
        assert_eq!(mesh.tile_for_triangle(36), None);
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = generate_mesh(&tiles(4), &UniformColorMapper::default());
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.positions[i as usize]));
            let normal = (b - a).cross(c - a);
            assert!(normal.dot(a) > 0.0);
        }
    }

    #[test]
    fn test_one_color_per_tile() {
        let tiles = tiles(2);
        let mapper = |t: &Tile| [t.id as f32, 0.0, 0.0, 1.0];
        let mesh = generate_mesh(&tiles, &mapper);
        for (triangle, &tile) in mesh.face_to_tile.iter().enumerate() {
            for k in 0..3 {
                let vertex = mesh.indices[triangle * 3 + k] as usize;
                assert_eq!(mesh.colors[vertex][0], tile as f32);
            }
        }
    }

    #[test]
    fn test_elevation_lifts_corners() {
        let tiles = tiles(2);
        let flat = generate_mesh(&tiles, &UniformColorMapper::default());
        let raised = generate_mesh_with_elevation(&tiles, &UniformColorMapper::default(), |_| 2.0);

        for (a, b) in flat.positions.iter().zip(&raised.positions) {
            let (a, b) = (Vec3::from_array(*a), Vec3::from_array(*b));
            assert!((b.length() - a.length() - 2.0).abs() < 1e-4);
            assert!(a.normalize().dot(b.normalize()) > 0.99999);
        }
        assert_eq!(flat.normals, raised.normals);
    }
}
