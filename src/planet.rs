//! Planet main structure

use std::collections::HashSet;
use std::time::Instant;

use glam::DVec3;
use rayon::prelude::*;

use crate::config::PlanetConfig;
use crate::error::{PlanetError, Result};
use crate::icosphere::{build_icosphere, extract_tiles, IcoMesh};
use crate::mesh::{generate_mesh_with_elevation, MeshData};
use crate::terrain::{Terrain, TerrainSample, TerrainSampler};
use crate::tile::Tile;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete geodesic planet
///
/// Holds the icosphere, its dual tiles, one terrain sample per tile and the
/// render buffers built from them. Nothing is mutated after generation.
///
/// # Examples
///
/// ```rust,no_run
/// use geodesic_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed("abc")
///     .degree(8)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let planet = Planet::generate(config).unwrap();
/// println!("Generated {} tiles", planet.tile_count());
///
/// if let Some(tile) = planet.get_tile(0) {
///     println!("Tile 0 has {} neighbors", tile.neighbors.len());
/// }
/// ```
#[derive(Clone)]
pub struct Planet {
    config: PlanetConfig,
    icosphere: IcoMesh,
    /// Indexed by tile ID
    tiles: Vec<Tile>,
    /// Terrain sample at each tile's UV, indexed by tile ID
    surfaces: Vec<TerrainSample>,
    mesh: MeshData,
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Planet {
    /// Generate a planet painted with noise terrain from `config.seed`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the terrain configuration or mesh parameters are invalid
    /// - `TopologyViolation` if the icosphere cannot be built
    pub fn generate(config: PlanetConfig) -> Result<Self> {
        let terrain = Terrain::new(&config.seed, &config.terrain)?;
        Self::generate_with_sampler(config, &terrain)
    }

    /// Generate a planet with a custom terrain sampler
    ///
    /// The sampler is queried once per tile, at the Miller UV of the tile
    /// center. Mesh corners are lifted by `height * config.elevation`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geodesic_planet::*;
    ///
    /// struct Flat;
    ///
    /// impl TerrainSampler for Flat {
    ///     fn height(&self, _u: f64, _v: f64) -> f64 { 0.5 }
    ///     fn color(&self, _u: f64, _v: f64) -> Rgb { Rgb::WHITE }
    /// }
    ///
    /// let config = PlanetConfigBuilder::new().seed("flat").degree(2).unwrap().build().unwrap();
    /// let planet = Planet::generate_with_sampler(config, &Flat).unwrap();
    /// assert_eq!(planet.tile_count(), 42);
    /// ```
    pub fn generate_with_sampler<S>(config: PlanetConfig, sampler: &S) -> Result<Self>
    where
        S: TerrainSampler + ?Sized,
    {
        let start = Instant::now();

        let icosphere = build_icosphere(config.scale, config.degree)?;
        let tiles = extract_tiles(&icosphere);

        let surfaces: Vec<TerrainSample> = tiles
            .par_iter()
            .map(|tile| sampler.sample(tile.uv.x, tile.uv.y))
            .collect();

        let color = |tile: &Tile| surfaces[tile.id].color.to_rgba();
        let elevation = config.elevation;
        let mesh = generate_mesh_with_elevation(&tiles, &color, |tile: &Tile| {
            surfaces[tile.id].height * elevation
        });

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<DVec3> = tiles.iter().map(|t| t.center).collect();
            SpatialIndex::new(&centers)
        };

        log::info!(
            "Generated planet '{}' (degree {}): {} tiles, {} triangles in {:.2?}",
            config.seed,
            config.degree,
            tiles.len(),
            mesh.triangle_count(),
            start.elapsed()
        );

        Ok(Self {
            config,
            icosphere,
            tiles,
            surfaces,
            mesh,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this planet
    #[inline]
    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Sphere radius
    #[inline]
    pub fn radius(&self) -> f64 {
        self.config.scale
    }

    /// Get the number of tiles on this planet
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Get a tile by ID, `None` if out of bounds
    #[inline]
    pub fn get_tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// All tiles, indexed by ID
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Terrain height and color of a tile
    ///
    /// # Errors
    ///
    /// Returns `TileNotFound` for an unknown ID
    pub fn surface(&self, id: usize) -> Result<TerrainSample> {
        self.surfaces.get(id).copied().ok_or(PlanetError::TileNotFound(id))
    }

    /// Render buffers for the whole planet
    #[inline]
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// The underlying triangle mesh
    #[inline]
    pub fn icosphere(&self) -> &IcoMesh {
        &self.icosphere
    }

    /// Tile owning render triangle `face_id`, for picking
    #[inline]
    pub fn tile_for_face(&self, face_id: usize) -> Option<usize> {
        self.mesh.tile_for_triangle(face_id)
    }

    /// Closed outline of a tile, for drawing a selection border
    ///
    /// # Errors
    ///
    /// Returns `TileNotFound` for an unknown ID
    pub fn tile_border(&self, id: usize) -> Result<Vec<DVec3>> {
        self.tiles
            .get(id)
            .map(Tile::border)
            .ok_or(PlanetError::TileNotFound(id))
    }

    /// Neighbor IDs of a tile; empty for an unknown ID
    pub fn get_neighbors(&self, tile_id: usize) -> &[usize] {
        self.tiles
            .get(tile_id)
            .map(|t| t.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the tile nearest to a 3D position (requires spatial-index feature)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use geodesic_planet::*;
    /// # let planet = Planet::generate(PlanetConfigBuilder::new().build().unwrap()).unwrap();
    /// let tile_id = planet.find_tile_at(DVec3::new(planet.radius(), 0.0, 0.0));
    /// println!("Position is in tile {}", tile_id);
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_tile_at(&self, position: DVec3) -> usize {
        self.spatial_index.find_nearest(position)
    }

    /// Tiles within `hops` steps of `center_id`, center included, sorted by ID
    ///
    /// Returns an empty vec if `center_id` is invalid.
    pub fn find_tiles_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.tiles.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &tile_id in &current {
                for &neighbor in self.get_neighbors(tile_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::{PlanetConfigBuilder, TerrainConfig};

    fn config(degree: usize) -> PlanetConfig {
        PlanetConfigBuilder::new()
            .seed("abc")
            .degree(degree)
            .unwrap()
            .terrain(TerrainConfig::default().with_size(64, 64))
            .build()
            .unwrap()
    }

    /// Height rises with `u`, color is pure red
    struct Ramp;

    impl TerrainSampler for Ramp {
        fn height(&self, u: f64, _v: f64) -> f64 {
            u.clamp(0.0, 1.0)
        }

        fn color(&self, _u: f64, _v: f64) -> Rgb {
            Rgb::new(1.0, 0.0, 0.0)
        }
    }

    #[test]
    fn test_planet_generation() {
        let planet = Planet::generate(config(1)).unwrap();

        assert_eq!(planet.tile_count(), 12);
        assert_eq!(planet.icosphere().edges.len(), 30);
        assert_eq!(planet.icosphere().faces.len(), 20);
        assert!(planet.tiles().iter().all(Tile::is_pentagon));
        assert_eq!(planet.radius(), 20.0);
    }

    #[test]
    fn test_tile_count_matches_config() {
        let config = config(5);
        let expected = config.tile_count();
        let planet = Planet::generate(config).unwrap();
        assert_eq!(planet.tile_count(), expected);
        assert_eq!(planet.tiles().iter().filter(|t| t.is_pentagon()).count(), 12);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Planet::generate(config(3)).unwrap();
        let b = Planet::generate(config(3)).unwrap();
        assert_eq!(a.tiles(), b.tiles());
        assert_eq!(a.mesh(), b.mesh());
        for id in 0..a.tile_count() {
            assert_eq!(a.surface(id), b.surface(id));
        }
    }

    #[test]
    fn test_surfaces_in_range() {
        let planet = Planet::generate(config(4)).unwrap();
        for id in 0..planet.tile_count() {
            let surface = planet.surface(id).unwrap();
            assert!((0.0..=1.0).contains(&surface.height));
            for c in [surface.color.r, surface.color.g, surface.color.b] {
                assert!((0.0..=1.0).contains(&c));
            }
        }
        assert_eq!(
            planet.surface(planet.tile_count()),
            Err(PlanetError::TileNotFound(planet.tile_count()))
        );
    }

    #[test]
    fn test_custom_sampler_drives_mesh() {
        let config = PlanetConfigBuilder::new()
            .seed("ramp")
            .degree(3)
            .unwrap()
            .elevation(2.0)
            .unwrap()
            .build()
            .unwrap();
        let planet = Planet::generate_with_sampler(config, &Ramp).unwrap();

        assert!(planet.mesh().colors.iter().all(|c| *c == [1.0, 0.0, 0.0, 1.0]));

        // Every corner of a tile is lifted by the tile's height times elevation
        let mut vertex = 0;
        for tile in planet.tiles() {
            let lift = planet.surface(tile.id).unwrap().height * 2.0;
            for corner in &tile.corners {
                let position = DVec3::from(planet.mesh().positions[vertex].map(f64::from));
                assert!((position.length() - corner.length() - lift).abs() < 1e-3);
                vertex += 1;
            }
        }
        assert_eq!(vertex, planet.mesh().vertex_count());
    }

    #[test]
    fn test_tile_for_face() {
        let planet = Planet::generate_with_sampler(config(2), &Ramp).unwrap();
        let triangles = planet.mesh().triangle_count();
        assert_eq!(planet.tile_for_face(0), Some(0));
        assert_eq!(planet.tile_for_face(triangles - 1), Some(planet.tile_count() - 1));
        assert_eq!(planet.tile_for_face(triangles), None);
    }

    #[test]
    fn test_tile_border() {
        let planet = Planet::generate_with_sampler(config(2), &Ramp).unwrap();
        let border = planet.tile_border(0).unwrap();
        let tile = planet.get_tile(0).unwrap();
        assert_eq!(border.len(), tile.corner_count() + 1);
        assert_eq!(border.first(), border.last());
        assert!(planet.tile_border(10_000).is_err());
    }

    #[test]
    fn test_get_neighbors() {
        let planet = Planet::generate_with_sampler(config(4), &Ramp).unwrap();
        for tile in planet.tiles() {
            let neighbors = planet.get_neighbors(tile.id);
            assert_eq!(neighbors.len(), tile.corner_count());
            assert!(!neighbors.contains(&tile.id));
        }
        assert!(planet.get_neighbors(999_999).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_tile_at() {
        let planet = Planet::generate_with_sampler(config(4), &Ramp).unwrap();
        for tile in planet.tiles() {
            assert_eq!(planet.find_tile_at(tile.center), tile.id);
            // Same direction, on the sphere surface
            assert_eq!(planet.find_tile_at(tile.normal() * planet.radius()), tile.id);
        }
    }

    #[test]
    fn test_find_tiles_within_radius() {
        let planet = Planet::generate_with_sampler(config(4), &Ramp).unwrap();

        assert_eq!(planet.find_tiles_within_radius(0, 0), vec![0]);

        let ring1 = planet.find_tiles_within_radius(0, 1);
        assert_eq!(ring1.len(), 1 + planet.get_neighbors(0).len());

        let ring2 = planet.find_tiles_within_radius(0, 2);
        assert!(ring2.len() > ring1.len());
        assert!(ring1.iter().all(|id| ring2.contains(id)));

        // Enough hops reach the whole planet
        assert_eq!(planet.find_tiles_within_radius(0, 100).len(), planet.tile_count());
        assert!(planet.find_tiles_within_radius(999_999, 5).is_empty());
    }
}
