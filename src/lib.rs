//! Geodesic planet mesh generation
//!
//! A standalone library for building subdivided-icosahedron planets whose
//! dual tiles (12 pentagons, the rest hexagons) are painted with seamless
//! simplex-noise terrain. Output is engine-agnostic mesh data, suitable for
//! use with any game engine (Bevy, Godot, etc.)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geodesic_planet::*;
//!
//! // Generate a planet
//! let config = PlanetConfigBuilder::new()
//!     .seed("abc")
//!     .degree(20).unwrap()
//!     .elevation(0.5).unwrap()
//!     .build().unwrap();
//!
//! let planet = Planet::generate(config).unwrap();
//!
//! // Render buffers, colored and displaced by terrain
//! let mesh = planet.mesh();
//! println!("Generated {} triangles", mesh.triangle_count());
//!
//! // Lower-level pieces can be used directly
//! let sphere = build_icosphere(1.0, 4).unwrap();
//! let tiles = extract_tiles(&sphere);
//! let mesh = generate_mesh(&tiles, &RandomColorMapper::new(7));
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-tile lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, meshes and tiles
//! - `debug-image`: Enables PNG export of terrain fields

// Modules
pub mod error;
pub mod config;
pub mod rng;
pub mod noise;
pub mod color;
pub mod gradient;
pub mod terrain;
pub mod projection;
pub mod icosphere;
pub mod tile;
pub mod mesh;
pub mod planet;

#[cfg(feature = "spatial-index")]
pub mod spatial;

#[cfg(feature = "debug-image")]
pub mod export;

// Re-export core types for convenience
pub use error::{PlanetError, Result};
pub use config::{
    ColorThresholds, HeightmapConfig, PlanetConfig, PlanetConfigBuilder, RainmapConfig,
    TemperatureConfig, TerrainConfig,
};
pub use rng::Alea;
pub use noise::{NoiseConfig, NoiseField, SimplexNoise};
pub use color::Rgb;
pub use gradient::{Gradient, Gradient2D, Gradient2DLut, GradientLut};
pub use terrain::{Heightmap, Rainmap, Temperature, Terrain, TerrainPalette, TerrainSample, TerrainSampler};
pub use projection::miller_uv;
pub use icosphere::{build_icosphere, extract_tiles, IcoEdge, IcoFace, IcoMesh, IcoNode};
pub use tile::Tile;
pub use mesh::{
    generate_mesh, generate_mesh_with_elevation, ColorMapper, MeshData, RandomColorMapper,
    TerrainColorMapper, TileColor, UniformColorMapper,
};
pub use planet::Planet;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{DVec2, DVec3};
