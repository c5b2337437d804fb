//! Color mapping for tiles

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::terrain::TerrainSampler;
use crate::tile::Tile;

/// RGBA color type
pub type TileColor = [f32; 4];

/// Trait for choosing the color of a tile
///
/// Every vertex of the tile's fan gets the same color. Closures of type
/// `Fn(&Tile) -> TileColor` implement this trait too.
pub trait ColorMapper {
    /// Map a tile to an RGBA color
    fn map_color(&self, tile: &Tile) -> TileColor;
}

impl<F> ColorMapper for F
where
    F: Fn(&Tile) -> TileColor,
{
    fn map_color(&self, tile: &Tile) -> TileColor {
        self(tile)
    }
}

/// Random blue-green tiles, reproducible per seed and tile
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColorMapper {
    pub seed: u64,
}

impl RandomColorMapper {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ColorMapper for RandomColorMapper {
    fn map_color(&self, tile: &Tile) -> TileColor {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(tile.id as u64));
        let green: f32 = rng.gen::<f32>() * 0.5;
        let blue: f32 = rng.gen();
        [0.0, green, blue, 1.0]
    }
}

/// Same color for every tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformColorMapper(pub TileColor);

impl Default for UniformColorMapper {
    fn default() -> Self {
        Self([1.0, 1.0, 1.0, 1.0])
    }
}

impl ColorMapper for UniformColorMapper {
    fn map_color(&self, _tile: &Tile) -> TileColor {
        self.0
    }
}

/// Colors each tile from a terrain sampler at the tile's UV
#[derive(Debug, Clone, Copy)]
pub struct TerrainColorMapper<'a, S: ?Sized> {
    sampler: &'a S,
}

impl<'a, S: TerrainSampler + ?Sized> TerrainColorMapper<'a, S> {
    pub fn new(sampler: &'a S) -> Self {
        Self { sampler }
    }
}

impl<S: TerrainSampler + ?Sized> ColorMapper for TerrainColorMapper<'_, S> {
    fn map_color(&self, tile: &Tile) -> TileColor {
        self.sampler.color(tile.uv.x, tile.uv.y).to_rgba()
    }
}
