//! Terrain synthesis
//!
//! Provides the [`TerrainSampler`] trait for UV-addressed height/color
//! queries and the noise-driven [`Terrain`] implementation built from three
//! seamless fields (height, rainfall, temperature) and a [`TerrainPalette`].

mod fields;
mod palette;

pub use fields::{Heightmap, Rainmap, Temperature};
pub use palette::TerrainPalette;

use std::time::Instant;

use crate::color::Rgb;
use crate::config::TerrainConfig;
use crate::error::Result;

/// Height and color of one surface point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainSample {
    /// Normalized height in `[0, 1]`
    pub height: f64,
    /// Surface color, components in `[0, 1]`
    pub color: Rgb,
}

/// Trait for sampling terrain at UV coordinates on the sphere
///
/// Implementations must be total: any `(u, v)`, including values outside
/// `[0, 1]` and NaN, yields a valid sample.
pub trait TerrainSampler: Send + Sync {
    /// Normalized height in `[0, 1]`
    fn height(&self, u: f64, v: f64) -> f64;

    /// Surface color
    fn color(&self, u: f64, v: f64) -> Rgb;

    /// Height and color together
    fn sample(&self, u: f64, v: f64) -> TerrainSample {
        TerrainSample {
            height: self.height(u, v),
            color: self.color(u, v),
        }
    }
}

/// Deterministic terrain generated from a seed string
///
/// # Example
///
/// ```rust,no_run
/// use geodesic_planet::*;
///
/// let terrain = Terrain::new("abc", &TerrainConfig::default()).unwrap();
/// let h = terrain.height(0.25, 0.5);
/// assert!((0.0..=1.0).contains(&h));
/// ```
#[derive(Debug, Clone)]
pub struct Terrain {
    seed: String,
    config: TerrainConfig,
    heightmap: Heightmap,
    rainmap: Rainmap,
    temperature: Temperature,
    palette: TerrainPalette,
}

impl Terrain {
    /// Generate all terrain fields for `seed`
    ///
    /// Each field draws from its own PRNG stream (`seed`, `seed:rain`,
    /// `seed:temperature`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `config` does not validate.
    pub fn new(seed: &str, config: &TerrainConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let (w, h) = (config.width, config.height);

        let heightmap = Heightmap::generate(seed, &config.heightmap, w, h)?;
        log::debug!("heightmap {}x{} generated in {:.2?}", w, h, start.elapsed());

        let rainmap = Rainmap::generate(&format!("{}:rain", seed), &config.rainmap, w, h)?;
        let temperature = Temperature::generate(&format!("{}:temperature", seed), &config.temperature, w, h)?;
        let palette = TerrainPalette::new(
            config.heightmap.max_height,
            config.biome_resolution,
            config.thresholds,
        )?;

        log::info!(
            "Generated terrain '{}' ({}x{} fields) in {:.2?}",
            seed,
            w,
            h,
            start.elapsed()
        );

        Ok(Self {
            seed: seed.to_string(),
            config: *config,
            heightmap,
            rainmap,
            temperature,
            palette,
        })
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Integer height in `[0, max_height]`
    pub fn raw_height(&self, u: f64, v: f64) -> f64 {
        self.heightmap.height(u, v)
    }

    /// Normalized temperature in `[0, 1]`
    pub fn temperature(&self, u: f64, v: f64) -> f64 {
        self.temperature.temperature_normalized(u, v)
    }

    /// Normalized rainfall in `[0, 1]`
    pub fn rainfall(&self, u: f64, v: f64) -> f64 {
        self.rainmap.rainfall_normalized(u, v)
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn rainmap(&self) -> &Rainmap {
        &self.rainmap
    }

    pub fn temperature_field(&self) -> &Temperature {
        &self.temperature
    }

    pub fn palette(&self) -> &TerrainPalette {
        &self.palette
    }
}

impl TerrainSampler for Terrain {
    fn height(&self, u: f64, v: f64) -> f64 {
        self.heightmap.height_normalized(u, v)
    }

    fn color(&self, u: f64, v: f64) -> Rgb {
        self.palette.color(
            self.heightmap.height(u, v),
            self.heightmap.height_normalized(u, v),
            self.temperature(u, v),
            self.rainfall(u, v),
        )
    }
}
