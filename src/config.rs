//! Planet Configuration and Builder
//!
//! This module provides configuration types for deterministic icosphere planet
//! generation: the mesh parameters in [`PlanetConfig`] and the terrain field
//! parameters in [`TerrainConfig`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PlanetError, Result};
use crate::noise::NoiseConfig;

/// Largest accepted `max_height`; the height palette holds one entry per integer height
pub const MAX_HEIGHT_LIMIT: f64 = 65_535.0;

/// Heightmap field parameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightmapConfig {
    /// Largest height value; the field spans `[0, max_height]`
    pub max_height: f64,
    /// Octave parameters (the output range is set from `max_height`)
    pub noise: NoiseConfig,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            max_height: 255.0,
            noise: NoiseConfig {
                amplitude: 0.4,
                frequency: 0.008,
                octaves: 10,
                persistence: 0.5,
                ..NoiseConfig::default()
            },
        }
    }
}

/// Rainfall field parameters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainmapConfig {
    /// Largest rainfall value; the field spans `[0, max_rain]`
    pub max_rain: f64,
    pub noise: NoiseConfig,
}

impl Default for RainmapConfig {
    fn default() -> Self {
        Self {
            max_rain: 255.0,
            noise: NoiseConfig {
                amplitude: 0.1,
                frequency: 0.003,
                octaves: 30,
                persistence: 0.5,
                ..NoiseConfig::default()
            },
        }
    }
}

/// Temperature field parameters
///
/// Temperature is a latitude band (cold poles, `max_temp` at the equator)
/// distorted by noise in `[-distortion, distortion]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureConfig {
    pub min_temp: f64,
    pub max_temp: f64,
    pub distortion: f64,
    pub noise: NoiseConfig,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            min_temp: -30.0,
            max_temp: 40.0,
            distortion: 15.0,
            noise: NoiseConfig {
                amplitude: 0.1,
                frequency: 0.004,
                octaves: 10,
                persistence: 0.5,
                ..NoiseConfig::default()
            },
        }
    }
}

/// Normalized-height thresholds for blending the height and biome palettes
///
/// Below `sea_level` the height palette is used, between `coast_blend_end`
/// and `mountain_start` the biome palette, and above `peak` the height
/// palette again. The two gaps in between are linear blends.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorThresholds {
    pub sea_level: f64,
    pub coast_blend_end: f64,
    pub mountain_start: f64,
    pub peak: f64,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            sea_level: 0.5,
            coast_blend_end: 0.6,
            mountain_start: 0.65,
            peak: 0.72,
        }
    }
}

impl ColorThresholds {
    /// Thresholds must be strictly increasing inside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        let t = [self.sea_level, self.coast_blend_end, self.mountain_start, self.peak];
        if t.iter().any(|x| !(0.0..=1.0).contains(x)) || t.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PlanetError::InvalidArgument(format!(
                "color thresholds must increase strictly within [0, 1] (got {:?})",
                t
            )));
        }
        Ok(())
    }
}

/// Terrain synthesis configuration
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    /// Field grid width in cells
    pub width: usize,
    /// Field grid height in cells
    pub height: usize,
    pub heightmap: HeightmapConfig,
    pub rainmap: RainmapConfig,
    pub temperature: TemperatureConfig,
    pub thresholds: ColorThresholds,
    /// Resolution of the biome (temperature × rainfall) color table
    pub biome_resolution: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            heightmap: HeightmapConfig::default(),
            rainmap: RainmapConfig::default(),
            temperature: TemperatureConfig::default(),
            thresholds: ColorThresholds::default(),
            biome_resolution: 256,
        }
    }
}

impl TerrainConfig {
    /// Same configuration with a different grid size
    pub fn with_size(self, width: usize, height: usize) -> Self {
        Self { width, height, ..self }
    }

    /// Validate every field configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero-size grid, non-positive or
    /// non-finite maxima, `max_height` above [`MAX_HEIGHT_LIMIT`],
    /// `max_temp <= min_temp`, bad thresholds, or an invalid noise setup.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlanetError::InvalidArgument(format!(
                "terrain grid must have a non-zero size (got {}x{})",
                self.width, self.height
            )));
        }
        let max_height = self.heightmap.max_height;
        if !(max_height > 0.0 && max_height <= MAX_HEIGHT_LIMIT) {
            return Err(PlanetError::InvalidArgument(format!(
                "max height must be in (0, {}] (got {})",
                MAX_HEIGHT_LIMIT, max_height
            )));
        }
        if !(self.rainmap.max_rain > 0.0) || !self.rainmap.max_rain.is_finite() {
            return Err(PlanetError::InvalidArgument(format!(
                "max rain must be positive and finite (got {})",
                self.rainmap.max_rain
            )));
        }
        if !self.temperature.min_temp.is_finite() || !self.temperature.max_temp.is_finite() {
            return Err(PlanetError::InvalidArgument(format!(
                "temperature bounds must be finite (got {}, {})",
                self.temperature.min_temp, self.temperature.max_temp
            )));
        }
        if !(self.temperature.max_temp > self.temperature.min_temp) {
            return Err(PlanetError::InvalidArgument(format!(
                "max temperature must exceed min temperature (got {} <= {})",
                self.temperature.max_temp, self.temperature.min_temp
            )));
        }
        if !(self.temperature.distortion > 0.0) || !self.temperature.distortion.is_finite() {
            return Err(PlanetError::InvalidArgument(format!(
                "temperature distortion must be positive and finite (got {})",
                self.temperature.distortion
            )));
        }
        if self.biome_resolution == 0 {
            return Err(PlanetError::InvalidArgument(
                "biome resolution must be positive".to_string(),
            ));
        }
        self.thresholds.validate()?;
        self.heightmap.noise.with_range(0.0, self.heightmap.max_height).validate()?;
        self.rainmap.noise.with_range(0.0, self.rainmap.max_rain).validate()?;
        let d = self.temperature.distortion;
        self.temperature.noise.with_range(-d, d).validate()
    }
}

/// Configuration for deterministic planet generation
///
/// The same configuration always produces the identical planet: the mesh
/// depends only on `scale` and `degree`, the terrain only on `seed` and
/// `terrain`.
///
/// # Example
///
/// ```rust
/// use geodesic_planet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed("abc")
///     .degree(8)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: PlanetConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetConfig {
    /// Sphere radius in world units
    pub scale: f64,

    /// Subdivision degree; each base edge is split into `degree` segments
    ///
    /// The planet has `10·degree² + 2` tiles, twelve of them pentagons.
    pub degree: usize,

    /// Seed string for terrain generation
    pub seed: String,

    /// Terrain field parameters
    pub terrain: TerrainConfig,

    /// Radial mesh displacement per unit of normalized height
    ///
    /// - 0.0: smooth sphere (default)
    /// - 1.0: highest tiles are lifted one world unit
    pub elevation: f64,
}

impl PlanetConfig {
    /// Number of tiles this configuration will produce
    #[inline]
    pub fn tile_count(&self) -> usize {
        10 * self.degree * self.degree + 2
    }
}

/// Builder for creating PlanetConfig with validation
///
/// # Example
///
/// ```rust
/// use geodesic_planet::*;
///
/// // Use defaults (random seed)
/// let config = PlanetConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = PlanetConfigBuilder::new()
///     .seed("abc")
///     .degree(10)
///     .unwrap()
///     .scale(5.0)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.tile_count(), 1002);
/// ```
#[derive(Debug, Clone)]
pub struct PlanetConfigBuilder {
    scale: f64,
    degree: usize,
    seed: Option<String>,
    terrain: TerrainConfig,
    elevation: f64,
}

impl PlanetConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - scale: 20.0
    /// - degree: 20 (4,002 tiles)
    /// - seed: Random
    /// - terrain: `TerrainConfig::default()` (512×512 fields)
    /// - elevation: 0.0
    pub fn new() -> Self {
        Self {
            scale: 20.0,
            degree: 20,
            seed: None,
            terrain: TerrainConfig::default(),
            elevation: 0.0,
        }
    }

    /// Set the terrain seed
    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Set the subdivision degree
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if degree is 0
    pub fn degree(mut self, degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(PlanetError::InvalidConfig(
                "degree must be >= 1 (got 0)".to_string(),
            ));
        }
        self.degree = degree;
        Ok(self)
    }

    /// Set the sphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if scale is not a positive finite number
    pub fn scale(mut self, scale: f64) -> Result<Self> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(PlanetError::InvalidConfig(format!(
                "scale must be positive and finite (got {})",
                scale
            )));
        }
        self.scale = scale;
        Ok(self)
    }

    /// Set the radial displacement per unit of normalized height
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if elevation is negative or not finite
    pub fn elevation(mut self, elevation: f64) -> Result<Self> {
        if !(elevation >= 0.0) || !elevation.is_finite() {
            return Err(PlanetError::InvalidConfig(format!(
                "elevation must be >= 0 and finite (got {})",
                elevation
            )));
        }
        self.elevation = elevation;
        Ok(self)
    }

    /// Replace the terrain configuration
    pub fn terrain(mut self, terrain: TerrainConfig) -> Self {
        self.terrain = terrain;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random decimal seed is generated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the terrain configuration does not validate
    pub fn build(self) -> Result<PlanetConfig> {
        self.terrain
            .validate()
            .map_err(|e| PlanetError::InvalidConfig(e.to_string()))?;

        let seed = self
            .seed
            .unwrap_or_else(|| rand::random::<u32>().to_string());

        Ok(PlanetConfig {
            scale: self.scale,
            degree: self.degree,
            seed,
            terrain: self.terrain,
            elevation: self.elevation,
        })
    }
}

impl Default for PlanetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
