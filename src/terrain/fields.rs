//! Height, rainfall and temperature fields

use crate::config::{HeightmapConfig, RainmapConfig, TemperatureConfig};
use crate::error::Result;
use crate::gradient::{Gradient, GradientLut};
use crate::noise::{NoiseField, SimplexNoise};

/// Terrain elevation in `[0, max_height]`
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    field: NoiseField,
    max_height: f64,
}

impl Heightmap {
    /// Generate a heightmap for `seed`
    pub fn generate(seed: &str, config: &HeightmapConfig, width: usize, height: usize) -> Result<Self> {
        let noise = SimplexNoise::from_seed(config.noise.with_range(0.0, config.max_height), seed)?;
        Ok(Self {
            field: NoiseField::generate(&noise, width, height)?,
            max_height: config.max_height,
        })
    }

    /// Integer height at `(u, v)`, clamped into `[0, max_height]`
    #[inline]
    pub fn height(&self, u: f64, v: f64) -> f64 {
        self.field.sample(u, v).floor().clamp(0.0, self.max_height)
    }

    /// Height scaled into `[0, 1]`
    #[inline]
    pub fn height_normalized(&self, u: f64, v: f64) -> f64 {
        (self.height(u, v) / self.max_height).clamp(0.0, 1.0)
    }

    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}

/// Rainfall in `[0, max_rain]`
#[derive(Debug, Clone, PartialEq)]
pub struct Rainmap {
    field: NoiseField,
    max_rain: f64,
}

impl Rainmap {
    pub fn generate(seed: &str, config: &RainmapConfig, width: usize, height: usize) -> Result<Self> {
        let noise = SimplexNoise::from_seed(config.noise.with_range(0.0, config.max_rain), seed)?;
        Ok(Self {
            field: NoiseField::generate(&noise, width, height)?,
            max_rain: config.max_rain,
        })
    }

    #[inline]
    pub fn rainfall(&self, u: f64, v: f64) -> f64 {
        self.field.sample(u, v).floor().clamp(0.0, self.max_rain)
    }

    #[inline]
    pub fn rainfall_normalized(&self, u: f64, v: f64) -> f64 {
        (self.rainfall(u, v) / self.max_rain).clamp(0.0, 1.0)
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}

/// Temperature: a latitude band peaking at the equator plus noise distortion
#[derive(Debug, Clone, PartialEq)]
pub struct Temperature {
    field: NoiseField,
    latitude: GradientLut<f64>,
    min_temp: f64,
    max_temp: f64,
}

impl Temperature {
    /// Generate a temperature field for `seed`
    ///
    /// The latitude band is a 1D gradient over `v` with `height` steps: cold
    /// below 0.2 and above 0.8, rising linearly to `max_temp` at 0.5.
    pub fn generate(seed: &str, config: &TemperatureConfig, width: usize, height: usize) -> Result<Self> {
        let d = config.distortion;
        let noise = SimplexNoise::from_seed(config.noise.with_range(-d, d), seed)?;
        let latitude = Gradient::new(height)
            .add_stop(0.0, config.min_temp)
            .add_stop(0.2, config.min_temp)
            .add_stop(0.5, config.max_temp)
            .add_stop(0.8, config.min_temp)
            .add_stop(1.0, config.min_temp)
            .calculate()?;

        Ok(Self {
            field: NoiseField::generate(&noise, width, height)?,
            latitude,
            min_temp: config.min_temp,
            max_temp: config.max_temp,
        })
    }

    /// Temperature in degrees at `(u, v)`
    #[inline]
    pub fn temperature(&self, u: f64, v: f64) -> f64 {
        self.field.sample(u, v) + self.latitude.value_at(v)
    }

    /// Temperature mapped from `[min_temp, max_temp]` into `[0, 1]`
    #[inline]
    pub fn temperature_normalized(&self, u: f64, v: f64) -> f64 {
        ((self.temperature(u, v) - self.min_temp) / (self.max_temp - self.min_temp)).clamp(0.0, 1.0)
    }

    /// Latitude component alone
    pub fn latitude_bias(&self, v: f64) -> f64 {
        self.latitude.value_at(v)
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heightmap_range() {
        let map = Heightmap::generate("abc", &HeightmapConfig::default(), 64, 64).unwrap();
        for i in 0..=32 {
            for j in 0..=32 {
                let (u, v) = (i as f64 / 32.0, j as f64 / 32.0);
                let h = map.height(u, v);
                assert!((0.0..=255.0).contains(&h));
                assert_eq!(h, h.floor());
                assert!((0.0..=1.0).contains(&map.height_normalized(u, v)));
            }
        }
    }

    #[test]
    fn test_heightmap_seamless() {
        let map = Heightmap::generate("seam", &HeightmapConfig::default(), 64, 64).unwrap();
        for i in 0..=64 {
            let t = i as f64 / 64.0;
            assert_eq!(map.height(0.0, t), map.height(1.0, t));
            assert_eq!(map.height(t, 0.0), map.height(t, 1.0));
        }
    }

    #[test]
    fn test_rainmap_range() {
        let map = Rainmap::generate("abc:rain", &RainmapConfig::default(), 32, 32).unwrap();
        for i in 0..32 {
            let r = map.rainfall_normalized(i as f64 / 32.0, 0.5);
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_temperature_latitude_band() {
        let config = TemperatureConfig::default();
        let temp = Temperature::generate("abc:temperature", &config, 64, 64).unwrap();

        assert_eq!(temp.latitude_bias(0.0), config.min_temp);
        assert_eq!(temp.latitude_bias(0.5), config.max_temp);
        assert_eq!(temp.latitude_bias(1.0), config.min_temp);
        assert!(temp.latitude_bias(0.35) > config.min_temp);
        assert!(temp.latitude_bias(0.35) < config.max_temp);
    }

    #[test]
    fn test_temperature_distortion_bounds() {
        let config = TemperatureConfig::default();
        let temp = Temperature::generate("t", &config, 32, 32).unwrap();
        for i in 0..32 {
            for j in 0..32 {
                let (u, v) = (i as f64 / 32.0, j as f64 / 32.0);
                let distortion = temp.temperature(u, v) - temp.latitude_bias(v);
                // Octave sums can overshoot [-1, 1] slightly
                assert!(distortion.abs() <= config.distortion * 1.25);
                assert!((0.0..=1.0).contains(&temp.temperature_normalized(u, v)));
            }
        }
    }
}
