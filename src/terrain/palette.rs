//! Terrain color tables
//!
//! Two palettes are combined per sample: a height ramp (deep ocean up to
//! snow-capped peaks) and a biome table keyed by coldness and dryness. Land
//! near sea level and near the mountain line blends the two so coastlines
//! and tree lines have no hard seam.

use crate::color::Rgb;
use crate::config::{ColorThresholds, MAX_HEIGHT_LIMIT};
use crate::error::{PlanetError, Result};
use crate::gradient::{Gradient, Gradient2D, Gradient2DLut, GradientLut};

/// Height ramp stops: (fraction of max height, RGB)
const HEIGHT_STOPS: [(f64, [u8; 3]); 9] = [
    (0.0, [0, 0, 153]),     // deep ocean
    (0.4, [0, 102, 255]),   // sea
    (0.46, [0, 120, 255]),  // coast
    (0.49, [153, 204, 255]), // coastal water
    (0.5, [255, 255, 204]), // coastal land
    (0.51, [51, 204, 51]),  // grassland
    (0.65, [153, 102, 51]), // mountain
    (0.72, [230, 255, 255]), // peaks
    (1.0, [230, 255, 255]),
];

/// Biome table rows, one per dryness step (wet to dry), six coldness columns
/// (warm to cold) each
const BIOME_ROWS: [[[u8; 3]; 6]; 5] = [
    [[70, 97, 16], [92, 139, 38], [110, 156, 42], [81, 156, 52], [125, 184, 137], [230, 247, 234]],
    [[70, 97, 16], [84, 117, 30], [80, 156, 42], [42, 156, 52], [95, 154, 107], [230, 247, 234]],
    [[132, 194, 8], [96, 191, 8], [34, 139, 34], [12, 125, 12], [65, 124, 77], [230, 247, 234]],
    [[247, 202, 0], [142, 191, 8], [72, 156, 11], [57, 125, 12], [35, 94, 47], [230, 247, 234]],
    [[255, 223, 120], [214, 179, 62], [178, 189, 62], [155, 189, 62], [88, 148, 68], [230, 247, 234]],
];

/// Precomputed height and biome palettes plus the blend thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainPalette {
    heights: GradientLut<Rgb>,
    biomes: Gradient2DLut,
    thresholds: ColorThresholds,
}

impl TerrainPalette {
    /// Build the palettes for heights in `[0, max_height]`
    pub fn new(max_height: f64, biome_resolution: usize, thresholds: ColorThresholds) -> Result<Self> {
        thresholds.validate()?;
        if !(max_height > 0.0 && max_height <= MAX_HEIGHT_LIMIT) {
            return Err(PlanetError::InvalidArgument(format!(
                "max height must be in (0, {}] (got {})",
                MAX_HEIGHT_LIMIT, max_height
            )));
        }

        let mut heights = Gradient::new(max_height.floor() as usize + 1);
        for (position, [r, g, b]) in HEIGHT_STOPS {
            heights = heights.add_stop(position, Rgb::from_u8(r, g, b));
        }

        let mut biomes = Gradient2D::new(biome_resolution);
        for (row, colors) in BIOME_ROWS.iter().enumerate() {
            let v = row as f64 * 0.25;
            for (col, &[r, g, b]) in colors.iter().enumerate() {
                biomes = biomes.add_stop(col as f64 * 0.2, v, Rgb::from_u8(r, g, b));
            }
        }

        Ok(Self {
            heights: heights.calculate()?,
            biomes: biomes.calculate()?,
            thresholds,
        })
    }

    /// Height ramp color for an integer height
    #[inline]
    pub fn height_color(&self, height: f64) -> Rgb {
        let index = if height.is_nan() { 0.0 } else { height.max(0.0) };
        self.heights.get(index as usize)
    }

    /// Biome color for normalized temperature and rainfall
    #[inline]
    pub fn biome_color(&self, temperature: f64, rainfall: f64) -> Rgb {
        self.biomes.color_at(1.0 - temperature, 1.0 - rainfall)
    }

    /// Blend the two palettes by normalized height `h`
    pub fn blend(&self, h: f64, height_color: Rgb, biome_color: Rgb) -> Rgb {
        let t = &self.thresholds;
        let color = if h < t.sea_level {
            height_color
        } else if h < t.coast_blend_end {
            height_color.lerp(biome_color, (h - t.sea_level) / (t.coast_blend_end - t.sea_level))
        } else if h < t.mountain_start {
            biome_color
        } else if h < t.peak {
            biome_color.lerp(height_color, (h - t.mountain_start) / (t.peak - t.mountain_start))
        } else {
            height_color
        };
        color.clamped()
    }

    /// Final surface color
    pub fn color(&self, height: f64, normalized_height: f64, temperature: f64, rainfall: f64) -> Rgb {
        self.blend(
            normalized_height,
            self.height_color(height),
            self.biome_color(temperature, rainfall),
        )
    }

    pub fn thresholds(&self) -> &ColorThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> TerrainPalette {
        TerrainPalette::new(255.0, 256, ColorThresholds::default()).unwrap()
    }

    #[test]
    fn test_height_stops_exact() {
        let p = palette();
        assert_eq!(p.height_color(0.0), Rgb::from_u8(0, 0, 153));
        // 0.5 * 256 = 128
        assert_eq!(p.height_color(128.0), Rgb::from_u8(255, 255, 204));
        assert_eq!(p.height_color(255.0), Rgb::from_u8(230, 255, 255));
        assert_eq!(p.height_color(-4.0), Rgb::from_u8(0, 0, 153));
    }

    #[test]
    fn test_biome_corners() {
        let p = palette();
        // Hot and wet: first row, first column
        assert_eq!(p.biome_color(1.0, 1.0), Rgb::from_u8(70, 97, 16));
        // Frozen columns are near-white regardless of rainfall
        let frozen = p.biome_color(0.0, 0.5);
        assert!(frozen.r > 0.85 && frozen.g > 0.9);
    }

    #[test]
    fn test_blend_regions() {
        let p = palette();
        let sea = Rgb::new(0.0, 0.0, 1.0);
        let land = Rgb::new(0.0, 1.0, 0.0);

        assert_eq!(p.blend(0.3, sea, land), sea);
        assert_eq!(p.blend(0.62, sea, land), land);
        assert_eq!(p.blend(0.9, sea, land), sea);

        let coast = p.blend(0.55, sea, land);
        assert!((coast.g - 0.5).abs() < 1e-9);
        assert!((coast.b - 0.5).abs() < 1e-9);

        let slope = p.blend(0.685, sea, land);
        assert!((slope.b - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_blend_is_continuous_at_thresholds() {
        let p = palette();
        let a = Rgb::new(0.2, 0.4, 0.6);
        let b = Rgb::new(0.9, 0.1, 0.3);
        let t = ColorThresholds::default();
        // Blends start at the lower palette and end at the other one
        assert_eq!(p.blend(t.sea_level, a, b), a);
        assert_eq!(p.blend(t.mountain_start, a, b), b);
    }

    #[test]
    fn test_invalid_thresholds() {
        let thresholds = ColorThresholds {
            sea_level: 0.7,
            ..ColorThresholds::default()
        };
        assert!(TerrainPalette::new(255.0, 256, thresholds).is_err());
    }

    #[test]
    fn test_invalid_max_height() {
        let thresholds = ColorThresholds::default();
        for max_height in [f64::INFINITY, f64::NAN, 0.0, -1.0, MAX_HEIGHT_LIMIT * 2.0] {
            assert!(matches!(
                TerrainPalette::new(max_height, 16, thresholds),
                Err(PlanetError::InvalidArgument(_))
            ));
        }
    }
}
