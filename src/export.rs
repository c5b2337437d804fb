//! Debug image export of terrain fields
//!
//! This module is only available with the `debug-image` feature.

use std::path::Path;

use image::{GrayImage, Luma, Rgb as Pixel, RgbImage};

use crate::error::{PlanetError, Result};
use crate::noise::NoiseField;
use crate::terrain::TerrainSampler;

/// Render a field as grayscale, stretched so its minimum is black and its
/// maximum is white
///
/// Pixel `(x, y)` is grid cell `(x, y)`. A constant field renders black.
pub fn field_to_image(field: &NoiseField) -> GrayImage {
    let (lo, hi) = field.range();
    let span = hi - lo;

    GrayImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        let value = field.get(x as usize, y as usize);
        let level = if span > 0.0 { (value - lo) / span } else { 0.0 };
        Luma([(level.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

/// Render a sampler's color map as an equirectangular-style `width × height` image
///
/// The top row is the north edge (`v = 1`).
pub fn terrain_to_image<S>(sampler: &S, width: u32, height: u32) -> RgbImage
where
    S: TerrainSampler + ?Sized,
{
    let (w, h) = (width as f64, height as f64);
    RgbImage::from_fn(width, height, |x, y| {
        let u = (x as f64 + 0.5) / w;
        let v = 1.0 - (y as f64 + 0.5) / h;
        Pixel(sampler.color(u, v).to_u8())
    })
}

/// Write [`field_to_image`] to a PNG file
///
/// # Errors
///
/// Returns `Export` if the file cannot be written
pub fn save_field_png(field: &NoiseField, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    field_to_image(field)
        .save(path)
        .map_err(|e| PlanetError::Export(format!("{}: {}", path.display(), e)))?;
    log::debug!("wrote {}x{} field to {}", field.width(), field.height(), path.display());
    Ok(())
}

/// Write [`terrain_to_image`] to a PNG file
///
/// # Errors
///
/// Returns `InvalidArgument` for a zero-size image, `Export` if the file
/// cannot be written
pub fn save_terrain_png<S>(sampler: &S, width: u32, height: u32, path: impl AsRef<Path>) -> Result<()>
where
    S: TerrainSampler + ?Sized,
{
    if width == 0 || height == 0 {
        return Err(PlanetError::InvalidArgument(format!(
            "image must have a non-zero size (got {}x{})",
            width, height
        )));
    }
    let path = path.as_ref();
    terrain_to_image(sampler, width, height)
        .save(path)
        .map_err(|e| PlanetError::Export(format!("{}: {}", path.display(), e)))?;
    log::debug!("wrote {}x{} terrain map to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    struct Hemispheres;

    impl TerrainSampler for Hemispheres {
        fn height(&self, _u: f64, v: f64) -> f64 {
            v
        }

        fn color(&self, _u: f64, v: f64) -> Rgb {
            if v > 0.5 {
                Rgb::WHITE
            } else {
                Rgb::BLACK
            }
        }
    }

    #[test]
    fn test_field_to_image_stretches_range() {
        let field = NoiseField::from_raw(2, 2, vec![-1.0, 0.0, 0.0, 3.0]).unwrap();
        let image = field_to_image(&field);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0).0, [0]);
        assert_eq!(image.get_pixel(1, 1).0, [255]);
        assert_eq!(image.get_pixel(1, 0).0, [64]);
    }

    #[test]
    fn test_constant_field_is_black() {
        let field = NoiseField::from_raw(3, 1, vec![7.0; 3]).unwrap();
        let image = field_to_image(&field);
        assert!(image.pixels().all(|p| p.0 == [0]));
    }

    #[test]
    fn test_terrain_to_image_north_up() {
        let image = terrain_to_image(&Hemispheres, 4, 4);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [0, 0, 0]);
    }

    #[test]
    fn test_save_terrain_png() {
        let path = std::env::temp_dir().join("geodesic_planet_test_terrain.png");
        save_terrain_png(&Hemispheres, 8, 4, &path).unwrap();
        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (8, 4));
        std::fs::remove_file(&path).ok();

        assert!(save_terrain_png(&Hemispheres, 0, 4, &path).is_err());
    }
}
