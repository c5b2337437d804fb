//! Seamless noise fields
//!
//! A [`NoiseField`] is a fixed-resolution grid of noise samples addressed by
//! UV. Each grid cell is lifted onto two orthogonal circles in 4D before
//! sampling, so the field wraps in both U and V without a visible seam.

use rayon::prelude::*;
use std::f64::consts::TAU;

use super::SimplexNoise;
use crate::error::{PlanetError, Result};

/// Sample `noise` at the torus point for grid fraction `(s, t)`
///
/// `s = 0` and `s = 1` land on the same 4D point (likewise for `t`), which is
/// what makes the field tileable. The circle radii are chosen so one grid
/// cell spans roughly one unit of noise space.
pub fn sample_tileable(noise: &SimplexNoise, s: f64, t: f64, width: f64, height: f64) -> f64 {
    let (sin_s, cos_s) = (s * TAU).sin_cos();
    let (sin_t, cos_t) = (t * TAU).sin_cos();
    let nx = cos_s * width / TAU;
    let ny = cos_t * height / TAU;
    let nz = sin_s * width / TAU;
    let nw = sin_t * height / TAU;
    noise.sample_4d(nx, ny, nz, nw)
}

/// A 2D scalar grid generated once from tileable noise
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: usize,
    height: usize,
    /// Row-major samples, `data[y * width + x]`
    data: Vec<f64>,
}

impl NoiseField {
    /// Generate a `width × height` field from `noise`
    ///
    /// Rows are generated in parallel; the result does not depend on thread count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either dimension is zero.
    pub fn generate(noise: &SimplexNoise, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PlanetError::InvalidArgument(format!(
                "noise field must have a non-zero size (got {}x{})",
                width, height
            )));
        }

        let w = width as f64;
        let h = height as f64;
        let mut data = vec![0.0; width * height];

        data.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            let t = y as f64 / h;
            for (x, cell) in row.iter_mut().enumerate() {
                let s = x as f64 / w;
                *cell = sample_tileable(noise, s, t, w, h);
            }
        });

        Ok(Self { width, height, data })
    }

    /// Build a field from precomputed row-major samples
    pub fn from_raw(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(PlanetError::InvalidArgument(format!(
                "field data of length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw samples in row-major order
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample at grid cell `(x, y)`, wrapping out-of-range indices
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[(y % self.height) * self.width + (x % self.width)]
    }

    /// Grid cell containing `(u, v)`
    ///
    /// UV is clamped to `[0, 1]` (NaN maps to 0) and the cell index wraps, so
    /// `u = 1` addresses the same column as `u = 0`.
    pub fn cell_for_uv(&self, u: f64, v: f64) -> (usize, usize) {
        let x = wrap_index(u, self.width);
        let y = wrap_index(v, self.height);
        (x, y)
    }

    /// Nearest-cell lookup at `(u, v)`
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        let (x, y) = self.cell_for_uv(u, v);
        self.data[y * self.width + x]
    }

    /// Smallest and largest sample
    pub fn range(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Map a UV fraction to a wrapped cell index
#[inline]
fn wrap_index(fraction: f64, size: usize) -> usize {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    ((fraction * size as f64).floor() as usize) % size
}
