//! Bilinear color gradient over the unit square

use rayon::prelude::*;

use crate::color::Rgb;
use crate::error::{PlanetError, Result};

/// A color pinned at `(u, v)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop2D {
    pub u: f64,
    pub v: f64,
    pub color: Rgb,
}

/// Stops scattered over `[0, 1]²`, densified by [`Gradient2D::calculate`]
///
/// Every cell of the table is interpolated from the nearest stop in each of
/// the four quadrants around it. Stops laid out on a regular grid therefore
/// give plain bilinear interpolation between grid corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient2D {
    stops: Vec<ColorStop2D>,
    resolution: usize,
}

/// Nearest stop index in each quadrant around a sample point
#[derive(Debug, Clone, Copy)]
struct Quadrants {
    top_left: usize,
    top_right: usize,
    bottom_left: usize,
    bottom_right: usize,
}

impl Gradient2D {
    /// Create an empty gradient with a `resolution × resolution` table
    pub fn new(resolution: usize) -> Self {
        Self {
            stops: Vec::new(),
            resolution,
        }
    }

    pub fn add_stop(mut self, u: f64, v: f64, color: Rgb) -> Self {
        self.stops.push(ColorStop2D { u, v, color });
        self
    }

    pub fn stops(&self) -> &[ColorStop2D] {
        &self.stops
    }

    /// Densify into a lookup table
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` with fewer than 4 stops, a zero resolution
    /// or a stop outside the unit square.
    pub fn calculate(&self) -> Result<Gradient2DLut> {
        if self.resolution == 0 {
            return Err(PlanetError::InvalidArgument(
                "2D gradient resolution must be positive".to_string(),
            ));
        }
        if self.stops.len() < 4 {
            return Err(PlanetError::InvalidArgument(format!(
                "2D gradient needs at least 4 stops (got {})",
                self.stops.len()
            )));
        }
        if let Some(stop) = self
            .stops
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.u) || !(0.0..=1.0).contains(&s.v))
        {
            return Err(PlanetError::InvalidArgument(format!(
                "2D gradient stop ({}, {}) outside the unit square",
                stop.u, stop.v
            )));
        }

        let res = self.resolution;
        let mut table = vec![Rgb::BLACK; res * res];

        table.par_chunks_mut(res).enumerate().for_each(|(y, row)| {
            let v = y as f64 / res as f64;
            for (x, cell) in row.iter_mut().enumerate() {
                let u = x as f64 / res as f64;
                *cell = self.interpolate(u, v);
            }
        });

        Ok(Gradient2DLut { table, resolution: res })
    }

    fn interpolate(&self, u: f64, v: f64) -> Rgb {
        let q = self.quadrants(u, v);
        let tl = self.stops[q.top_left];
        let tr = self.stops[q.top_right];
        let bl = self.stops[q.bottom_left];
        let br = self.stops[q.bottom_right];

        // A zero span means the sample sits on that stop row/column
        let tu = fraction(u, tl.u, tr.u);
        let tv = fraction(v, tl.v, bl.v);

        let top = tl.color.lerp(tr.color, tu);
        let bottom = bl.color.lerp(br.color, fraction(u, bl.u, br.u));
        top.lerp(bottom, tv)
    }

    fn quadrants(&self, u: f64, v: f64) -> Quadrants {
        let mut best: [Option<(usize, f64)>; 4] = [None; 4];

        for (i, stop) in self.stops.iter().enumerate() {
            let d = (stop.u - u).powi(2) + (stop.v - v).powi(2);
            let left = stop.u <= u;
            let right = stop.u >= u;
            let top = stop.v <= v;
            let bottom = stop.v >= v;

            for (slot, inside) in [left && top, right && top, left && bottom, right && bottom]
                .into_iter()
                .enumerate()
            {
                if inside && best[slot].map_or(true, |(_, bd)| d < bd) {
                    best[slot] = Some((i, d));
                }
            }
        }

        let [tl, tr, bl, br] = best.map(|b| b.map(|(i, _)| i));
        // Borrow from the horizontal neighbour first, then the vertical one
        Quadrants {
            top_left: tl.or(tr).or(bl).or(br).unwrap_or(0),
            top_right: tr.or(tl).or(br).or(bl).unwrap_or(0),
            bottom_left: bl.or(br).or(tl).or(tr).unwrap_or(0),
            bottom_right: br.or(bl).or(tr).or(tl).unwrap_or(0),
        }
    }
}

#[inline]
fn fraction(x: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Immutable 2D color table
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient2DLut {
    /// Row-major, `table[y * resolution + x]`
    table: Vec<Rgb>,
    resolution: usize,
}

impl Gradient2DLut {
    /// Color at `(u, v)`, with both clamped into `[0, 1]` (NaN maps to 0)
    pub fn color_at(&self, u: f64, v: f64) -> Rgb {
        let scale = (self.resolution - 1) as f64;
        let x = (clamp_unit(u) * scale).floor() as usize;
        let y = (clamp_unit(v) * scale).floor() as usize;
        self.table[y * self.resolution + x]
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }
}

#[inline]
fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
