//! Multi-stop gradients precomputed into lookup tables
//!
//! A [`Gradient`] collects ordered stops and is turned into an immutable
//! [`GradientLut`] by [`Gradient::calculate`]. The 2D variant lives in
//! [`gradient2d`].

pub mod gradient2d;

pub use gradient2d::{Gradient2D, Gradient2DLut};

use crate::color::Rgb;
use crate::error::{PlanetError, Result};

/// A value that can be placed on a gradient
pub trait GradientValue: Copy + PartialEq + std::fmt::Debug + Send + Sync {
    /// `self + ((other - self) / divisor) * step`
    ///
    /// The per-step delta is computed first so that `step = 0` returns
    /// `self` bit-for-bit.
    fn step_toward(self, other: Self, step: f64, divisor: f64) -> Self;
}

impl GradientValue for f64 {
    #[inline]
    fn step_toward(self, other: Self, step: f64, divisor: f64) -> Self {
        self + ((other - self) / divisor) * step
    }
}

impl GradientValue for Rgb {
    #[inline]
    fn step_toward(self, other: Self, step: f64, divisor: f64) -> Self {
        Rgb::new(
            self.r.step_toward(other.r, step, divisor),
            self.g.step_toward(other.g, step, divisor),
            self.b.step_toward(other.b, step, divisor),
        )
    }
}

/// A single gradient stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop<T> {
    /// Position along the gradient in `[0, 1]`
    pub position: f64,
    pub value: T,
}

/// Ordered 1D stops awaiting calculation
///
/// # Example
///
/// ```
/// use geodesic_planet::Gradient;
///
/// let lut = Gradient::new(100)
///     .add_stop(0.0, 0.0)
///     .add_stop(1.0, 10.0)
///     .calculate()
///     .unwrap();
/// assert_eq!(lut.get(0), 0.0);
/// assert_eq!(lut.get(100), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient<T> {
    stops: Vec<GradientStop<T>>,
    resolution: usize,
}

impl<T: GradientValue> Gradient<T> {
    /// Create an empty gradient that will densify into `resolution + 1` entries
    pub fn new(resolution: usize) -> Self {
        Self {
            stops: Vec::new(),
            resolution,
        }
    }

    /// Append a stop; stops must be added in non-decreasing position order
    pub fn add_stop(mut self, position: f64, value: T) -> Self {
        self.stops.push(GradientStop { position, value });
        self
    }

    pub fn stops(&self) -> &[GradientStop<T>] {
        &self.stops
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(PlanetError::InvalidArgument(
                "gradient resolution must be positive".to_string(),
            ));
        }
        if self.stops.len() < 2 {
            return Err(PlanetError::InvalidArgument(format!(
                "gradient needs at least 2 stops (got {})",
                self.stops.len()
            )));
        }
        for stop in &self.stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(PlanetError::InvalidArgument(format!(
                    "gradient stop position {} outside [0, 1]",
                    stop.position
                )));
            }
        }
        if self.stops.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(PlanetError::InvalidArgument(
                "gradient stops must be in non-decreasing position order".to_string(),
            ));
        }
        Ok(())
    }

    /// Densify the stops into a lookup table
    ///
    /// Each segment between consecutive stops is linearly interpolated over
    /// `ceil(span * resolution)` entries starting at `ceil(start * resolution)`.
    /// Entries before the first stop and after the last stop hold the nearest
    /// stop's value, and every stop's own index holds its value exactly.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for fewer than two stops, a zero resolution,
    /// or stops outside `[0, 1]` / out of order.
    pub fn calculate(&self) -> Result<GradientLut<T>> {
        self.validate()?;

        let res = self.resolution as f64;
        let len = self.resolution + 1;
        let stop_index = |position: f64| ((position * res).ceil() as usize).min(len - 1);

        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        let mut table = vec![first.value; len];

        for pair in self.stops.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let total_steps = ((next.position - current.position) * res).ceil() as usize;
            let start = stop_index(current.position);

            for i in 0..total_steps {
                let idx = start + i;
                if idx >= len {
                    break;
                }
                table[idx] = if total_steps == 1 {
                    current.value
                } else {
                    current.value.step_toward(next.value, i as f64, (total_steps - 1) as f64)
                };
            }
        }

        for entry in &mut table[stop_index(last.position)..] {
            *entry = last.value;
        }
        for stop in &self.stops {
            table[stop_index(stop.position)] = stop.value;
        }

        Ok(GradientLut {
            table,
            resolution: self.resolution,
        })
    }
}

/// Immutable, densified gradient
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLut<T> {
    table: Vec<T>,
    resolution: usize,
}

impl<T: GradientValue> GradientLut<T> {
    /// Entry at an integer index (e.g. an integer height), clamped to the table
    #[inline]
    pub fn get(&self, index: usize) -> T {
        self.table[index.min(self.table.len() - 1)]
    }

    /// Entry at a fraction in `[0, 1]`; out-of-range and NaN inputs are clamped
    #[inline]
    pub fn value_at(&self, fraction: f64) -> T {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.get((fraction * self.resolution as f64).floor() as usize)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of entries (`resolution + 1`)
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.table
    }
}
