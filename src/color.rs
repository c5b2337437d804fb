//! RGB color values used by gradients and terrain

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear RGB color with `f64` components, nominally in `[0, 1]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channel values (`255` maps to `1.0`)
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Linear interpolation, `t = 0` gives `self`
    #[inline]
    pub fn lerp(self, other: Rgb, t: f64) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Clamp every component into `[0, 1]`
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(self.r.clamp(0.0, 1.0), self.g.clamp(0.0, 1.0), self.b.clamp(0.0, 1.0))
    }

    /// Opaque RGBA for vertex color buffers
    #[inline]
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, 1.0]
    }

    /// Quantize to 8-bit channels
    pub fn to_u8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8() {
        let c = Rgb::from_u8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-12);
        assert_eq!(c.to_u8(), [255, 0, 51]);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0.1, 0.2, 0.3);
        let b = Rgb::new(0.9, 0.8, 0.7);
        assert_eq!(a.lerp(b, 0.0), a);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-12);
        assert!((mid.g - 0.5).abs() < 1e-12);
        assert!((mid.b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_clamped() {
        let c = Rgb::new(-0.2, 0.5, 1.7).clamped();
        assert_eq!(c, Rgb::new(0.0, 0.5, 1.0));
        assert_eq!(c.to_rgba(), [0.0, 0.5, 1.0, 1.0]);
    }
}
