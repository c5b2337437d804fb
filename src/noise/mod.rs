//! 4D simplex noise
//!
//! Layered (octave) simplex noise in four dimensions, seeded through a
//! permutation table shuffled by an [`Alea`] stream. Four dimensions are
//! needed so a 2D grid can be wrapped onto two orthogonal circles and tile
//! seamlessly in both directions (see [`field`]).

pub mod field;

pub use field::NoiseField;

use crate::error::{PlanetError, Result};
use crate::rng::Alea;

/// Configuration for octave noise generation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseConfig {
    /// Amplitude of the first octave
    pub amplitude: f64,
    /// Frequency of the first octave (lower = larger features)
    pub frequency: f64,
    /// Number of octaves; frequency doubles each octave
    pub octaves: usize,
    /// Amplitude decay per octave
    pub persistence: f64,
    /// Output value mapped from noise -1
    pub min: f64,
    /// Output value mapped from noise +1
    pub max: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            octaves: 1,
            persistence: 0.5,
            min: -1.0,
            max: 1.0,
        }
    }
}

impl NoiseConfig {
    /// Copy of this configuration with a different output range
    pub fn with_range(self, min: f64, max: f64) -> Self {
        Self { min, max, ..self }
    }

    /// Check the configuration for values that would make the sum meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(PlanetError::InvalidArgument(format!(
                "noise range must be finite (got {}, {})",
                self.min, self.max
            )));
        }
        if !(self.min < self.max) {
            return Err(PlanetError::InvalidArgument(format!(
                "noise min must be less than max (got {} >= {})",
                self.min, self.max
            )));
        }
        if self.octaves == 0 {
            return Err(PlanetError::InvalidArgument(
                "noise needs at least one octave".to_string(),
            ));
        }
        if !(self.amplitude > 0.0) || !self.amplitude.is_finite() || !self.frequency.is_finite() {
            return Err(PlanetError::InvalidArgument(format!(
                "noise amplitude must be positive and finite, frequency finite (got {}, {})",
                self.amplitude, self.frequency
            )));
        }
        if !(self.persistence > 0.0) || !self.persistence.is_finite() {
            return Err(PlanetError::InvalidArgument(format!(
                "noise persistence must be positive and finite (got {})",
                self.persistence
            )));
        }
        Ok(())
    }
}

/// Skew factor for 4D: (sqrt(5) - 1) / 4
const F4: f64 = 0.309_016_994_374_947_4;
/// Unskew factor for 4D: (5 - sqrt(5)) / 20
const G4: f64 = 0.138_196_601_125_010_5;
/// Scales the summed corner contributions to roughly [-1, 1]
const RAW_SCALE: f64 = 72.378_570_976_794_66;

/// Gradient directions: midpoints of the 32 edges of a tesseract
const GRAD4: [[f64; 4]; 32] = [
    [0.0, 1.0, 1.0, 1.0], [0.0, 1.0, 1.0, -1.0], [0.0, 1.0, -1.0, 1.0], [0.0, 1.0, -1.0, -1.0],
    [0.0, -1.0, 1.0, 1.0], [0.0, -1.0, 1.0, -1.0], [0.0, -1.0, -1.0, 1.0], [0.0, -1.0, -1.0, -1.0],
    [1.0, 0.0, 1.0, 1.0], [1.0, 0.0, 1.0, -1.0], [1.0, 0.0, -1.0, 1.0], [1.0, 0.0, -1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0], [-1.0, 0.0, 1.0, -1.0], [-1.0, 0.0, -1.0, 1.0], [-1.0, 0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0, 1.0], [1.0, 1.0, 0.0, -1.0], [1.0, -1.0, 0.0, 1.0], [1.0, -1.0, 0.0, -1.0],
    [-1.0, 1.0, 0.0, 1.0], [-1.0, 1.0, 0.0, -1.0], [-1.0, -1.0, 0.0, 1.0], [-1.0, -1.0, 0.0, -1.0],
    [1.0, 1.0, 1.0, 0.0], [1.0, 1.0, -1.0, 0.0], [1.0, -1.0, 1.0, 0.0], [1.0, -1.0, -1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0], [-1.0, 1.0, -1.0, 0.0], [-1.0, -1.0, 1.0, 0.0], [-1.0, -1.0, -1.0, 0.0],
];

/// Seeded 4D simplex noise generator with octave summation
#[derive(Clone)]
pub struct SimplexNoise {
    config: NoiseConfig,
    /// Permutation table, doubled so lookups never need wrapping
    perm: [u8; 512],
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SimplexNoise {
    /// Create a generator, shuffling the permutation table from `rng`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the configuration fails [`NoiseConfig::validate`].
    pub fn new(config: NoiseConfig, rng: &mut Alea) -> Result<Self> {
        config.validate()?;

        let mut p = [0u8; 256];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates driven by the float stream
        for i in (1..256usize).rev() {
            let n = ((i + 1) as f64 * rng.next_f64()).floor() as usize;
            p.swap(i, n.min(i));
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Ok(Self { config, perm })
    }

    /// Create a generator seeded directly from a string
    pub fn from_seed(config: NoiseConfig, seed: &str) -> Result<Self> {
        Self::new(config, &mut Alea::new(seed))
    }

    /// The configuration this generator was built with
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Octave noise at a 4D point, mapped into `[min, max]`
    pub fn sample_4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let mut amplitude = self.config.amplitude;
        let mut frequency = self.config.frequency;
        let mut max_amplitude = 0.0;
        let mut noise = 0.0;

        for _ in 0..self.config.octaves {
            noise += self.raw_4d(x * frequency, y * frequency, z * frequency, w * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.config.persistence;
            frequency *= 2.0;
        }

        self.scale(noise / max_amplitude)
    }

    /// Map a value from `[-1, 1]` into the configured output range
    #[inline]
    fn scale(&self, value: f64) -> f64 {
        self.config.min + ((value + 1.0) / 2.0) * (self.config.max - self.config.min)
    }

    #[inline]
    fn gradient_index(&self, i: usize, j: usize, k: usize, l: usize) -> usize {
        let perm = &self.perm;
        let inner = perm[k + perm[l] as usize] as usize;
        (perm[i + perm[j + inner] as usize] % 32) as usize
    }

    /// Single-octave 4D simplex noise, approximately in `[-1, 1]`
    pub fn raw_4d(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        // Skew the input space to find the containing cell of 24 simplices
        let s = (x + y + z + w) * F4;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let l = (w + s).floor();
        let t = (i + j + k + l) * G4;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);
        let w0 = w - (l - t);

        // Rank the coordinates to pick the simplex traversal order
        let mut rank_x = 0;
        let mut rank_y = 0;
        let mut rank_z = 0;
        let mut rank_w = 0;
        if x0 > y0 { rank_x += 1; } else { rank_y += 1; }
        if x0 > z0 { rank_x += 1; } else { rank_z += 1; }
        if x0 > w0 { rank_x += 1; } else { rank_w += 1; }
        if y0 > z0 { rank_y += 1; } else { rank_z += 1; }
        if y0 > w0 { rank_y += 1; } else { rank_w += 1; }
        if z0 > w0 { rank_z += 1; } else { rank_w += 1; }

        let offset = |rank: i32, threshold: i32| usize::from(rank >= threshold);
        let (i1, j1, k1, l1) = (offset(rank_x, 3), offset(rank_y, 3), offset(rank_z, 3), offset(rank_w, 3));
        let (i2, j2, k2, l2) = (offset(rank_x, 2), offset(rank_y, 2), offset(rank_z, 2), offset(rank_w, 2));
        let (i3, j3, k3, l3) = (offset(rank_x, 1), offset(rank_y, 1), offset(rank_z, 1), offset(rank_w, 1));

        let corners = [
            [x0, y0, z0, w0],
            [x0 - i1 as f64 + G4, y0 - j1 as f64 + G4, z0 - k1 as f64 + G4, w0 - l1 as f64 + G4],
            [
                x0 - i2 as f64 + 2.0 * G4,
                y0 - j2 as f64 + 2.0 * G4,
                z0 - k2 as f64 + 2.0 * G4,
                w0 - l2 as f64 + 2.0 * G4,
            ],
            [
                x0 - i3 as f64 + 3.0 * G4,
                y0 - j3 as f64 + 3.0 * G4,
                z0 - k3 as f64 + 3.0 * G4,
                w0 - l3 as f64 + 3.0 * G4,
            ],
            [x0 - 1.0 + 4.0 * G4, y0 - 1.0 + 4.0 * G4, z0 - 1.0 + 4.0 * G4, w0 - 1.0 + 4.0 * G4],
        ];

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;
        let ll = (l as i64 & 255) as usize;
        let gradients = [
            self.gradient_index(ii, jj, kk, ll),
            self.gradient_index(ii + i1, jj + j1, kk + k1, ll + l1),
            self.gradient_index(ii + i2, jj + j2, kk + k2, ll + l2),
            self.gradient_index(ii + i3, jj + j3, kk + k3, ll + l3),
            self.gradient_index(ii + 1, jj + 1, kk + 1, ll + 1),
        ];

        let total: f64 = corners
            .iter()
            .zip(gradients)
            .map(|(c, gi)| {
                let t = 0.5 - c[0] * c[0] - c[1] * c[1] - c[2] * c[2] - c[3] * c[3];
                if t < 0.0 {
                    0.0
                } else {
                    let t2 = t * t;
                    let g = GRAD4[gi];
                    t2 * t2 * (g[0] * c[0] + g[1] * c[1] + g[2] * c[2] + g[3] * c[3])
                }
            })
            .sum();

        RAW_SCALE * total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(seed: &str, config: NoiseConfig) -> SimplexNoise {
        SimplexNoise::from_seed(config, seed).unwrap()
    }

    #[test]
    fn test_permutation_is_a_shuffle() {
        let n = noise("perm", NoiseConfig::default());
        let mut seen = [false; 256];
        for &v in &n.perm[..256] {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "permutation must contain every byte once");
        assert_eq!(&n.perm[..256], &n.perm[256..]);
    }

    #[test]
    fn test_determinism() {
        let a = noise("abc", NoiseConfig::default());
        let b = noise("abc", NoiseConfig::default());
        for i in 0..50 {
            let p = i as f64 * 0.37;
            assert_eq!(a.sample_4d(p, -p, p * 0.5, 1.0 - p), b.sample_4d(p, -p, p * 0.5, 1.0 - p));
        }
    }

    #[test]
    fn test_different_seeds() {
        let a = noise("abc", NoiseConfig::default());
        let b = noise("xyz", NoiseConfig::default());
        let differs = (0..20).any(|i| {
            let p = i as f64 * 0.61 + 0.1;
            a.raw_4d(p, p * 1.3, -p, 0.2) != b.raw_4d(p, p * 1.3, -p, 0.2)
        });
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn test_raw_range() {
        let n = noise("range", NoiseConfig::default());
        for i in 0..2000 {
            let f = i as f64;
            let v = n.raw_4d(f * 0.113, f * -0.071, f * 0.037 + 3.0, f * 0.29 - 7.0);
            assert!((-1.2..=1.2).contains(&v), "raw noise {} out of range", v);
        }
    }

    #[test]
    fn test_zero_at_lattice_origin() {
        // Every corner contribution vanishes or cancels at the origin
        let n = noise("origin", NoiseConfig::default());
        assert!(n.raw_4d(0.0, 0.0, 0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_range() {
        let config = NoiseConfig {
            amplitude: 0.4,
            frequency: 0.5,
            octaves: 6,
            persistence: 0.5,
            min: 0.0,
            max: 255.0,
        };
        let n = noise("scaled", config);
        for i in 0..500 {
            let f = i as f64 * 0.77;
            let v = n.sample_4d(f, f.sin() * 4.0, f.cos() * 9.0, -f);
            assert!((-30.0..=285.0).contains(&v), "scaled noise {} out of range", v);
        }
    }

    #[test]
    fn test_invalid_range_rejected() {
        let config = NoiseConfig::default().with_range(1.0, 1.0);
        assert!(matches!(
            SimplexNoise::from_seed(config, "x"),
            Err(PlanetError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let config = NoiseConfig { octaves: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let base = NoiseConfig::default();
        for config in [
            NoiseConfig { amplitude: f64::INFINITY, ..base },
            NoiseConfig { amplitude: f64::NAN, ..base },
            NoiseConfig { persistence: f64::INFINITY, ..base },
            NoiseConfig { persistence: 0.0, ..base },
            NoiseConfig { frequency: f64::NEG_INFINITY, ..base },
            base.with_range(0.0, f64::INFINITY),
            base.with_range(f64::NEG_INFINITY, 0.0),
        ] {
            assert!(
                matches!(config.validate(), Err(PlanetError::InvalidArgument(_))),
                "{:?} should be rejected",
                config
            );
        }
        assert!(base.validate().is_ok());
    }
}
