//! String-seeded deterministic PRNG
//!
//! Alea (Johannes Baagøe, 2010): a small multiply-with-carry generator whose
//! state is derived by hashing a seed string. Every terrain field permutation
//! table is shuffled from one of these streams, so identical seed strings
//! always produce identical planets.

use rand::RngCore;

/// 2^-32
const TWO_POW_NEG_32: f64 = 2.328_306_436_538_696_3e-10;
/// 2^32
const TWO_POW_32: f64 = 4_294_967_296.0;
/// 2^-53
const TWO_POW_NEG_53: f64 = 1.110_223_024_625_156_5e-16;

/// Deterministic floating-point stream in `[0, 1)` seeded from a string
#[derive(Debug, Clone, PartialEq)]
pub struct Alea {
    seed: String,
    s0: f64,
    s1: f64,
    s2: f64,
    c: f64,
}

impl Alea {
    /// Create a generator from a seed string
    ///
    /// An empty seed is treated as `"0"`.
    ///
    /// # Example
    ///
    /// ```
    /// use geodesic_planet::Alea;
    ///
    /// let mut a = Alea::new("abc");
    /// let mut b = Alea::new("abc");
    /// assert_eq!(a.next_f64(), b.next_f64());
    /// ```
    pub fn new(seed: &str) -> Self {
        let seed = if seed.is_empty() { "0".to_string() } else { seed.to_string() };

        let blank = mash(' ' as u16);
        let mut s0 = blank;
        let mut s1 = blank;
        let mut s2 = blank;

        for unit in seed.encode_utf16() {
            let m = mash(unit);
            s0 -= m;
            if s0 < 0.0 {
                s0 += 1.0;
            }
            s1 -= m;
            if s1 < 0.0 {
                s1 += 1.0;
            }
            s2 -= m;
            if s2 < 0.0 {
                s2 += 1.0;
            }
        }

        Self { seed, s0, s1, s2, c: 1.0 }
    }

    /// The seed string this stream was created from
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Next value in `[0, 1)` with 32 bits of randomness
    pub fn next_f64(&mut self) -> f64 {
        let t = 2_091_639.0 * self.s0 + self.c * TWO_POW_NEG_32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.trunc();
        self.s2 = t - self.c;
        self.s2
    }

    /// Next value in `[0, 1)` with 53 bits of randomness (consumes two steps)
    pub fn next_fract53(&mut self) -> f64 {
        let hi = self.next_f64();
        let lo = (self.next_f64() * 2_097_152.0).trunc();
        hi + lo * TWO_POW_NEG_53
    }
}

impl RngCore for Alea {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * TWO_POW_32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Emulates the unsigned 32-bit truncation used by the Mash hash
#[inline]
fn to_u32(x: f64) -> f64 {
    x.trunc().rem_euclid(TWO_POW_32)
}

/// Mash hash of a single UTF-16 code unit, mapped to `[0, 1)`
fn mash(unit: u16) -> f64 {
    let mut n: f64 = 0xefc8_249d_u32 as f64;

    n += unit as f64;
    let mut h = 0.025_196_032_824_169_38 * n;
    n = to_u32(h);
    h -= n;
    h *= n;
    n = to_u32(h);
    h -= n;
    n += h * TWO_POW_32;

    to_u32(n) * TWO_POW_NEG_32
}
