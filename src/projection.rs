//! Miller cylindrical projection from sphere points to texture UV

use std::f64::consts::{FRAC_PI_4, PI};

use glam::{DVec2, DVec3};

/// Projected `y` at latitude ±90°, used to normalize into `[-1, 1]`
const MILLER_Y_MAX: f64 = 2.252_323_443_080_358_7;

/// UV coordinate of a point on (or off) the sphere
///
/// `u` follows longitude (`atan2(z, x)`), `v` follows Miller-projected
/// latitude; both are in `[0, 1]`. Only the direction of `p` matters. The
/// zero vector maps to the center of the texture.
///
/// # Example
///
/// ```rust
/// use geodesic_planet::miller_uv;
/// use glam::DVec3;
///
/// let uv = miller_uv(DVec3::new(5.0, 0.0, 0.0));
/// assert!((uv.x - 0.5).abs() < 1e-12);
/// assert!((uv.y - 0.5).abs() < 1e-12);
/// ```
pub fn miller_uv(p: DVec3) -> DVec2 {
    let length = p.length();
    if !(length > 0.0) {
        return DVec2::new(0.5, 0.5);
    }

    let lat = (p.y / length).clamp(-1.0, 1.0).asin();
    let lon = p.z.atan2(p.x);

    let x = lon / PI;
    let y = (1.25 * (FRAC_PI_4 + 0.4 * lat).tan().ln() / MILLER_Y_MAX).clamp(-1.0, 1.0);

    DVec2::new((x + 1.0) / 2.0, (y + 1.0) / 2.0)
}
