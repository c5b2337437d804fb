//! Base icosahedron
//!
//! Twelve vertices at golden-ratio coordinates with fixed connectivity.
//! Face edges here are listed in ring order: ring edge `i` joins face node
//! `i` and face node `i + 1`.

use glam::DVec3;

pub(super) const NODE_COUNT: usize = 12;

/// Endpoint pairs of the 30 base edges
pub(super) const EDGES: [[usize; 2]; 30] = [
    [0, 1], [0, 4], [0, 5], [0, 8], [0, 10],
    [1, 6], [1, 7], [1, 8], [1, 10],
    [2, 3], [2, 4], [2, 5], [2, 9], [2, 11],
    [3, 6], [3, 7], [3, 9], [3, 11],
    [4, 5], [4, 8], [4, 9],
    [5, 10], [5, 11],
    [6, 7], [6, 8], [6, 9],
    [7, 10], [7, 11],
    [8, 9],
    [10, 11],
];

/// Base faces as (nodes, ring edges)
pub(super) const FACES: [([usize; 3], [usize; 3]); 20] = [
    ([0, 1, 8], [0, 7, 3]),
    ([0, 4, 5], [1, 18, 2]),
    ([0, 5, 10], [2, 21, 4]),
    ([0, 8, 4], [3, 19, 1]),
    ([0, 10, 1], [4, 8, 0]),
    ([1, 6, 8], [5, 24, 7]),
    ([1, 7, 6], [6, 23, 5]),
    ([1, 10, 7], [8, 26, 6]),
    ([2, 3, 11], [9, 17, 13]),
    ([2, 4, 9], [10, 20, 12]),
    ([2, 5, 4], [11, 18, 10]),
    ([2, 9, 3], [12, 16, 9]),
    ([2, 11, 5], [13, 22, 11]),
    ([3, 6, 7], [14, 23, 15]),
    ([3, 7, 11], [15, 27, 17]),
    ([3, 9, 6], [16, 25, 14]),
    ([4, 8, 9], [19, 28, 20]),
    ([5, 11, 10], [22, 29, 21]),
    ([6, 9, 8], [25, 28, 24]),
    ([7, 10, 11], [26, 29, 27]),
];

/// Unit-length vertex positions
pub(super) fn positions() -> [DVec3; NODE_COUNT] {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let du = 1.0 / (phi * phi + 1.0).sqrt();
    let dv = phi * du;

    [
        DVec3::new(0.0, dv, du),
        DVec3::new(0.0, dv, -du),
        DVec3::new(0.0, -dv, du),
        DVec3::new(0.0, -dv, -du),
        DVec3::new(du, 0.0, dv),
        DVec3::new(-du, 0.0, dv),
        DVec3::new(du, 0.0, -dv),
        DVec3::new(-du, 0.0, -dv),
        DVec3::new(dv, du, 0.0),
        DVec3::new(dv, -du, 0.0),
        DVec3::new(-dv, du, 0.0),
        DVec3::new(-dv, -du, 0.0),
    ]
}
