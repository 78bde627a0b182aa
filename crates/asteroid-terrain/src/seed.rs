//! Deterministic math and grid hashing for reproducible generation.
//!
//! Angle and distance computations go through `libm` rather than the
//! platform libc so identical seeds give identical grids on every target.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::cell::CellGrid;

/// Deterministic square root.
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Deterministic `atan2(dy, dx)` in degrees, normalized to `[0, 360)`.
#[inline]
pub fn det_atan2_degrees(dy: f64, dx: f64) -> f64 {
    let degrees = libm::atan2(dy, dx).to_degrees();
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Hash every cell of a grid into a u64 digest for determinism comparison.
pub fn hash_grid(grid: &CellGrid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.size().hash(&mut hasher);
    for (_, _, cell) in grid.iter() {
        cell.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, DepthLayer, WallMaterial};

    #[test]
    fn test_atan2_degrees_quadrants() {
        let cases = [
            ((0.0, 1.0), 0.0),
            ((1.0, 0.0), 90.0),
            ((0.0, -1.0), 180.0),
            ((-1.0, 0.0), 270.0),
            ((-1.0, 1.0), 315.0),
        ];
        for ((dy, dx), expected) in cases {
            let got = det_atan2_degrees(dy, dx);
            assert!((got - expected).abs() < 1e-9, "atan2({dy}, {dx}) = {got}, expected {expected}");
        }
    }

    #[test]
    fn test_atan2_degrees_range() {
        for i in 0..720 {
            let theta = (i as f64).to_radians() * 0.5 - std::f64::consts::PI;
            let got = det_atan2_degrees(theta.sin(), theta.cos());
            assert!((0.0..360.0).contains(&got), "angle {got} outside [0, 360)");
        }
    }

    #[test]
    fn test_det_sqrt_matches_known_values() {
        assert_eq!(det_sqrt(16.0), 4.0);
        assert_eq!(det_sqrt(0.0), 0.0);
    }

    #[test]
    fn test_hash_grid_detects_single_cell_change() {
        let a = CellGrid::new(8);
        let mut b = a.clone();
        assert_eq!(hash_grid(&a), hash_grid(&b));

        b.set(5, 2, Cell::new(Some(WallMaterial::Ruby), None, DepthLayer::Core));
        assert_ne!(hash_grid(&a), hash_grid(&b), "changing one cell must change the hash");
    }
}
