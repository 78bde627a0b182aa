//! Radial silhouette profile: per-angle base radius and perimeter thickness.
//!
//! The radius is a clamped random walk around the average radius, smoothed
//! with a circular moving average so the outline wobbles organically rather
//! than jaggedly. Perimeter thickness is independent uniform noise smoothed
//! the same way.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Shape controls for the radial profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileParams {
    /// Number of angle buckets around the centre.
    pub angle_segments: usize,
    /// Mean body radius in cells.
    pub average_radius: f64,
    /// Maximum distance the radius may stray from the average.
    pub max_deviation: f64,
    /// Maximum change between neighbouring segments in the random walk.
    pub max_delta: f64,
    /// Half-window of the radius moving average (`window = 2 * factor + 1`).
    pub radius_smoothing: usize,
    /// Inclusive lower bound of raw perimeter thickness.
    pub perimeter_min: u32,
    /// Exclusive upper bound of raw perimeter thickness.
    pub perimeter_max: u32,
    /// Half-window of the perimeter moving average.
    pub perimeter_smoothing: usize,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            angle_segments: 360,
            average_radius: 80.0,
            max_deviation: 14.0,
            max_delta: 1.5,
            radius_smoothing: 10,
            perimeter_min: 2,
            perimeter_max: 6,
            perimeter_smoothing: 4,
        }
    }
}

impl ProfileParams {
    /// Check that the parameters describe a buildable profile.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidParams`] on zero segments, a negative
    /// or non-finite radius shape, an empty perimeter range, or a body whose
    /// smallest local extent is zero.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.angle_segments == 0 {
            return Err(TerrainError::InvalidParams("angle_segments must be positive".into()));
        }
        let shape = [self.average_radius, self.max_deviation, self.max_delta];
        if shape.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(TerrainError::InvalidParams(format!(
                "radius shape must be finite and non-negative: average={}, deviation={}, delta={}",
                self.average_radius, self.max_deviation, self.max_delta
            )));
        }
        if self.max_deviation > self.average_radius {
            return Err(TerrainError::InvalidParams(format!(
                "max_deviation {} exceeds average_radius {}",
                self.max_deviation, self.average_radius
            )));
        }
        if self.perimeter_min >= self.perimeter_max {
            return Err(TerrainError::InvalidParams(format!(
                "perimeter range [{}, {}) is empty",
                self.perimeter_min, self.perimeter_max
            )));
        }
        // Distance percentages divide by the local extent, which must stay positive.
        let min_extent = self.average_radius - self.max_deviation + f64::from(self.perimeter_min);
        if self.average_radius <= 0.0 || min_extent <= 0.0 {
            return Err(TerrainError::InvalidParams(format!(
                "body has no size: average_radius={}, smallest extent={min_extent}",
                self.average_radius
            )));
        }
        Ok(())
    }

    /// Largest extent from the centre the body can reach, in cells.
    pub fn max_extent(&self) -> f64 {
        self.average_radius + self.max_deviation + f64::from(self.perimeter_max)
    }
}

/// Read-only per-angle radius and perimeter arrays for one asteroid.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialProfile {
    radii: Vec<f64>,
    perimeter: Vec<u32>,
}

impl RadialProfile {
    /// Build a profile from `params` and `seed`.
    ///
    /// Identical inputs always produce identical arrays.
    pub fn build(params: &ProfileParams, seed: u64) -> Result<Self, TerrainError> {
        params.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let low = params.average_radius - params.max_deviation;
        let high = params.average_radius + params.max_deviation;

        let mut walk = Vec::with_capacity(params.angle_segments);
        let mut current = params.average_radius + symmetric(&mut rng, params.max_deviation);
        walk.push(current);
        for _ in 1..params.angle_segments {
            current = (current + symmetric(&mut rng, params.max_delta)).clamp(low, high);
            walk.push(current);
        }
        let radii = smooth_circular(&walk, params.radius_smoothing);

        let raw_perimeter: Vec<f64> = (0..params.angle_segments)
            .map(|_| f64::from(rng.random_range(params.perimeter_min..params.perimeter_max)))
            .collect();
        let perimeter = smooth_circular(&raw_perimeter, params.perimeter_smoothing)
            .into_iter()
            .map(|v| v.round() as u32)
            .collect();

        Ok(Self { radii, perimeter })
    }

    /// Assemble a profile from precomputed arrays of equal, non-zero length.
    pub fn from_parts(radii: Vec<f64>, perimeter: Vec<u32>) -> Result<Self, TerrainError> {
        if radii.is_empty() || radii.len() != perimeter.len() {
            return Err(TerrainError::InvalidParams(format!(
                "profile arrays must be non-empty and equal length ({} radii, {} perimeter)",
                radii.len(),
                perimeter.len()
            )));
        }
        Ok(Self { radii, perimeter })
    }

    pub fn segments(&self) -> usize {
        self.radii.len()
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn perimeter(&self) -> &[u32] {
        &self.perimeter
    }

    pub fn radius_at(&self, segment: usize) -> f64 {
        self.radii[segment % self.radii.len()]
    }

    pub fn perimeter_at(&self, segment: usize) -> u32 {
        self.perimeter[segment % self.perimeter.len()]
    }

    /// Map an angle in degrees (`[0, 360)`) to its segment index.
    pub fn segment_for_angle(&self, degrees: f64) -> usize {
        let segments = self.segments();
        let idx = (degrees * segments as f64 / 360.0).round() as usize;
        idx % segments
    }
}

fn symmetric(rng: &mut ChaCha8Rng, magnitude: f64) -> f64 {
    if magnitude > 0.0 {
        rng.random_range(-magnitude..=magnitude)
    } else {
        0.0
    }
}

/// Circular moving average with window `2 * factor + 1`.
///
/// Indices wrap modulo the slice length, so the first and last entries are
/// smoothed against each other. Each output lies within the input's range.
pub fn smooth_circular(values: &[f64], factor: usize) -> Vec<f64> {
    let len = values.len();
    if len == 0 || factor == 0 {
        return values.to_vec();
    }
    let window = 2 * factor + 1;
    (0..len)
        .map(|i| {
            let sum: f64 = (0..window)
                .map(|k| values[(i + len * window - factor + k) % len])
                .sum();
            sum / window as f64
        })
        .collect()
}
