//! Seeded 2D noise channels.

use noise::{NoiseFn, Perlin};

/// Seed offset applied to the second noise channel so both channels are
/// decorrelated yet reproducible from one base seed.
pub const NOISE2_SEED_OFFSET: u64 = 42;

/// A deterministic 2D Perlin noise field normalized to `[0.0, 1.0]`.
///
/// Holds no mutable state; sampling is pure and safe from multiple threads.
#[derive(Clone, Debug)]
pub struct NoiseChannel {
    perlin: Perlin,
    seed: u64,
}

impl NoiseChannel {
    /// Create a channel from the given seed (low 32 bits feed Perlin).
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(seed as u32),
            seed,
        }
    }

    /// Build the two channels used by one generation run.
    pub fn pair(seed: u64) -> (Self, Self) {
        (Self::new(seed), Self::new(seed.wrapping_add(NOISE2_SEED_OFFSET)))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample the field at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let raw = self.perlin.get([x, y]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_normalized() {
        let channel = NoiseChannel::new(7);
        for i in 0..2000 {
            let v = channel.sample(i as f64 * 0.137, i as f64 * 0.071);
            assert!((0.0..=1.0).contains(&v), "sample {v} outside [0, 1] at index {i}");
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = NoiseChannel::new(1234);
        let b = NoiseChannel::new(1234);
        for i in 0..500 {
            let (x, y) = (i as f64 * 0.31, i as f64 * 0.17);
            assert_eq!(a.sample(x, y), b.sample(x, y), "mismatch at index {i}");
        }
    }

    #[test]
    fn test_pair_channels_are_decorrelated() {
        let (first, second) = NoiseChannel::pair(99);
        assert_eq!(second.seed(), 99 + NOISE2_SEED_OFFSET);

        let differences = (0..500)
            .filter(|&i| {
                let (x, y) = (i as f64 * 0.23 + 0.5, i as f64 * 0.11 + 0.5);
                first.sample(x, y) != second.sample(x, y)
            })
            .count();
        assert!(differences > 400, "channels should differ almost everywhere, got {differences}");
    }

    #[test]
    fn test_channel_varies_spatially() {
        let channel = NoiseChannel::new(5);
        let values: Vec<f64> = (0..100).map(|i| channel.sample(i as f64 * 0.37, 3.3)).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.1, "noise should vary across space: range {min}..{max}");
    }
}
