//! Composed generation pipeline: profile → population → landing site.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::cell::CellGrid;
use crate::error::TerrainError;
use crate::landing::{LandingParams, LandingSiteCarver, StartingPosition};
use crate::noise_source::NoiseChannel;
use crate::populate::GridPopulator;
use crate::profile::{ProfileParams, RadialProfile};
use crate::rules::{MaterialRuleSet, default_rules};
use crate::stats::GridStats;

/// All tunable constants of one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Radial silhouette shape.
    pub profile: ProfileParams,
    /// Spatial frequency of noise channel 1 (fine detail).
    pub perlin1_noise_scale: f64,
    /// Spatial frequency of noise channel 2 (coarse structure).
    pub perlin2_noise_scale: f64,
    /// Fraction of the local radius inside which cells are core.
    pub core_radius: f64,
    /// Fraction of the local radius inside which cells are mantle.
    pub mantle_radius: f64,
    /// Landing pad and vehicle footprint.
    pub landing: LandingParams,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            profile: ProfileParams::default(),
            perlin1_noise_scale: 0.09,
            perlin2_noise_scale: 0.035,
            core_radius: 0.3,
            mantle_radius: 0.7,
            landing: LandingParams::default(),
        }
    }
}

impl GenerationParams {
    /// Validate the parameters against a grid size.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidGridSize`] for a zero grid and
    /// [`TerrainError::InvalidParams`] for any out-of-range constant.
    pub fn validate(&self, grid_size: usize) -> Result<(), TerrainError> {
        if grid_size == 0 {
            return Err(TerrainError::InvalidGridSize(grid_size));
        }
        self.profile.validate()?;
        self.landing.validate(grid_size)?;

        let scales = [self.perlin1_noise_scale, self.perlin2_noise_scale];
        if scales.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(TerrainError::InvalidParams(format!(
                "noise scales must be positive: {}, {}",
                self.perlin1_noise_scale, self.perlin2_noise_scale
            )));
        }
        let fraction = |v: f64| v.is_finite() && v >= 0.0;
        if !fraction(self.core_radius) || !fraction(self.mantle_radius) || self.core_radius > self.mantle_radius {
            return Err(TerrainError::InvalidParams(format!(
                "depth thresholds must satisfy 0 <= core ({}) <= mantle ({})",
                self.core_radius, self.mantle_radius
            )));
        }
        Ok(())
    }
}

/// A generated asteroid: the carved grid and where the vehicle starts.
#[derive(Clone, Debug)]
pub struct Asteroid {
    pub grid: CellGrid,
    pub start: StartingPosition,
    /// The seed that produced this asteroid.
    pub seed: u64,
}

/// Reusable generator holding validated parameters and the rule table.
pub struct AsteroidGenerator {
    params: GenerationParams,
    rules: MaterialRuleSet,
}

impl AsteroidGenerator {
    /// Create a generator with the stock rule table.
    pub fn new(params: GenerationParams) -> Self {
        Self::with_rules(params, default_rules())
    }

    /// Create a generator with a custom rule table.
    pub fn with_rules(params: GenerationParams, rules: MaterialRuleSet) -> Self {
        Self { params, rules }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn rules(&self) -> &MaterialRuleSet {
        &self.rules
    }

    /// Generate one asteroid. Fails outright; no partial grid is returned.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`GenerationParams::validate`], or
    /// [`TerrainError::NoLandingSite`] if the terrain has no landing row.
    pub fn generate(&self, grid_size: usize, seed: u64) -> Result<Asteroid, TerrainError> {
        self.params.validate(grid_size)?;
        if self.params.profile.max_extent() > grid_size as f64 / 2.0 {
            log::warn!(
                "body extent {:.1} exceeds half the grid ({grid_size}); silhouette will be clipped",
                self.params.profile.max_extent()
            );
        }

        let started = Instant::now();
        let profile = RadialProfile::build(&self.params.profile, seed)?;
        let (noise1, noise2) = NoiseChannel::pair(seed);
        let populator = GridPopulator::new(&self.params, profile, noise1, noise2, self.rules.clone());
        let mut grid = populator.populate(grid_size);
        log::debug!(
            "populated {grid_size}x{grid_size} grid for seed {seed} in {:?}",
            started.elapsed()
        );

        let carver = LandingSiteCarver::new(self.params.landing.clone());
        let start = carver.carve(&mut grid, seed)?;

        let stats = GridStats::collect(&grid);
        log::debug!(
            "seed {seed}: {} solid, {} open floor, {} empty cells; start at ({:.2}, {:.2})",
            stats.solid,
            stats.open_floor,
            stats.empty,
            start.x,
            start.y
        );

        Ok(Asteroid { grid, start, seed })
    }

    /// Generate, moving on to `seed + 1`, `seed + 2`, … when no landing site
    /// exists. At most `attempts` seeds are tried.
    ///
    /// # Errors
    ///
    /// Configuration errors are returned immediately; if every attempt lacks
    /// a landing site the last [`TerrainError::NoLandingSite`] is returned.
    pub fn generate_with_retries(
        &self,
        grid_size: usize,
        seed: u64,
        attempts: u32,
    ) -> Result<Asteroid, TerrainError> {
        let mut last = TerrainError::NoLandingSite { grid_size, seed };
        for attempt in 0..attempts.max(1) {
            let candidate = seed.wrapping_add(u64::from(attempt));
            match self.generate(grid_size, candidate) {
                Ok(asteroid) => return Ok(asteroid),
                Err(err @ TerrainError::NoLandingSite { .. }) => {
                    log::warn!("seed {candidate} has no landing site, retrying");
                    last = err;
                }
                Err(err) => return Err(err),
            }
        }
        Err(last)
    }
}

/// Generate an asteroid with default parameters and rules.
pub fn generate(grid_size: usize, seed: u64) -> Result<(CellGrid, StartingPosition), TerrainError> {
    let asteroid = AsteroidGenerator::new(GenerationParams::default()).generate(grid_size, seed)?;
    Ok((asteroid.grid, asteroid.start))
}

/// [`generate`] with caller-side retries on a missing landing site.
pub fn generate_with_retries(grid_size: usize, seed: u64, attempts: u32) -> Result<Asteroid, TerrainError> {
    AsteroidGenerator::new(GenerationParams::default()).generate_with_retries(grid_size, seed, attempts)
}
