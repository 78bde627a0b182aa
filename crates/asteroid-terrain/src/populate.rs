//! Per-cell grid population: geometry, noise sampling, rule classification,
//! and depth-layer derivation.

use crate::cell::{Cell, CellGrid, DepthLayer, FloorMaterial};
use crate::generator::GenerationParams;
use crate::noise_source::NoiseChannel;
use crate::profile::RadialProfile;
use crate::rules::MaterialRuleSet;
use crate::seed::{det_atan2_degrees, det_sqrt};

/// Fills a square grid with asteroid cells.
///
/// Each cell depends only on its own coordinates, so population order does
/// not affect the result.
pub struct GridPopulator {
    profile: RadialProfile,
    noise1: NoiseChannel,
    noise2: NoiseChannel,
    rules: MaterialRuleSet,
    noise1_scale: f64,
    noise2_scale: f64,
    core_radius: f64,
    mantle_radius: f64,
}

impl GridPopulator {
    pub fn new(
        params: &GenerationParams,
        profile: RadialProfile,
        noise1: NoiseChannel,
        noise2: NoiseChannel,
        rules: MaterialRuleSet,
    ) -> Self {
        Self {
            profile,
            noise1,
            noise2,
            rules,
            noise1_scale: params.perlin1_noise_scale,
            noise2_scale: params.perlin2_noise_scale,
            core_radius: params.core_radius,
            mantle_radius: params.mantle_radius,
        }
    }

    pub fn profile(&self) -> &RadialProfile {
        &self.profile
    }

    /// Populate a fresh `grid_size × grid_size` grid.
    pub fn populate(&self, grid_size: usize) -> CellGrid {
        let mut grid = CellGrid::new(grid_size);
        let center = grid_size as f64 / 2.0;
        for y in 0..grid_size {
            for x in 0..grid_size {
                grid.set(x, y, self.classify_cell(x, y, center));
            }
        }
        grid
    }

    /// Classify the cell at `(x, y)` relative to `center` (same on both axes).
    pub fn classify_cell(&self, x: usize, y: usize, center: f64) -> Cell {
        let (xf, yf) = (x as f64, y as f64);
        let dx = xf - center;
        let dy = yf - center;
        let distance = det_sqrt(dx * dx + dy * dy);

        let segment = self.profile.segment_for_angle(det_atan2_degrees(dy, dx));
        let radius = self.profile.radius_at(segment);
        let perimeter = f64::from(self.profile.perimeter_at(segment));
        let distance_percent = distance / (radius + perimeter);

        let n1 = self.noise1.sample(xf * self.noise1_scale, yf * self.noise1_scale);
        let n2 = self.noise2.sample(xf * self.noise2_scale, yf * self.noise2_scale);

        let (wall, floor) = self.rules.classify(distance_percent, n1, n2);
        let layer = self.depth_layer(distance, radius, floor);
        Cell::new(wall, floor, layer)
    }

    /// Geometric depth zone; the floor only decides between crust and nothing.
    pub fn depth_layer(&self, distance: f64, radius: f64, floor: Option<FloorMaterial>) -> DepthLayer {
        if distance < radius * self.core_radius {
            DepthLayer::Core
        } else if distance < radius * self.mantle_radius {
            DepthLayer::Mantle
        } else if floor.is_some() {
            DepthLayer::Crust
        } else {
            DepthLayer::None
        }
    }
}
