//! Landing-site search and carving.
//!
//! Rows are scanned from the bottom of the grid upward. The first row that
//! holds a run of at least `min_floor_streak` floored cells becomes the
//! landing row; a fixed pad centred on the run is cleared to bare floor and
//! the vehicle's starting position is returned.

use serde::{Deserialize, Serialize};

use crate::cell::{CellGrid, FloorMaterial};
use crate::error::TerrainError;

/// Landing pad and vehicle footprint, in cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingParams {
    /// Minimum contiguous run of floored cells that qualifies a row.
    pub min_floor_streak: usize,
    /// Width of the carved pad.
    pub pad_width: usize,
    /// Height of the carved pad (rows at and above the landing row).
    pub pad_height: usize,
    /// Width of the starting vehicle.
    pub vehicle_width: f64,
    /// Height of the starting vehicle.
    pub vehicle_height: f64,
}

impl Default for LandingParams {
    fn default() -> Self {
        Self {
            min_floor_streak: 4,
            pad_width: 4,
            pad_height: 2,
            vehicle_width: 2.0,
            vehicle_height: 1.5,
        }
    }
}

impl LandingParams {
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidParams`] if the pad is empty, larger
    /// than the grid, or too small for the vehicle.
    pub fn validate(&self, grid_size: usize) -> Result<(), TerrainError> {
        if self.min_floor_streak == 0 {
            return Err(TerrainError::InvalidParams("min_floor_streak must be positive".into()));
        }
        if self.pad_width == 0 || self.pad_height == 0 {
            return Err(TerrainError::InvalidParams("landing pad must not be empty".into()));
        }
        if self.pad_width > grid_size || self.pad_height > grid_size {
            return Err(TerrainError::InvalidParams(format!(
                "landing pad {}x{} does not fit a {grid_size}x{grid_size} grid",
                self.pad_width, self.pad_height
            )));
        }
        let fits = |v: f64, limit: usize| v.is_finite() && v > 0.0 && v <= limit as f64;
        if !fits(self.vehicle_width, self.pad_width) || !fits(self.vehicle_height, self.pad_height) {
            return Err(TerrainError::InvalidParams(format!(
                "vehicle {}x{} does not fit the {}x{} pad",
                self.vehicle_width, self.vehicle_height, self.pad_width, self.pad_height
            )));
        }
        Ok(())
    }
}

/// Top-left corner of the starting vehicle, in grid-cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartingPosition {
    pub x: f64,
    pub y: f64,
}

impl StartingPosition {
    /// The grid cell containing this position.
    pub fn cell(&self) -> (usize, usize) {
        (self.x.floor() as usize, self.y.floor() as usize)
    }
}

/// Finds the landing row and clears the pad in place.
pub struct LandingSiteCarver {
    params: LandingParams,
}

impl LandingSiteCarver {
    pub fn new(params: LandingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LandingParams {
        &self.params
    }

    /// Locate the landing row as `(row, centre_column)`.
    ///
    /// A streak ends at a non-floored cell or at the end of the row.
    pub fn find_site(&self, grid: &CellGrid) -> Option<(usize, usize)> {
        let min = self.params.min_floor_streak;
        for y in (0..grid.size()).rev() {
            let row = grid.row(y);
            let mut streak = 0;
            for x in 0..=row.len() {
                let floored = row.get(x).is_some_and(|c| c.floor.is_some());
                if floored {
                    streak += 1;
                    continue;
                }
                if streak >= min {
                    let start = x - streak;
                    return Some((y, start + streak / 2));
                }
                streak = 0;
            }
        }
        None
    }

    /// Carve the pad into `grid` and return the vehicle start.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NoLandingSite`] if no row qualifies, or
    /// [`TerrainError::InvalidParams`] if the pad does not fit the grid. The
    /// grid is left untouched in both cases.
    pub fn carve(&self, grid: &mut CellGrid, seed: u64) -> Result<StartingPosition, TerrainError> {
        self.params.validate(grid.size())?;
        let (row, center) = self.find_site(grid).ok_or(TerrainError::NoLandingSite {
            grid_size: grid.size(),
            seed,
        })?;

        let size = grid.size();
        let p = &self.params;
        let left = center.saturating_sub(p.pad_width / 2).min(size - p.pad_width);
        let bottom = row.max(p.pad_height - 1);
        let top = bottom + 1 - p.pad_height;

        for y in top..=bottom {
            for x in left..left + p.pad_width {
                let cell = grid.get_mut(x, y);
                cell.wall = None;
                cell.floor = Some(FloorMaterial::Floor);
            }
        }
        log::debug!(
            "landing pad carved at rows {top}..={bottom}, columns {left}..{}",
            left + p.pad_width
        );

        Ok(StartingPosition {
            x: left as f64 + (p.pad_width as f64 - p.vehicle_width) / 2.0,
            y: (bottom + 1) as f64 - p.vehicle_height,
        })
    }
}
