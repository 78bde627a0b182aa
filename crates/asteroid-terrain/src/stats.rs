//! Material and layer histograms for a generated grid.

use std::collections::BTreeMap;

use crate::cell::{CellGrid, DepthLayer, FloorMaterial, WallMaterial};

/// Cell counts by category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridStats {
    pub total: usize,
    pub empty: usize,
    pub solid: usize,
    pub open_floor: usize,
    pub walls: BTreeMap<String, usize>,
    pub floors: BTreeMap<String, usize>,
    pub layers: BTreeMap<String, usize>,
}

impl GridStats {
    pub fn collect(grid: &CellGrid) -> Self {
        let mut stats = Self::default();
        for (_, _, cell) in grid.iter() {
            stats.total += 1;
            if cell.is_empty() {
                stats.empty += 1;
            }
            if cell.is_solid() {
                stats.solid += 1;
            }
            if cell.is_open_floor() {
                stats.open_floor += 1;
            }
            if let Some(wall) = cell.wall {
                *stats.walls.entry(wall_name(wall).to_string()).or_default() += 1;
            }
            if let Some(floor) = cell.floor {
                *stats.floors.entry(floor_name(floor).to_string()).or_default() += 1;
            }
            *stats.layers.entry(layer_name(cell.layer).to_string()).or_default() += 1;
        }
        stats
    }

    pub fn wall_count(&self, wall: WallMaterial) -> usize {
        self.walls.get(wall_name(wall)).copied().unwrap_or(0)
    }

    pub fn layer_count(&self, layer: DepthLayer) -> usize {
        self.layers.get(layer_name(layer)).copied().unwrap_or(0)
    }
}

fn wall_name(wall: WallMaterial) -> &'static str {
    match wall {
        WallMaterial::SolidRock => "solid_rock",
        WallMaterial::LooseRock => "loose_rock",
        WallMaterial::Rock => "rock",
        WallMaterial::Nickel => "nickel",
        WallMaterial::Gold => "gold",
        WallMaterial::Ruby => "ruby",
        WallMaterial::Diamond => "diamond",
        WallMaterial::ExplosiveRock => "explosive_rock",
    }
}

fn floor_name(floor: FloorMaterial) -> &'static str {
    match floor {
        FloorMaterial::Floor => "floor",
        FloorMaterial::Lava => "lava",
        FloorMaterial::LavaCracks => "lava_cracks",
    }
}

fn layer_name(layer: DepthLayer) -> &'static str {
    match layer {
        DepthLayer::None => "none",
        DepthLayer::Crust => "crust",
        DepthLayer::Mantle => "mantle",
        DepthLayer::Core => "core",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn test_counts_partition_the_grid() {
        let mut grid = CellGrid::new(4);
        grid.set(0, 0, Cell::new(Some(WallMaterial::Gold), Some(FloorMaterial::Floor), DepthLayer::Core));
        grid.set(1, 0, Cell::new(None, Some(FloorMaterial::Lava), DepthLayer::Core));
        grid.set(2, 0, Cell::new(Some(WallMaterial::Gold), None, DepthLayer::Mantle));

        let stats = GridStats::collect(&grid);
        assert_eq!(stats.total, 16);
        assert_eq!(stats.empty, 13);
        assert_eq!(stats.solid, 2);
        assert_eq!(stats.open_floor, 1);
        assert_eq!(stats.wall_count(WallMaterial::Gold), 2);
        assert_eq!(stats.wall_count(WallMaterial::Diamond), 0);
        assert_eq!(stats.floors.get("lava"), Some(&1));
        assert_eq!(stats.layer_count(DepthLayer::Core), 2);
        assert_eq!(stats.layer_count(DepthLayer::None), 13);
        assert_eq!(stats.layers.values().sum::<usize>(), stats.total);
    }
}
