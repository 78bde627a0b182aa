//! Cell materials, depth layers, and the square cell grid.

use serde::{Deserialize, Serialize};

/// Material occupying the wall (foreground) layer of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallMaterial {
    /// Indestructible outer shell rock.
    SolidRock,
    /// Rubble that crumbles quickly.
    LooseRock,
    /// Ordinary minable rock.
    Rock,
    Nickel,
    Gold,
    Ruby,
    Diamond,
    /// Rock that detonates when mined.
    ExplosiveRock,
}

/// Material occupying the floor (background) layer of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorMaterial {
    Floor,
    Lava,
    LavaCracks,
}

/// Coarse geological zone of a cell, derived purely from geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthLayer {
    #[default]
    None,
    Crust,
    Mantle,
    Core,
}

/// One terrain cell. A cell with neither wall nor floor is empty space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub wall: Option<WallMaterial>,
    pub floor: Option<FloorMaterial>,
    pub layer: DepthLayer,
}

impl Cell {
    /// Empty space outside the body.
    pub const EMPTY: Self = Self {
        wall: None,
        floor: None,
        layer: DepthLayer::None,
    };

    pub fn new(wall: Option<WallMaterial>, floor: Option<FloorMaterial>, layer: DepthLayer) -> Self {
        Self { wall, floor, layer }
    }

    /// Returns `true` if the cell has neither a wall nor a floor.
    pub fn is_empty(&self) -> bool {
        self.wall.is_none() && self.floor.is_none()
    }

    /// Returns `true` if the cell blocks movement (any wall material).
    pub fn is_solid(&self) -> bool {
        self.wall.is_some()
    }

    /// Returns `true` if the cell has a floor and no wall.
    pub fn is_open_floor(&self) -> bool {
        self.wall.is_none() && self.floor.is_some()
    }
}

/// Square grid of cells addressed as `[x, y]`, stored row-major.
///
/// The size is fixed at construction; `y = 0` is the top row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Create a `size × size` grid filled with empty cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::EMPTY; size * size],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size, "({x}, {y}) outside grid of {}", self.size);
        y * self.size + x
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `[0, size)`.
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Returns the cell at `(x, y)`, or `None` if out of range.
    pub fn try_get(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.size && y < self.size).then(|| self.get(x, y))
    }

    /// Iterate over all cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (idx % size, idx / size, cell))
    }

    /// Returns the cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.size;
        &self.cells[start..start + self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_square_and_empty() {
        let grid = CellGrid::new(7);
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.iter().count(), 49);
        assert!(grid.iter().all(|(_, _, c)| c.is_empty()));
    }

    #[test]
    fn test_set_and_get_address_same_cell() {
        let mut grid = CellGrid::new(4);
        let cell = Cell::new(Some(WallMaterial::Gold), Some(FloorMaterial::Floor), DepthLayer::Mantle);
        grid.set(3, 1, cell);
        assert_eq!(*grid.get(3, 1), cell);
        assert_eq!(grid.row(1)[3], cell);
        assert!(grid.get(1, 3).is_empty(), "[x, y] must not be transposed");
    }

    #[test]
    fn test_iter_yields_xy_coordinates() {
        let mut grid = CellGrid::new(3);
        grid.get_mut(2, 0).floor = Some(FloorMaterial::Lava);
        let (x, y, _) = grid
            .iter()
            .find(|(_, _, c)| c.floor.is_some())
            .expect("one floored cell");
        assert_eq!((x, y), (2, 0));
    }

    #[test]
    fn test_try_get_out_of_range() {
        let grid = CellGrid::new(2);
        assert!(grid.try_get(1, 1).is_some());
        assert!(grid.try_get(2, 0).is_none());
        assert!(grid.try_get(0, 2).is_none());
    }

    #[test]
    fn test_solid_and_open_floor() {
        let rock = Cell::new(Some(WallMaterial::Rock), Some(FloorMaterial::Floor), DepthLayer::Crust);
        let cave = Cell::new(None, Some(FloorMaterial::Floor), DepthLayer::Crust);
        assert!(rock.is_solid());
        assert!(!rock.is_open_floor());
        assert!(!cave.is_solid());
        assert!(cave.is_open_floor());
        assert!(!Cell::EMPTY.is_solid());
    }
}
