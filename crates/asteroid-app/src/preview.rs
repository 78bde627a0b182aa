//! ASCII dump of a generated grid for eyeballing terrain in a terminal.

use asteroid_terrain::{Cell, CellGrid, FloorMaterial, WallMaterial};

/// Glyph for one cell; walls take precedence over floors.
pub fn glyph(cell: &Cell) -> char {
    match (cell.wall, cell.floor) {
        (Some(WallMaterial::SolidRock), _) => '#',
        (Some(WallMaterial::LooseRock), _) => ':',
        (Some(WallMaterial::Rock), Some(FloorMaterial::LavaCracks)) => '%',
        (Some(WallMaterial::Rock), _) => '=',
        (Some(WallMaterial::Nickel), _) => 'n',
        (Some(WallMaterial::Gold), _) => 'g',
        (Some(WallMaterial::Ruby), _) => 'r',
        (Some(WallMaterial::Diamond), _) => 'd',
        (Some(WallMaterial::ExplosiveRock), _) => '!',
        (None, Some(FloorMaterial::Floor)) => '.',
        (None, Some(FloorMaterial::Lava)) => '~',
        (None, Some(FloorMaterial::LavaCracks)) => ',',
        (None, None) => ' ',
    }
}

/// Render the grid row by row, marking the start cell with `@`.
pub fn render(grid: &CellGrid, start: (usize, usize)) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * (size + 1));
    for y in 0..size {
        for (x, cell) in grid.row(y).iter().enumerate() {
            out.push(if (x, y) == start { '@' } else { glyph(cell) });
        }
        out.push('\n');
    }
    out
}
