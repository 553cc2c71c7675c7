//! Fixed tile placements produced by a generation run

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::io::error::Result;
use crate::spatial::grid::{Coord, Dimensions, Grid};
use crate::spatial::tiles::{BOUNDARY, TileCategory, TileId};

/// A committed tile at a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Identifier of the placed tile
    pub id: TileId,
    /// Cell holding the tile
    pub coord: Coord,
    /// Category of the placed tile
    pub category: TileCategory,
}

/// Per-cell tile assignment, unfilled cells hold `None`
#[derive(Clone, Debug)]
pub struct AssignmentGrid {
    cells: Grid<Option<PlacedTile>>,
    filled: usize,
}

impl AssignmentGrid {
    /// Create an assignment with every cell unfilled
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            cells: Grid::filled(dimensions, None),
            filled: 0,
        }
    }

    /// Grid extents
    pub const fn dimensions(&self) -> Dimensions {
        self.cells.dimensions()
    }

    /// Number of filled cells
    pub const fn filled_count(&self) -> usize {
        self.filled
    }

    /// Whether every cell holds a tile
    pub const fn is_complete(&self) -> bool {
        self.filled == self.dimensions().cell_count()
    }

    /// Placement at a coordinate, `None` when unfilled
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the coordinate lies outside the grid.
    pub fn get(&self, coord: Coord) -> Result<Option<PlacedTile>> {
        self.dimensions().checked_index(coord)?;
        Ok(self.cells.get(coord).copied().flatten())
    }

    /// Tile identifier at a coordinate, `None` when unfilled
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the coordinate lies outside the grid.
    pub fn tile_id(&self, coord: Coord) -> Result<Option<TileId>> {
        Ok(self.get(coord)?.map(|placed| placed.id))
    }

    /// Whether a coordinate inside the grid holds a tile
    pub fn is_filled(&self, coord: Coord) -> bool {
        self.cells.get(coord).is_some_and(Option::is_some)
    }

    /// Record a placement, returning whether the cell was previously unfilled
    pub(crate) fn place(&mut self, placed: PlacedTile) -> bool {
        let Some(cell) = self.cells.get_mut(placed.coord) else {
            return false;
        };
        let was_empty = cell.is_none();
        *cell = Some(placed);
        if was_empty {
            self.filled += 1;
        }
        was_empty
    }

    /// Filled cells in flat index order
    pub fn placements(&self) -> impl Iterator<Item = PlacedTile> + '_ {
        self.cells.iter().filter_map(|(_, cell)| *cell)
    }

    /// Tile identifiers in flat index order, `BOUNDARY` for unfilled cells
    pub fn ids(&self) -> Vec<TileId> {
        self.cells
            .iter()
            .map(|(_, cell)| cell.map_or(BOUNDARY, |placed| placed.id))
            .collect()
    }

    /// Tile identifiers as an array indexed `[x, y, z]`, `BOUNDARY` for unfilled cells
    pub fn to_id_array(&self) -> Array3<TileId> {
        self.cells
            .map_array(|cell| cell.map_or(BOUNDARY, |placed| placed.id))
    }
}
