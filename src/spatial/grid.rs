//! Bounded 3D grid storage with a single coordinate-to-index mapping
//!
//! Cells are stored contiguously in an `ndarray::Array3` shaped
//! `(width, height, depth)`. The flat index is row-major over `x`, `y`, `z`,
//! so `z` varies fastest and scans visit cells in index order.

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::configuration::{MAX_GRID_CELLS, MAX_GRID_DIMENSION};
use crate::io::error::{GenerationError, Result, invalid_configuration};
use crate::spatial::direction::Direction;

/// Integer cell coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Horizontal axis, Left to Right
    pub x: usize,
    /// Vertical axis, Below to Above
    pub y: usize,
    /// Depth axis, Back to Front
    pub z: usize,
}

impl Coord {
    /// Build a coordinate from its three axes
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl From<(usize, usize, usize)> for Coord {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Validated grid extents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    width: usize,
    height: usize,
    depth: usize,
}

impl Dimensions {
    /// Validate and build grid extents along `x`, `y` and `z`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if any axis is zero or exceeds
    /// `MAX_GRID_DIMENSION`, or if the cell count exceeds `MAX_GRID_CELLS`.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height), ("depth", depth)] {
            if value == 0 {
                return Err(invalid_configuration(
                    parameter,
                    &value,
                    &"grid axes must be positive",
                ));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_configuration(
                    parameter,
                    &value,
                    &format!("grid axes are limited to {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let cells = width
            .checked_mul(height)
            .and_then(|area| area.checked_mul(depth))
            .filter(|&cells| cells <= MAX_GRID_CELLS);
        if cells.is_none() {
            return Err(invalid_configuration(
                "dimensions",
                &format!("{width}x{height}x{depth}"),
                &format!("grids are limited to {MAX_GRID_CELLS} cells"),
            ));
        }

        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Extent along `x`
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Extent along `y`
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Extent along `z`
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Shape tuple for array construction
    pub const fn shape(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Check whether a coordinate lies inside the grid
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height && coord.z < self.depth
    }

    /// Flat index of a coordinate, or `None` outside the grid
    pub const fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.x * self.height + coord.y) * self.depth + coord.z)
        } else {
            None
        }
    }

    /// Flat index of a coordinate, rejecting out-of-range input
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the coordinate lies outside the grid.
    pub fn checked_index(&self, coord: Coord) -> Result<usize> {
        self.index_of(coord).ok_or(GenerationError::IndexOutOfBounds {
            coordinate: coord,
            dimensions: *self,
        })
    }

    /// Coordinate of a flat index, or `None` past the last cell
    pub const fn coord_of(&self, index: usize) -> Option<Coord> {
        if index >= self.cell_count() {
            return None;
        }
        let z = index % self.depth;
        let rest = index / self.depth;
        let y = rest % self.height;
        let x = rest / self.height;
        Some(Coord { x, y, z })
    }

    /// Neighbouring coordinate through a face, or `None` past the grid edge
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let [dx, dy, dz] = direction.offset();
        let x = coord.x.checked_add_signed(dx as isize)?;
        let y = coord.y.checked_add_signed(dy as isize)?;
        let z = coord.z.checked_add_signed(dz as isize)?;
        let neighbor = Coord { x, y, z };
        self.contains(neighbor).then_some(neighbor)
    }

    /// All six faces paired with the neighbour behind each, `None` at edges
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Option<Coord>)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, self.neighbor(coord, direction)))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Contiguous per-cell storage addressed by [`Coord`] or flat index
#[derive(Clone, Debug)]
pub struct Grid<T> {
    dimensions: Dimensions,
    cells: Array3<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(dimensions: Dimensions, value: T) -> Self {
        Self {
            dimensions,
            cells: Array3::from_elem(dimensions.shape(), value),
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid by evaluating `init` at every coordinate
    pub fn from_fn<F>(dimensions: Dimensions, mut init: F) -> Self
    where
        F: FnMut(Coord) -> T,
    {
        Self {
            dimensions,
            cells: Array3::from_shape_fn(dimensions.shape(), |(x, y, z)| init(Coord { x, y, z })),
        }
    }

    /// Grid extents
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Cell at a coordinate
    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.cells.get([coord.x, coord.y, coord.z])
    }

    /// Mutable cell at a coordinate
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        self.cells.get_mut([coord.x, coord.y, coord.z])
    }

    /// Cell at a flat index
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.dimensions
            .coord_of(index)
            .and_then(|coord| self.get(coord))
    }

    /// Cells with their coordinates, in flat index order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y, z), cell)| (Coord { x, y, z }, cell))
    }

    /// Borrow the underlying array, indexed `[x, y, z]`
    pub const fn as_array(&self) -> &Array3<T> {
        &self.cells
    }

    /// Map every cell into a new array of the same shape
    pub fn map_array<U, F>(&self, f: F) -> Array3<U>
    where
        F: FnMut(&T) -> U,
    {
        self.cells.map(f)
    }
}
