//! Spatial data structures for bounded 3D grids
//!
//! This module contains spatial-related functionality including:
//! - Face directions and neighbour stepping
//! - Grid extents, coordinates and flat storage
//! - Tile definitions, sockets and the tile catalog
//! - The fixed-assignment grid handed to callers

/// Fixed tile placements
pub mod assignment;
/// The six face directions
pub mod direction;
/// Grid coordinates, extents and storage
pub mod grid;
/// Tile definitions and catalog
pub mod tiles;

pub use assignment::{AssignmentGrid, PlacedTile};
pub use direction::Direction;
pub use grid::{Coord, Dimensions, Grid};
pub use tiles::{BOUNDARY, TileCatalog, TileCategory, TileDefinition, TileId};
