//! Face-to-face compatibility between tiles
//!
//! Two tiles may touch through a face only when each accepts the socket the
//! other presents. The same two-way check applies to all six directions, so a
//! one-sided acceptance never produces an adjacency.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{TileCatalog, TileDefinition};

/// Check whether `neighbor` may occupy the cell at `candidate + direction`
///
/// Holds when the candidate accepts the socket the neighbour presents back
/// through the shared face, and the neighbour accepts the candidate's socket.
pub fn is_compatible(
    candidate: &TileDefinition,
    neighbor: &TileDefinition,
    direction: Direction,
) -> bool {
    let back = direction.opposite();
    candidate.accepts(direction, neighbor.socket(back))
        && neighbor.accepts(back, candidate.socket(direction))
}

/// Check whether a tile may sit with the grid edge behind a face
pub fn admits_boundary(tile: &TileDefinition, direction: Direction) -> bool {
    tile.accepts_boundary(direction)
}

/// Precomputed compatibility sets for every tile and direction
///
/// `allowed(t, d)` holds the catalog indices legal in the cell at `t + d`.
#[derive(Clone, Debug)]
pub struct CompatibilityTable {
    allowed: Vec<[TileBitset; 6]>,
    boundary: [TileBitset; 6],
    tile_count: usize,
}

impl CompatibilityTable {
    /// Evaluate every ordered tile pair in every direction
    pub fn build(catalog: &TileCatalog) -> Self {
        let tile_count = catalog.len();
        let tiles = catalog.tiles();

        let allowed = tiles
            .iter()
            .map(|candidate| {
                Direction::ALL.map(|direction| {
                    let mut set = TileBitset::new(tile_count);
                    for (index, neighbor) in tiles.iter().enumerate() {
                        if is_compatible(candidate, neighbor, direction) {
                            set.insert(index);
                        }
                    }
                    set
                })
            })
            .collect();

        let boundary = Direction::ALL.map(|direction| {
            let mut set = TileBitset::new(tile_count);
            for (index, tile) in tiles.iter().enumerate() {
                if admits_boundary(tile, direction) {
                    set.insert(index);
                }
            }
            set
        });

        Self {
            allowed,
            boundary,
            tile_count,
        }
    }

    /// Number of tiles covered
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles legal next to `tile` through `direction`
    pub fn allowed(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.allowed
            .get(tile)
            .and_then(|faces| faces.get(direction.index()))
    }

    /// Tiles that may face the grid edge through `direction`
    pub fn boundary(&self, direction: Direction) -> Option<&TileBitset> {
        self.boundary.get(direction.index())
    }

    /// Whether the pair at catalog indices is compatible through `direction`
    pub fn compatible(&self, candidate: usize, neighbor: usize, direction: Direction) -> bool {
        self.allowed(candidate, direction)
            .is_some_and(|set| set.contains(neighbor))
    }

    /// Tiles that can sit at a cell given the candidates of its neighbour
    ///
    /// `neighbor_candidates` belong to the cell at `cell + direction`. A tile
    /// is supported when at least one neighbour candidate is compatible with it.
    pub fn support(&self, neighbor_candidates: &TileBitset, direction: Direction) -> TileBitset {
        let back = direction.opposite();
        let mut supported = TileBitset::new(self.tile_count);
        for neighbor in neighbor_candidates.iter() {
            if let Some(set) = self.allowed(neighbor, back) {
                supported.union_with(set);
            }
        }
        supported
    }
}
