//! Per-cell candidate sets and their cached entropies
//!
//! Every cell keeps the catalog indices still admissible there. A collapsed
//! cell keeps a singleton so that neighbours see fixed and open cells through
//! the same interface.
//!
//! The grid also keeps a lazy min-heap of cell entropies. Every update pushes
//! a fresh entry and stale ones are discarded when they surface, so finding
//! the lowest-entropy cell does not rescan the grid.

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::cache::SupportCache;
use crate::algorithm::rules::RuleSet;
use crate::math::probability::WeightSums;
use crate::spatial::grid::{Coord, Dimensions, Grid};
use crate::spatial::tiles::{TileCatalog, TileId};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Candidate set of one cell with its derived entropy
#[derive(Clone, Debug, PartialEq)]
pub struct CellPossibilities {
    /// Admissible catalog indices
    pub candidates: TileBitset,
    /// Weighted Shannon entropy of the candidates
    pub entropy: f64,
}

impl CellPossibilities {
    /// Wrap a candidate set, computing its entropy from catalog weights
    pub fn new(candidates: TileBitset, catalog: &TileCatalog) -> Self {
        let entropy = entropy_of(&candidates, catalog);
        Self {
            candidates,
            entropy,
        }
    }
}

/// Weighted Shannon entropy of a candidate set
pub fn entropy_of(candidates: &TileBitset, catalog: &TileCatalog) -> f64 {
    WeightSums::from_weights(candidates.iter().map(|index| catalog.weight(index))).entropy()
}

/// Translate catalog indices into tile identifiers
pub fn ids_of(candidates: &TileBitset, catalog: &TileCatalog) -> Vec<TileId> {
    candidates
        .iter()
        .filter_map(|index| catalog.get(index).map(|tile| tile.id))
        .collect()
}

// Empty cells sort ahead of everything else
fn frontier_key(cell: &CellPossibilities) -> f64 {
    if cell.candidates.is_empty() {
        f64::NEG_INFINITY
    } else {
        cell.entropy
    }
}

#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    key: f64,
    coord: Coord,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.coord.cmp(&other.coord))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidate sets for every cell of a grid
#[derive(Clone, Debug)]
pub struct PossibilityGrid {
    cells: Grid<CellPossibilities>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
}

impl PossibilityGrid {
    /// Start every cell with the whole catalog
    pub fn full(rules: &RuleSet, dimensions: Dimensions) -> Self {
        let catalog = rules.catalog();
        let everything = CellPossibilities::new(TileBitset::all(catalog.len()), catalog);
        let cells = Grid::filled(dimensions, everything);
        let frontier = cells
            .iter()
            .map(|(coord, cell)| {
                Reverse(FrontierEntry {
                    key: frontier_key(cell),
                    coord,
                })
            })
            .collect();
        Self { cells, frontier }
    }

    /// Grid extents
    pub const fn dimensions(&self) -> Dimensions {
        self.cells.dimensions()
    }

    /// Cell state at a coordinate
    pub fn cell(&self, coord: Coord) -> Option<&CellPossibilities> {
        self.cells.get(coord)
    }

    /// Candidate set at a coordinate
    pub fn candidates(&self, coord: Coord) -> Option<&TileBitset> {
        self.cells.get(coord).map(|cell| &cell.candidates)
    }

    /// Cached entropy at a coordinate
    pub fn entropy(&self, coord: Coord) -> Option<f64> {
        self.cells.get(coord).map(|cell| cell.entropy)
    }

    /// Total number of candidates across all cells
    pub fn total_candidates(&self) -> usize {
        self.cells
            .iter()
            .map(|(_, cell)| cell.candidates.count())
            .sum()
    }

    /// Cells with their state, in flat index order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &CellPossibilities)> + '_ {
        self.cells.iter()
    }

    /// Replace the candidates of a cell and refresh its entropy
    pub fn set(&mut self, coord: Coord, candidates: TileBitset, catalog: &TileCatalog) {
        if let Some(cell) = self.cells.get_mut(coord) {
            *cell = CellPossibilities::new(candidates, catalog);
            let key = frontier_key(cell);
            self.frontier.push(Reverse(FrontierEntry { key, coord }));
        }
    }

    /// Pop the lowest frontier entry whose key does not exceed `limit`
    ///
    /// Entries whose key no longer matches their cell are dropped on the way.
    /// The key is the cell's entropy, or negative infinity for a cell without
    /// candidates. Popped cells leave the frontier until [`Self::requeue`] or
    /// [`Self::set`] puts them back.
    pub fn pop_frontier_at_most(&mut self, limit: f64) -> Option<(Coord, f64)> {
        while let Some(Reverse(entry)) = self.frontier.peek().copied() {
            if entry.key.total_cmp(&limit).is_gt() {
                return None;
            }
            self.frontier.pop();
            let current = self.cells.get(entry.coord).map(frontier_key);
            if current.is_some_and(|key| key.to_bits() == entry.key.to_bits()) {
                return Some((entry.coord, entry.key));
            }
        }
        None
    }

    /// Return a popped cell to the frontier under its current key
    pub fn requeue(&mut self, coord: Coord) {
        if let Some(cell) = self.cells.get(coord) {
            let key = frontier_key(cell);
            self.frontier.push(Reverse(FrontierEntry { key, coord }));
        }
    }

    /// Tiles admitted at `coord` by structure and by the grid edge alone
    ///
    /// Ignores every in-grid neighbour. Used for the first, purely local pass
    /// when a run initializes.
    pub fn locally_admissible(&self, rules: &RuleSet, coord: Coord) -> TileBitset {
        let dimensions = self.dimensions();
        let mut admissible = rules.structurally_admissible(coord, dimensions);
        let edges = dimensions
            .neighbors(coord)
            .filter_map(|(direction, neighbor)| neighbor.is_none().then_some(direction));
        for direction in edges {
            if let Some(boundary) = rules.compatibility().boundary(direction) {
                admissible.intersect_with(boundary);
            }
        }
        admissible
    }

    /// Tiles admissible at `coord` given structure, grid edges and neighbours
    ///
    /// Starts from the whole catalog. Each in-grid neighbour contributes the
    /// union of tiles compatible with any of its current candidates, so fixed
    /// neighbours constrain through their single tile and open neighbours
    /// through everything they might still become. The result is independent
    /// of the cell's own current candidates.
    pub fn admissible(&self, rules: &RuleSet, cache: &mut SupportCache, coord: Coord) -> TileBitset {
        let dimensions = self.dimensions();
        let mut admissible = rules.structurally_admissible(coord, dimensions);

        for (direction, neighbor) in dimensions.neighbors(coord) {
            if admissible.is_empty() {
                break;
            }
            match neighbor {
                None => {
                    if let Some(boundary) = rules.compatibility().boundary(direction) {
                        admissible.intersect_with(boundary);
                    }
                }
                Some(neighbor) => {
                    if let Some(candidates) = self.candidates(neighbor) {
                        cache.constrain(
                            rules.compatibility(),
                            candidates,
                            direction,
                            &mut admissible,
                        );
                    }
                }
            }
        }

        admissible
    }
}
