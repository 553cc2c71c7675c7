use crate::algorithm::bitset::TileBitset;
use crate::algorithm::constraints::StructuralRules;
use crate::algorithm::sockets::CompatibilityTable;
use crate::spatial::grid::{Coord, Dimensions};
use crate::spatial::tiles::TileCatalog;

/// Immutable inputs shared by every run over the same catalog
///
/// Bundles the catalog with its precomputed compatibility table and the
/// structural rules, so retries and parallel callers can share one copy.
#[derive(Clone, Debug)]
pub struct RuleSet {
    catalog: TileCatalog,
    compatibility: CompatibilityTable,
    structural: StructuralRules,
}

impl RuleSet {
    /// Precompute compatibility for a catalog under the given structural rules
    pub fn new(catalog: TileCatalog, structural: StructuralRules) -> Self {
        let compatibility = CompatibilityTable::build(&catalog);
        Self {
            catalog,
            compatibility,
            structural,
        }
    }

    /// Rule set using [`StructuralRules::standard`]
    pub fn standard(catalog: TileCatalog) -> Self {
        Self::new(catalog, StructuralRules::standard())
    }

    /// Tile catalog
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Pairwise compatibility table
    pub const fn compatibility(&self) -> &CompatibilityTable {
        &self.compatibility
    }

    /// Structural rules
    pub const fn structural(&self) -> &StructuralRules {
        &self.structural
    }

    /// Number of tiles in the catalog
    pub const fn tile_count(&self) -> usize {
        self.catalog.len()
    }

    /// Tiles the structural rules admit at `coord`
    pub fn structurally_admissible(&self, coord: Coord, dimensions: Dimensions) -> TileBitset {
        let mut admissible = TileBitset::new(self.catalog.len());
        for (index, tile) in self.catalog.tiles().iter().enumerate() {
            if self.structural.admits(tile, coord, dimensions) {
                admissible.insert(index);
            }
        }
        admissible
    }
}
