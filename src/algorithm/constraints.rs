//! Structural admissibility rules that depend on position, not neighbours

use std::fmt;
use std::sync::Arc;

use crate::spatial::grid::{Coord, Dimensions};
use crate::spatial::tiles::{TileCategory, TileDefinition};

/// Position-based filter applied before any neighbour constraint
pub trait StructuralRule: Send + Sync {
    /// Whether `tile` may occupy `coord` in a grid of `dimensions`
    fn admits(&self, tile: &TileDefinition, coord: Coord, dimensions: Dimensions) -> bool;

    /// Short name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> StructuralRule for F
where
    F: Fn(&TileDefinition, Coord, Dimensions) -> bool + Send + Sync,
{
    fn admits(&self, tile: &TileDefinition, coord: Coord, dimensions: Dimensions) -> bool {
        self(tile, coord, dimensions)
    }
}

/// Floor tiles only on the base layer (`y == 0`)
#[derive(Clone, Copy, Debug, Default)]
pub struct FloorOnBaseLayer;

impl StructuralRule for FloorOnBaseLayer {
    fn admits(&self, tile: &TileDefinition, coord: Coord, _dimensions: Dimensions) -> bool {
        tile.category != TileCategory::Floor || coord.y == 0
    }

    fn name(&self) -> &str {
        "floor-on-base-layer"
    }
}

/// Ordered collection of structural rules, all of which must admit a tile
#[derive(Clone, Default)]
pub struct StructuralRules {
    rules: Vec<Arc<dyn StructuralRule>>,
}

impl StructuralRules {
    /// Rule set without any restriction
    pub fn none() -> Self {
        Self::default()
    }

    /// The default rule set: [`FloorOnBaseLayer`]
    pub fn standard() -> Self {
        Self::none().with(FloorOnBaseLayer)
    }

    /// Append a rule
    #[must_use]
    pub fn with<R>(mut self, rule: R) -> Self
    where
        R: StructuralRule + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Number of rules
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is installed
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether every rule admits `tile` at `coord`
    pub fn admits(&self, tile: &TileDefinition, coord: Coord, dimensions: Dimensions) -> bool {
        self.rules
            .iter()
            .all(|rule| rule.admits(tile, coord, dimensions))
    }
}

impl fmt::Debug for StructuralRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
