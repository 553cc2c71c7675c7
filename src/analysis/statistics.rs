//! Tile frequency statistics over generated assignments

use std::collections::BTreeMap;

use crate::spatial::assignment::AssignmentGrid;
use crate::spatial::tiles::{BOUNDARY, TileCatalog, TileId};

/// Occurrence counts per tile identifier
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileHistogram {
    counts: BTreeMap<TileId, usize>,
    total: usize,
}

impl TileHistogram {
    /// Count the filled cells of an assignment
    pub fn from_assignment(assignment: &AssignmentGrid) -> Self {
        Self::from_ids(assignment.placements().map(|placed| placed.id))
    }

    /// Count identifiers from any sequence, skipping `BOUNDARY`
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = TileId>,
    {
        let mut histogram = Self::default();
        for id in ids {
            if id == BOUNDARY {
                continue;
            }
            *histogram.counts.entry(id).or_insert(0) += 1;
            histogram.total += 1;
        }
        histogram
    }

    /// Number of counted cells
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Occurrences of one identifier
    pub fn count(&self, id: TileId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Observed share of one identifier, zero for an empty histogram
    pub fn frequency(&self, id: TileId) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(id) as f64 / self.total as f64
    }

    /// Identifiers with their counts in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, usize)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    /// Largest absolute gap between observed frequency and normalized weight
    ///
    /// Every catalog tile is considered, so tiles that never appear still
    /// contribute their full weight share. Returns zero when the histogram is
    /// empty or every weight is zero.
    pub fn max_deviation(&self, catalog: &TileCatalog) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        catalog
            .normalized_weights()
            .into_iter()
            .map(|(id, expected)| (self.frequency(id) - expected).abs())
            .fold(0.0, f64::max)
    }
}
