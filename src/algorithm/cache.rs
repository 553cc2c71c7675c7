use crate::algorithm::bitset::TileBitset;
use crate::algorithm::sockets::CompatibilityTable;
use crate::spatial::direction::Direction;
use std::collections::HashMap;

/// Memoization cache for neighbour support sets
///
/// Propagation keeps asking the same question for recurring neighbour states
/// (a fixed tile, the full catalog, a few common partial sets), so the union
/// over compatibility rows is computed once per distinct state. Entries are
/// grouped by the face the neighbour sits behind, so a lookup borrows the
/// neighbour's candidate set and only a miss stores a copy of it.
#[derive(Default)]
pub struct SupportCache {
    /// Face, then neighbour state, to supported tiles
    support_cache: HashMap<Direction, HashMap<TileBitset, TileBitset>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl SupportCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct neighbour states stored
    pub fn len(&self) -> usize {
        self.support_cache.values().map(HashMap::len).sum()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.support_cache.values().all(HashMap::is_empty)
    }

    /// Previously computed support for a neighbour state, without counting a lookup
    pub fn cached(
        &self,
        neighbor_candidates: &TileBitset,
        direction: Direction,
    ) -> Option<&TileBitset> {
        self.support_cache
            .get(&direction)
            .and_then(|by_state| by_state.get(neighbor_candidates))
    }

    /// Intersect `admissible` with the tiles supported by the neighbour behind `direction`
    ///
    /// The support set is computed from `table` only the first time a
    /// neighbour state is seen through that face.
    pub fn constrain(
        &mut self,
        table: &CompatibilityTable,
        neighbor_candidates: &TileBitset,
        direction: Direction,
        admissible: &mut TileBitset,
    ) {
        let by_state = self.support_cache.entry(direction).or_default();
        if let Some(supported) = by_state.get(neighbor_candidates) {
            self.stats.hits += 1;
            admissible.intersect_with(supported);
            return;
        }

        self.stats.misses += 1;
        let supported = table.support(neighbor_candidates, direction);
        admissible.intersect_with(&supported);
        by_state.insert(neighbor_candidates.clone(), supported);
    }

    /// Drop every cached entry, keeping the statistics
    pub fn clear(&mut self) {
        self.support_cache.clear();
    }
}
