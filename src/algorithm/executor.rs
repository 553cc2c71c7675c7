use crate::{
    algorithm::bitset::TileBitset,
    algorithm::cache::{CacheStats, SupportCache},
    algorithm::possibility::{PossibilityGrid, ids_of},
    algorithm::propagation::{EmptiedCell, PropagationOutcome, propagate},
    algorithm::rules::RuleSet,
    algorithm::selection::{Selection, TieBreak, sample_tile, select_lowest_entropy},
    io::configuration::DEFAULT_SEED,
    io::error::{
        ContradictionReport, GenerationError, NeighborSnapshot, NeighborState, Result,
        invalid_placement,
    },
    math::random::XorShiftStar,
    spatial::assignment::{AssignmentGrid, PlacedTile},
    spatial::grid::{Coord, Dimensions},
    spatial::tiles::{TileCatalog, TileDefinition, TileId},
};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Parameters of a single generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Grid extents
    pub dimensions: Dimensions,
    /// Seed for the run's random generator
    pub seed: u64,
    /// Policy for equal-entropy cells
    pub tie_break: TieBreak,
}

impl GenerationConfig {
    /// Configuration with the default seed and tie-break policy
    pub const fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            seed: DEFAULT_SEED,
            tie_break: TieBreak::FirstFound,
        }
    }

    /// Replace the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the tie-break policy
    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// Phase of the run state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Possibility spaces not built yet
    Initializing,
    /// Looking for the next cell to collapse
    Selecting,
    /// A cell has been chosen and awaits sampling
    Collapsing,
    /// A cell has been fixed and its neighbours await narrowing
    Propagating,
    /// Every cell holds a tile
    Done,
    /// A cell ran out of candidates
    Contradiction,
}

impl RunState {
    /// Whether the run can no longer advance
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Contradiction)
    }
}

/// What a single call to [`WaveCollapse::step`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// State after the step
    pub state: RunState,
    /// Cell collapsed by this step
    pub coordinate: Option<Coord>,
    /// Tile placed by this step
    pub tile: Option<TileId>,
}

/// Counters accumulated over a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Completed calls to `step`
    pub steps: usize,
    /// Cells collapsed by sampling
    pub collapses: usize,
    /// Cells fixed through `pin`
    pub pinned: usize,
    /// Cells popped from propagation worklists
    pub propagation_visits: usize,
    /// Cell updates that shrank a candidate set
    pub reductions: usize,
    /// Candidates removed by propagation
    pub removed: usize,
}

impl RunStatistics {
    const fn absorb(&mut self, outcome: PropagationOutcome) {
        self.propagation_visits += outcome.visited;
        self.reductions += outcome.reductions;
        self.removed += outcome.removed;
    }
}

/// Socket-constrained wave function collapse over a bounded 3D grid
///
/// Owns the possibility grid, the assignment and the random generator of one
/// run. The shared [`RuleSet`] is never mutated, so several runs (for example
/// retries with new seeds) can reuse it. Drive the run with [`step`] for
/// paced progress or [`run`] to completion; stopping early simply means not
/// calling `step` again.
///
/// [`step`]: WaveCollapse::step
/// [`run`]: WaveCollapse::run
pub struct WaveCollapse {
    rules: Arc<RuleSet>,
    config: GenerationConfig,
    space: PossibilityGrid,
    assignment: AssignmentGrid,
    rng: XorShiftStar,
    cache: SupportCache,
    state: RunState,
    /// Cell chosen by Selecting, or fixed by Collapsing
    pending: Option<Coord>,
    /// Last cell emptied by initialization or propagation
    emptied: Option<EmptiedCell>,
    contradiction: Option<ContradictionReport>,
    statistics: RunStatistics,
}

impl WaveCollapse {
    /// Prepare a run; no possibility work happens until the first step
    pub fn new(rules: Arc<RuleSet>, config: GenerationConfig) -> Self {
        let space = PossibilityGrid::full(&rules, config.dimensions);
        let assignment = AssignmentGrid::new(config.dimensions);

        Self {
            rules,
            config,
            space,
            assignment,
            rng: XorShiftStar::new(config.seed),
            cache: SupportCache::new(),
            state: RunState::Initializing,
            pending: None,
            emptied: None,
            contradiction: None,
            statistics: RunStatistics::default(),
        }
    }

    /// Validate raw inputs and prepare a run with the standard structural rules
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - The tile definitions fail catalog validation
    /// - Any grid axis is zero or too large
    pub fn from_parts(
        tiles: Vec<TileDefinition>,
        (width, height, depth): (usize, usize, usize),
        seed: u64,
    ) -> Result<Self> {
        let dimensions = Dimensions::new(width, height, depth)?;
        let catalog = TileCatalog::new(tiles)?;
        let rules = Arc::new(RuleSet::standard(catalog));
        Ok(Self::new(rules, GenerationConfig::new(dimensions).with_seed(seed)))
    }

    /// Current state
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Run parameters
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Shared rules
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Current assignment
    ///
    /// Before `Done` this is a partial fill meant for progress display only.
    pub const fn assignment(&self) -> &AssignmentGrid {
        &self.assignment
    }

    /// Number of filled cells
    pub const fn collapsed_count(&self) -> usize {
        self.assignment.filled_count()
    }

    /// Run counters
    pub const fn statistics(&self) -> RunStatistics {
        self.statistics
    }

    /// Neighbour support cache hits and misses so far
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }

    /// Report of the failure, once the run is in `Contradiction`
    pub const fn contradiction(&self) -> Option<&ContradictionReport> {
        self.contradiction.as_ref()
    }

    /// Remaining candidate identifiers at a cell
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the coordinate lies outside the grid.
    pub fn possibilities(&self, coord: Coord) -> Result<Vec<TileId>> {
        self.config.dimensions.checked_index(coord)?;
        Ok(self
            .space
            .candidates(coord)
            .map(|candidates| ids_of(candidates, self.rules.catalog()))
            .unwrap_or_default())
    }

    /// Weighted entropy of a cell's remaining candidates
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the coordinate lies outside the grid.
    pub fn entropy_at(&self, coord: Coord) -> Result<f64> {
        self.config.dimensions.checked_index(coord)?;
        Ok(self.space.entropy(coord).unwrap_or(0.0))
    }

    /// Tiles admissible at a cell under the current neighbour state
    ///
    /// Recomputed from the whole catalog, structural rules, grid edges and the
    /// neighbours' current candidates; the cell's own set is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the coordinate lies outside the grid.
    pub fn possibility_space_for(&mut self, coord: Coord) -> Result<Vec<TileId>> {
        self.config.dimensions.checked_index(coord)?;
        let admissible = self.space.admissible(&self.rules, &mut self.cache, coord);
        Ok(ids_of(&admissible, self.rules.catalog()))
    }

    /// Fix a cell to a chosen tile and propagate the consequences
    ///
    /// Initializes the run first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The coordinate lies outside the grid (nothing is modified)
    /// - The tile is unknown, the cell is already filled, the tile is not
    ///   admissible there, or the run has finished
    /// - Initializing the run or propagating the placement empties a cell
    ///   (the run moves to `Contradiction`)
    pub fn pin(&mut self, coord: Coord, tile_id: TileId) -> Result<()> {
        self.config.dimensions.checked_index(coord)?;

        match self.state {
            RunState::Contradiction => return Err(self.contradiction_error()),
            RunState::Done => {
                return Err(invalid_placement(coord, tile_id, &"the run has already finished"));
            }
            _ => {}
        }

        let Some(index) = self.rules.catalog().index_of(tile_id) else {
            return Err(invalid_placement(coord, tile_id, &"no tile has this identifier"));
        };

        let failed = if self.state == RunState::Initializing {
            self.initialize()
        } else {
            None
        };
        if let Some(emptied) = failed {
            return Err(self.enter_contradiction(emptied));
        }

        if let Ok(Some(existing)) = self.assignment.tile_id(coord) {
            return Err(invalid_placement(
                coord,
                tile_id,
                &format!("the cell already holds tile {existing}"),
            ));
        }

        let admissible = self
            .space
            .candidates(coord)
            .is_some_and(|candidates| candidates.contains(index));
        if !admissible {
            return Err(invalid_placement(
                coord,
                tile_id,
                &"the tile is not admissible given its neighbours",
            ));
        }

        self.commit(coord, index);
        self.statistics.pinned += 1;
        debug!(%coord, tile_id, "pinned tile");

        if let Some(emptied) = self.propagate_from(coord) {
            return Err(self.enter_contradiction(emptied));
        }
        Ok(())
    }

    /// Advance by one collapse: select, sample and propagate
    ///
    /// The first call also builds the possibility spaces. Once `Done`, further
    /// calls return `Done` without a coordinate.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` when a cell runs out of candidates; every later
    /// call returns the same report.
    pub fn step(&mut self) -> Result<StepResult> {
        match self.state {
            RunState::Done => {
                return Ok(StepResult {
                    state: RunState::Done,
                    coordinate: None,
                    tile: None,
                });
            }
            RunState::Contradiction => return Err(self.contradiction_error()),
            _ => {}
        }

        let mut coordinate = None;
        let mut tile = None;

        loop {
            let before = self.state;
            let after = self.advance()?;

            if before == RunState::Collapsing {
                coordinate = self.pending;
                tile = self
                    .pending
                    .and_then(|coord| self.assignment.tile_id(coord).ok().flatten());
            }

            if before == RunState::Propagating || after == RunState::Done {
                self.statistics.steps += 1;
                return Ok(StepResult {
                    state: after,
                    coordinate,
                    tile,
                });
            }
        }
    }

    /// Drive the run to completion and hand over the assignment
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if any cell runs out of candidates.
    pub fn run(self) -> Result<AssignmentGrid> {
        self.run_with(|_, _| {})
    }

    /// Drive the run to completion, reporting every step and the filled count
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if any cell runs out of candidates.
    pub fn run_with<F>(mut self, mut on_step: F) -> Result<AssignmentGrid>
    where
        F: FnMut(&StepResult, usize),
    {
        let span = tracing::info_span!(
            "generate",
            seed = self.config.seed,
            dimensions = %self.config.dimensions
        );
        let _entered = span.enter();

        loop {
            let step = self.step()?;
            on_step(&step, self.collapsed_count());
            if step.state == RunState::Done {
                return Ok(self.assignment);
            }
        }
    }

    /// The finished assignment, or `None` unless the run reached `Done`
    pub fn into_assignment(self) -> Option<AssignmentGrid> {
        (self.state == RunState::Done).then_some(self.assignment)
    }

    /// Perform one state transition and return the new state
    fn advance(&mut self) -> Result<RunState> {
        match self.state {
            RunState::Initializing => {
                if let Some(emptied) = self.initialize() {
                    return Err(self.enter_contradiction(emptied));
                }
            }
            RunState::Selecting => self.select()?,
            RunState::Collapsing => self.collapse()?,
            RunState::Propagating => {
                let failed = self.pending.and_then(|coord| self.propagate_from(coord));
                if let Some(emptied) = failed {
                    return Err(self.enter_contradiction(emptied));
                }
                self.state = RunState::Selecting;
            }
            RunState::Done | RunState::Contradiction => {}
        }
        Ok(self.state)
    }

    /// Filter every cell by structure and grid edges, then propagate globally
    ///
    /// Returns the cell that ran out of candidates, if any.
    fn initialize(&mut self) -> Option<Coord> {
        let dimensions = self.config.dimensions;
        let catalog = self.rules.catalog();
        let mut first_empty = None;

        for index in 0..dimensions.cell_count() {
            let Some(coord) = dimensions.coord_of(index) else {
                continue;
            };
            let Some(current) = self.space.candidates(coord).cloned() else {
                continue;
            };
            let local = self.space.locally_admissible(&self.rules, coord);
            if local.is_empty() {
                first_empty = Some(EmptiedCell {
                    coord,
                    last_candidates: current,
                });
                break;
            }
            if local != current {
                self.space.set(coord, local, catalog);
            }
        }

        self.state = RunState::Selecting;

        if let Some(emptied) = first_empty {
            let failed = emptied.coord;
            self.record_emptied(emptied);
            return Some(failed);
        }

        let seeds: Vec<Coord> = (0..dimensions.cell_count())
            .filter_map(|index| dimensions.coord_of(index))
            .collect();
        match propagate(
            &mut self.space,
            &self.assignment,
            &self.rules,
            &mut self.cache,
            seeds,
        ) {
            Ok(outcome) => {
                self.statistics.absorb(outcome);
                trace!(reductions = outcome.reductions, "initial propagation settled");
                None
            }
            Err(emptied) => {
                let failed = emptied.coord;
                self.record_emptied(emptied);
                Some(failed)
            }
        }
    }

    fn select(&mut self) -> Result<()> {
        match select_lowest_entropy(
            &mut self.space,
            &self.assignment,
            self.config.tie_break,
            &mut self.rng,
        ) {
            Selection::Complete => {
                self.state = RunState::Done;
                info!(
                    cells = self.config.dimensions.cell_count(),
                    reductions = self.statistics.reductions,
                    "generation complete"
                );
                Ok(())
            }
            Selection::Contradiction(coord) => Err(self.enter_contradiction(coord)),
            Selection::Cell { coord, entropy } => {
                trace!(%coord, entropy, "selected cell");
                self.pending = Some(coord);
                self.state = RunState::Collapsing;
                Ok(())
            }
        }
    }

    fn collapse(&mut self) -> Result<()> {
        let Some(coord) = self.pending else {
            self.state = RunState::Selecting;
            return Ok(());
        };
        let sampled = self
            .space
            .candidates(coord)
            .and_then(|candidates| sample_tile(candidates, self.rules.catalog(), &mut self.rng));

        let Some(index) = sampled else {
            return Err(self.enter_contradiction(coord));
        };

        self.commit(coord, index);
        self.statistics.collapses += 1;
        self.state = RunState::Propagating;
        Ok(())
    }

    /// Write a tile into the assignment and pin the cell's candidates to it
    fn commit(&mut self, coord: Coord, index: usize) {
        let catalog = self.rules.catalog();
        let Some(tile) = catalog.get(index) else {
            return;
        };
        let placed = PlacedTile {
            id: tile.id,
            coord,
            category: tile.category,
        };
        self.assignment.place(placed);
        self.space
            .set(coord, TileBitset::singleton(catalog.len(), index), catalog);
        debug!(%coord, tile = tile.id, "collapsed cell");
    }

    /// Propagate from the neighbours of a fixed cell, returning any emptied cell
    fn propagate_from(&mut self, coord: Coord) -> Option<Coord> {
        let dimensions = self.config.dimensions;
        let seeds: Vec<Coord> = dimensions
            .neighbors(coord)
            .filter_map(|(_, neighbor)| neighbor)
            .collect();

        match propagate(
            &mut self.space,
            &self.assignment,
            &self.rules,
            &mut self.cache,
            seeds,
        ) {
            Ok(outcome) => {
                self.statistics.absorb(outcome);
                None
            }
            Err(emptied) => {
                let failed = emptied.coord;
                self.record_emptied(emptied);
                Some(failed)
            }
        }
    }

    /// Empty the failing cell and keep its last candidates for the report
    fn record_emptied(&mut self, emptied: EmptiedCell) {
        let catalog = self.rules.catalog();
        self.space
            .set(emptied.coord, TileBitset::new(catalog.len()), catalog);
        trace!(coord = %emptied.coord, "cell emptied");
        self.emptied = Some(emptied);
    }

    fn enter_contradiction(&mut self, coord: Coord) -> GenerationError {
        let catalog = self.rules.catalog();
        let last_candidates = match &self.emptied {
            Some(emptied) if emptied.coord == coord => ids_of(&emptied.last_candidates, catalog),
            _ => self
                .space
                .candidates(coord)
                .map(|candidates| ids_of(candidates, catalog))
                .unwrap_or_default(),
        };

        let neighbors = self
            .config
            .dimensions
            .neighbors(coord)
            .map(|(direction, neighbor)| {
                let state = match neighbor {
                    None => NeighborState::Boundary,
                    Some(neighbor) => match self.assignment.tile_id(neighbor) {
                        Ok(Some(id)) => NeighborState::Fixed(id),
                        _ => NeighborState::Open(
                            self.space
                                .candidates(neighbor)
                                .map(|candidates| ids_of(candidates, catalog))
                                .unwrap_or_default(),
                        ),
                    },
                };
                NeighborSnapshot { direction, state }
            })
            .collect();

        let report = ContradictionReport {
            coordinate: coord,
            last_candidates,
            neighbors,
            collapsed: self.assignment.filled_count(),
        };
        warn!(%coord, collapsed = report.collapsed, "contradiction");

        self.state = RunState::Contradiction;
        self.pending = None;
        self.contradiction = Some(report);
        self.contradiction_error()
    }

    fn contradiction_error(&self) -> GenerationError {
        self.contradiction.clone().map_or_else(
            || GenerationError::from(ContradictionReport {
                coordinate: Coord::default(),
                last_candidates: Vec::new(),
                neighbors: Vec::new(),
                collapsed: self.assignment.filled_count(),
            }),
            GenerationError::from,
        )
    }
}
