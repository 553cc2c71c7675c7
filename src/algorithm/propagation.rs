use crate::{
    algorithm::bitset::TileBitset,
    algorithm::cache::SupportCache,
    algorithm::possibility::PossibilityGrid,
    algorithm::rules::RuleSet,
    spatial::assignment::AssignmentGrid,
    spatial::grid::Coord,
};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Counters describing one propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// Cells popped from the worklist
    pub visited: usize,
    /// Cells whose candidate set shrank
    pub reductions: usize,
    /// Candidates removed across all cells
    pub removed: usize,
}

/// Cell whose candidate set became empty during propagation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptiedCell {
    /// The failing cell
    pub coord: Coord,
    /// Its candidates just before the failing update
    pub last_candidates: TileBitset,
}

/// FIFO of cells awaiting a recompute, each queued at most once at a time
#[derive(Debug)]
pub struct Worklist {
    queue: VecDeque<Coord>,
    queued: BitVec,
}

impl Worklist {
    /// Create an empty worklist for a grid with `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: bitvec![0; cell_count],
        }
    }

    /// Queue a cell unless it is already waiting
    pub fn push(&mut self, coord: Coord, index: usize) -> bool {
        if self.queued.get(index).as_deref() == Some(&true) {
            return false;
        }
        self.queued.set(index, true);
        self.queue.push_back(coord);
        true
    }

    /// Take the oldest queued cell
    pub fn pop(&mut self, index_of: impl Fn(Coord) -> Option<usize>) -> Option<Coord> {
        let coord = self.queue.pop_front()?;
        if let Some(index) = index_of(coord) {
            self.queued.set(index, false);
        }
        Some(coord)
    }

    /// Number of waiting cells
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Narrow candidate sets until no cell changes
///
/// Starts from the `seeds` cells. Each unfilled cell popped from the worklist
/// is intersected with what its neighbours still admit; when that removes any
/// candidate, its unfilled neighbours are queued. Sets only shrink, so the
/// pass ends after at most as many reductions as there are candidates.
///
/// # Errors
///
/// Returns the first cell whose candidate set would become empty. Propagation
/// stops there and leaves that cell's previous candidates in place.
pub fn propagate<I>(
    space: &mut PossibilityGrid,
    assignment: &AssignmentGrid,
    rules: &RuleSet,
    cache: &mut SupportCache,
    seeds: I,
) -> Result<PropagationOutcome, EmptiedCell>
where
    I: IntoIterator<Item = Coord>,
{
    let dimensions = space.dimensions();
    let mut worklist = Worklist::new(dimensions.cell_count());
    for coord in seeds {
        if let Some(index) = dimensions.index_of(coord) {
            worklist.push(coord, index);
        }
    }

    let mut outcome = PropagationOutcome::default();

    while let Some(coord) = worklist.pop(|coord| dimensions.index_of(coord)) {
        if assignment.is_filled(coord) {
            continue;
        }
        outcome.visited += 1;

        let Some(current) = space.candidates(coord).cloned() else {
            continue;
        };
        let mut narrowed = space.admissible(rules, cache, coord);
        narrowed.intersect_with(&current);
        if narrowed == current {
            continue;
        }

        if narrowed.is_empty() {
            return Err(EmptiedCell {
                coord,
                last_candidates: current,
            });
        }

        outcome.reductions += 1;
        outcome.removed += current.count() - narrowed.count();
        space.set(coord, narrowed, rules.catalog());

        for (_, neighbor) in dimensions.neighbors(coord) {
            let Some(neighbor) = neighbor else {
                continue;
            };
            if assignment.is_filled(neighbor) {
                continue;
            }
            if let Some(index) = dimensions.index_of(neighbor) {
                worklist.push(neighbor, index);
            }
        }
    }

    Ok(outcome)
}
