use crate::{
    algorithm::bitset::TileBitset,
    algorithm::possibility::PossibilityGrid,
    io::configuration::ENTROPY_TIE_EPSILON,
    math::probability::weighted_index,
    math::random::XorShiftStar,
    spatial::assignment::AssignmentGrid,
    spatial::grid::Coord,
    spatial::tiles::TileCatalog,
};
use serde::{Deserialize, Serialize};

/// Policy for choosing among cells that share the lowest entropy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First minimum in flat index order
    #[default]
    #[value(name = "first")]
    FirstFound,
    /// Uniform choice among all minima, drawn from the run's generator
    #[value(name = "random")]
    Random,
}

/// Outcome of scanning the grid for the next cell to collapse
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    /// Unfilled cell with the lowest entropy
    Cell {
        /// Chosen cell
        coord: Coord,
        /// Its entropy
        entropy: f64,
    },
    /// Unfilled cell left without candidates
    Contradiction(Coord),
    /// Every cell is filled
    Complete,
}

/// Find the unfilled cell with the lowest weighted entropy
///
/// Reads the grid's entropy frontier instead of scanning every cell. Filled
/// cells are dropped from the frontier as they surface. An unfilled cell with
/// no candidates outranks every other cell and is reported as a
/// contradiction, the first such cell in flat index order. Cells within
/// `ENTROPY_TIE_EPSILON` of the minimum tie; `FirstFound` takes the first of
/// them in flat index order and `Random` draws one uniformly from `rng`.
pub fn select_lowest_entropy(
    space: &mut PossibilityGrid,
    assignment: &AssignmentGrid,
    tie_break: TieBreak,
    rng: &mut XorShiftStar,
) -> Selection {
    let Some(lowest) = pop_unfilled(space, assignment, f64::INFINITY) else {
        return Selection::Complete;
    };

    let limit = lowest.1 + ENTROPY_TIE_EPSILON;
    let mut tied = vec![lowest.0];
    while let Some((coord, _)) = pop_unfilled(space, assignment, limit) {
        tied.push(coord);
    }
    tied.sort_unstable();
    tied.dedup();
    for &coord in &tied {
        space.requeue(coord);
    }

    if lowest.1.is_infinite() {
        return tied
            .first()
            .map_or(Selection::Complete, |&coord| Selection::Contradiction(coord));
    }

    let chosen = match tie_break {
        TieBreak::FirstFound => tied.first(),
        TieBreak::Random => rng.next_index(tied.len()).and_then(|index| tied.get(index)),
    };
    chosen.map_or(Selection::Complete, |&coord| Selection::Cell {
        coord,
        entropy: space.entropy(coord).unwrap_or(lowest.1),
    })
}

fn pop_unfilled(
    space: &mut PossibilityGrid,
    assignment: &AssignmentGrid,
    limit: f64,
) -> Option<(Coord, f64)> {
    while let Some((coord, key)) = space.pop_frontier_at_most(limit) {
        if !assignment.is_filled(coord) {
            return Some((coord, key));
        }
    }
    None
}

/// Draw one catalog index from a candidate set, proportionally to weight
///
/// Candidates are walked in ascending catalog order. Returns `None` for an
/// empty set.
pub fn sample_tile(
    candidates: &TileBitset,
    catalog: &TileCatalog,
    rng: &mut XorShiftStar,
) -> Option<usize> {
    let indices = candidates.to_vec();
    let weights: Vec<f64> = indices.iter().map(|&index| catalog.weight(index)).collect();
    weighted_index(&weights, rng).and_then(|position| indices.get(position).copied())
}
