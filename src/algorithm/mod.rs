//! Constraint solving over the tile catalog
//!
//! Compatibility tables and structural rules are built once per catalog into
//! a shared [`rules::RuleSet`]. A [`executor::WaveCollapse`] run then narrows
//! per-cell candidate sets, collapses the lowest-entropy cell and propagates
//! until the grid is filled or a cell runs dry.

/// Fixed-capacity sets of catalog indices
pub mod bitset;
/// Memoized neighbour support sets
pub mod cache;
/// Structural placement rules
pub mod constraints;
/// Run state machine and public generation API
pub mod executor;
/// Per-cell candidate sets and admissibility
pub mod possibility;
/// Worklist constraint propagation
pub mod propagation;
/// Immutable rules shared between runs
pub mod rules;
/// Lowest-entropy cell selection and weighted tile sampling
pub mod selection;
/// Face compatibility between tiles
pub mod sockets;
