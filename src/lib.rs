//! Socket-constrained wave function collapse for bounded 3D tile grids
//!
//! Tiles carry a socket value and a set of accepted neighbour values on each
//! of six faces. A run fills every cell of a width by height by depth grid so
//! that all adjacent pairs, and every face against the grid edge, agree on
//! both sides, choosing tiles in proportion to their weights under a seeded
//! generator.

#![forbid(unsafe_code)]

/// Compatibility rules, propagation and the run state machine
pub mod algorithm;
/// Statistics over generated assignments
pub mod analysis;
/// Catalog files, result export, command-line driver and error handling
pub mod io;
/// Seeded random numbers and weighted entropy
pub mod math;
/// Coordinates, grid storage, directions and tile definitions
pub mod spatial;

pub use algorithm::executor::{GenerationConfig, RunState, StepResult, WaveCollapse};
pub use io::error::{GenerationError, Result};
