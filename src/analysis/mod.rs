//! Analysis of generated assignments

/// Tile frequency histograms
pub mod statistics;
