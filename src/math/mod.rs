//! Mathematical utilities for the algorithm

/// Weighted entropy and proportional sampling
pub mod probability;
/// Seeded xorshift* random number generation
pub mod random;
