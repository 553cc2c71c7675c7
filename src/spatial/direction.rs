//! The six face directions of a grid cell
//!
//! `y` is the vertical axis. Above/Below step along `y`, Right/Left along `x`
//! and Front/Back along `z`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Face of a cell, naming the neighbour reached by stepping through it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `+y`
    Above,
    /// `-y`
    Below,
    /// `+z`
    Front,
    /// `+x`
    Right,
    /// `-z`
    Back,
    /// `-x`
    Left,
}

impl Direction {
    /// All directions, in the order faces are stored and checked
    pub const ALL: [Self; 6] = [
        Self::Above,
        Self::Below,
        Self::Front,
        Self::Right,
        Self::Back,
        Self::Left,
    ];

    /// Direction pointing back at the origin cell from its neighbour
    pub const fn opposite(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
            Self::Front => Self::Back,
            Self::Right => Self::Left,
            Self::Back => Self::Front,
            Self::Left => Self::Right,
        }
    }

    /// Unit step `[dx, dy, dz]`
    pub const fn offset(self) -> [i64; 3] {
        match self {
            Self::Above => [0, 1, 0],
            Self::Below => [0, -1, 0],
            Self::Front => [0, 0, 1],
            Self::Right => [1, 0, 0],
            Self::Back => [0, 0, -1],
            Self::Left => [-1, 0, 0],
        }
    }

    /// Stable position within [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Above => 0,
            Self::Below => 1,
            Self::Front => 2,
            Self::Right => 3,
            Self::Back => 4,
            Self::Left => 5,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Front => "front",
            Self::Right => "right",
            Self::Back => "back",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}
