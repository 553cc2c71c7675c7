//! Error types reported by generation runs and catalog handling

use std::fmt;
use std::path::PathBuf;

use crate::spatial::direction::Direction;
use crate::spatial::grid::{Coord, Dimensions};
use crate::spatial::tiles::TileId;

/// What a neighbouring cell looked like when a contradiction was found
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NeighborState {
    /// The face points past the grid edge
    Boundary,
    /// The neighbour holds a committed tile
    Fixed(TileId),
    /// The neighbour still has these candidates
    Open(Vec<TileId>),
}

/// Neighbour snapshot taken through one face
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborSnapshot {
    /// Face of the failing cell
    pub direction: Direction,
    /// State behind that face
    pub state: NeighborState,
}

/// Diagnosis of a cell whose possibility set became empty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContradictionReport {
    /// Cell with no admissible tile
    pub coordinate: Coord,
    /// Candidates the cell held just before it emptied
    pub last_candidates: Vec<TileId>,
    /// Neighbour states at failure time
    pub neighbors: Vec<NeighborSnapshot>,
    /// Number of cells collapsed before the failure
    pub collapsed: usize,
}

impl fmt::Display for ContradictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no admissible tile at {} after {} collapses (last candidates {:?})",
            self.coordinate, self.collapsed, self.last_candidates
        )?;
        for neighbor in &self.neighbors {
            match &neighbor.state {
                NeighborState::Boundary => write!(f, "; {} boundary", neighbor.direction)?,
                NeighborState::Fixed(id) => write!(f, "; {} fixed {id}", neighbor.direction)?,
                NeighborState::Open(ids) => write!(f, "; {} open {ids:?}", neighbor.direction)?,
            }
        }
        Ok(())
    }
}

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// A cell ran out of admissible tiles before it was collapsed
    ///
    /// Fatal to the current run. Retrying with another seed is left to the caller.
    Contradiction(Box<ContradictionReport>),

    /// Catalog or grid parameters failed validation
    InvalidConfiguration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A coordinate outside the grid was passed in
    IndexOutOfBounds {
        /// Rejected coordinate
        coordinate: Coord,
        /// Grid extents it was checked against
        dimensions: Dimensions,
    },

    /// A requested placement cannot be honoured
    InvalidPlacement {
        /// Target cell
        coordinate: Coord,
        /// Requested tile
        tile_id: TileId,
        /// Why the placement was refused
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A catalog or result document could not be (de)serialized
    CatalogParse {
        /// Document path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction(report) => write!(f, "Contradiction: {report}"),
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::IndexOutOfBounds {
                coordinate,
                dimensions,
            } => {
                write!(
                    f,
                    "Coordinate {coordinate} is outside the {dimensions} grid"
                )
            }
            Self::InvalidPlacement {
                coordinate,
                tile_id,
                reason,
            } => {
                write!(f, "Cannot place tile {tile_id} at {coordinate}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::CatalogParse { path, source } => {
                write!(f, "Malformed document '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::CatalogParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<ContradictionReport> for GenerationError {
    fn from(report: ContradictionReport) -> Self {
        Self::Contradiction(Box::new(report))
    }
}

impl GenerationError {
    /// Contradiction report, if this error is one
    pub fn contradiction(&self) -> Option<&ContradictionReport> {
        match self {
            Self::Contradiction(report) => Some(report),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid placement error
pub fn invalid_placement(coordinate: Coord, tile_id: TileId, reason: &impl ToString) -> GenerationError {
    GenerationError::InvalidPlacement {
        coordinate,
        tile_id,
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> GenerationError {
    let path = path.into();
    move |source| GenerationError::FileSystem {
        path,
        operation,
        source,
    }
}
