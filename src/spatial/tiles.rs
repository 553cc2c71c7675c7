//! Tile definitions, socket descriptors and the validated tile catalog
//!
//! A catalog is immutable once built. Tiles are addressed two ways: by their
//! stable [`TileId`] at the API boundary, and by their position in the catalog
//! (the catalog index) inside bitsets and compatibility tables.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::io::error::{Result, invalid_configuration};
use crate::spatial::direction::Direction;

/// Stable tile identifier
pub type TileId = i32;

/// Reserved identifier standing for the grid boundary (no tile)
pub const BOUNDARY: TileId = -1;

/// Broad tile category used by structural rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TileCategory {
    /// Not yet classified
    #[default]
    Undecided,
    /// Air or void
    Empty,
    /// Walkable ground, restricted to the base layer by default
    Floor,
    /// Vertical terrain
    Cliff,
    /// Vegetation
    Plant,
}

/// Socket data for one face of a tile
///
/// A face without `accepts` admits every value, the grid edge (`BOUNDARY`)
/// included. To keep a face off the edge, list the accepted values and leave
/// `BOUNDARY` out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Value presented outward; the tile's own id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<i32>,
    /// Values accepted from the neighbour on this face; unconstrained when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts: Option<BTreeSet<i32>>,
}

impl Face {
    /// Face that accepts anything and presents the tile id
    pub const fn open() -> Self {
        Self {
            socket: None,
            accepts: None,
        }
    }

    /// Face accepting exactly the given neighbour values
    pub fn accepting<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self {
            socket: None,
            accepts: Some(values.into_iter().collect()),
        }
    }

    /// Override the outward socket value
    #[must_use]
    pub const fn with_socket(mut self, socket: i32) -> Self {
        self.socket = Some(socket);
        self
    }

    /// Whether a neighbour presenting `value` is accepted on this face
    pub fn admits(&self, value: i32) -> bool {
        self.accepts
            .as_ref()
            .is_none_or(|accepted| accepted.contains(&value))
    }
}

/// Per-direction faces of a tile
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketDescriptor {
    /// Face toward `+y`
    pub above: Face,
    /// Face toward `-y`
    pub below: Face,
    /// Face toward `+z`
    pub front: Face,
    /// Face toward `+x`
    pub right: Face,
    /// Face toward `-z`
    pub back: Face,
    /// Face toward `-x`
    pub left: Face,
}

impl SocketDescriptor {
    /// Face for a direction
    pub const fn face(&self, direction: Direction) -> &Face {
        match direction {
            Direction::Above => &self.above,
            Direction::Below => &self.below,
            Direction::Front => &self.front,
            Direction::Right => &self.right,
            Direction::Back => &self.back,
            Direction::Left => &self.left,
        }
    }

    /// Mutable face for a direction
    pub const fn face_mut(&mut self, direction: Direction) -> &mut Face {
        match direction {
            Direction::Above => &mut self.above,
            Direction::Below => &mut self.below,
            Direction::Front => &mut self.front,
            Direction::Right => &mut self.right,
            Direction::Back => &mut self.back,
            Direction::Left => &mut self.left,
        }
    }
}

/// A tile type with its weight and sockets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Unique non-negative identifier
    pub id: TileId,
    /// Optional label for collaborators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Relative likelihood of being chosen
    pub weight: f64,
    /// Category consulted by structural rules
    #[serde(default)]
    pub category: TileCategory,
    /// Compatibility data for each face
    #[serde(default)]
    pub sockets: SocketDescriptor,
}

impl TileDefinition {
    /// Create a tile with open faces
    pub fn new(id: TileId, weight: f64, category: TileCategory) -> Self {
        Self {
            id,
            name: None,
            weight,
            category,
            sockets: SocketDescriptor::default(),
        }
    }

    /// Attach a label
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Replace the face in one direction
    #[must_use]
    pub fn with_face(mut self, direction: Direction, face: Face) -> Self {
        *self.sockets.face_mut(direction) = face;
        self
    }

    /// Restrict one face to the given accepted values
    #[must_use]
    pub fn accepting<I>(self, direction: Direction, values: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let socket = self.sockets.face(direction).socket;
        let mut face = Face::accepting(values);
        face.socket = socket;
        self.with_face(direction, face)
    }

    /// Value this tile presents outward in a direction
    pub fn socket(&self, direction: Direction) -> i32 {
        self.sockets.face(direction).socket.unwrap_or(self.id)
    }

    /// Whether this tile accepts a neighbour presenting `value` on a face
    pub fn accepts(&self, direction: Direction, value: i32) -> bool {
        self.sockets.face(direction).admits(value)
    }

    /// Whether this tile may sit with the grid edge on a face
    pub fn accepts_boundary(&self, direction: Direction) -> bool {
        self.accepts(direction, BOUNDARY)
    }
}

/// Validated, immutable set of tile definitions
#[derive(Clone, Debug)]
pub struct TileCatalog {
    tiles: Vec<TileDefinition>,
    index_by_id: HashMap<TileId, usize>,
}

impl TileCatalog {
    /// Validate tile definitions and build a catalog
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - The catalog is empty
    /// - An identifier is negative (`-1` is reserved for the boundary)
    /// - An identifier appears twice
    /// - A weight is negative or not finite
    pub fn new(tiles: Vec<TileDefinition>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_configuration(
                "catalog",
                &"[]",
                &"at least one tile definition is required",
            ));
        }

        let mut index_by_id = HashMap::with_capacity(tiles.len());
        for (index, tile) in tiles.iter().enumerate() {
            if tile.id < 0 {
                return Err(invalid_configuration(
                    "tile.id",
                    &tile.id,
                    &"identifiers must be non-negative",
                ));
            }
            if !tile.weight.is_finite() || tile.weight < 0.0 {
                return Err(invalid_configuration(
                    "tile.weight",
                    &tile.weight,
                    &format!("tile {} needs a finite, non-negative weight", tile.id),
                ));
            }
            if index_by_id.insert(tile.id, index).is_some() {
                return Err(invalid_configuration(
                    "tile.id",
                    &tile.id,
                    &"identifiers must be unique",
                ));
            }
        }

        Ok(Self { tiles, index_by_id })
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a validated catalog
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at a catalog index
    pub fn get(&self, index: usize) -> Option<&TileDefinition> {
        self.tiles.get(index)
    }

    /// Catalog index of an identifier
    pub fn index_of(&self, id: TileId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    /// Tile with an identifier
    pub fn by_id(&self, id: TileId) -> Option<&TileDefinition> {
        self.index_of(id).and_then(|index| self.tiles.get(index))
    }

    /// Weight at a catalog index, zero when out of range
    pub fn weight(&self, index: usize) -> f64 {
        self.tiles.get(index).map_or(0.0, |tile| tile.weight)
    }

    /// All tiles in catalog order
    pub const fn tiles(&self) -> &[TileDefinition] {
        self.tiles.as_slice()
    }

    /// Weights normalized to sum to one, keyed by identifier
    ///
    /// Returns an empty map when every weight is zero.
    pub fn normalized_weights(&self) -> HashMap<TileId, f64> {
        let total: f64 = self.tiles.iter().map(|tile| tile.weight).sum();
        if total <= 0.0 {
            return HashMap::new();
        }
        self.tiles
            .iter()
            .map(|tile| (tile.id, tile.weight / total))
            .collect()
    }
}
