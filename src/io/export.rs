//! Result documents and plain-text layer dumps

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::io::error::{GenerationError, Result, file_system_error};
use crate::spatial::assignment::AssignmentGrid;
use crate::spatial::grid::Coord;
use crate::spatial::tiles::TileId;

/// Serialized outcome of a successful run
///
/// `tiles` lists identifiers in flat index order, where `z` varies fastest,
/// then `y`, then `x`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDocument {
    /// Extent along `x`
    pub width: usize,
    /// Extent along `y`
    pub height: usize,
    /// Extent along `z`
    pub depth: usize,
    /// Seed of the successful attempt
    pub seed: u64,
    /// Attempts made, including the successful one
    pub attempts: usize,
    /// Tile identifiers per cell
    pub tiles: Vec<TileId>,
}

impl ResultDocument {
    /// Capture an assignment
    pub fn new(assignment: &AssignmentGrid, seed: u64, attempts: usize) -> Self {
        let dimensions = assignment.dimensions();
        Self {
            width: dimensions.width(),
            height: dimensions.height(),
            depth: dimensions.depth(),
            seed,
            attempts,
            tiles: assignment.ids(),
        }
    }

    /// Identifier stored for a coordinate
    pub fn tile_at(&self, coord: Coord) -> Option<TileId> {
        if coord.x >= self.width || coord.y >= self.height || coord.z >= self.depth {
            return None;
        }
        let index = (coord.x * self.height + coord.y) * self.depth + coord.z;
        self.tiles.get(index).copied()
    }
}

/// Write a result document as pretty-printed JSON
///
/// # Errors
///
/// Returns `CatalogParse` if serialization fails or `FileSystem` if the file
/// cannot be written.
pub fn write_result(document: &ResultDocument, path: &Path) -> Result<()> {
    let text =
        serde_json::to_string_pretty(document).map_err(|source| GenerationError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, text).map_err(file_system_error(path, "write result"))
}

/// Read a result document
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read or `CatalogParse` if it is
/// not a result document.
pub fn read_result(path: &Path) -> Result<ResultDocument> {
    let text = fs::read_to_string(path).map_err(file_system_error(path, "read result"))?;
    serde_json::from_str(&text).map_err(|source| GenerationError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Render every horizontal layer as a block of identifiers
///
/// Layers run from `y = 0` upward. Within a layer each line is one `z` row
/// listing `x` from left to right; unfilled cells show as `.`.
pub fn layer_dump(assignment: &AssignmentGrid) -> String {
    let dimensions = assignment.dimensions();
    let ids = assignment.to_id_array();
    let cell_width = ids
        .iter()
        .map(|id| id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for y in 0..dimensions.height() {
        out.push_str(&format!("layer y={y}\n"));
        for z in 0..dimensions.depth() {
            let row: Vec<String> = (0..dimensions.width())
                .map(|x| {
                    let filled = assignment.tile_id(Coord::new(x, y, z)).ok().flatten();
                    filled.map_or_else(
                        || format!("{:>cell_width$}", "."),
                        |id| format!("{id:>cell_width$}"),
                    )
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
    }
    out
}
