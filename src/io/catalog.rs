//! JSON tile catalog documents
//!
//! A catalog file holds `{"tiles": [...]}` where each entry is a
//! [`TileDefinition`]. Faces left out of a definition are unconstrained.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::io::error::{GenerationError, Result, file_system_error};
use crate::spatial::tiles::{TileCatalog, TileDefinition};

/// Serialized form of a tile catalog
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Tile definitions in catalog order
    pub tiles: Vec<TileDefinition>,
}

impl CatalogDocument {
    /// Capture the definitions of a validated catalog
    pub fn from_catalog(catalog: &TileCatalog) -> Self {
        Self {
            tiles: catalog.tiles().to_vec(),
        }
    }

    /// Validate the definitions into a catalog
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the definitions fail catalog validation.
    pub fn into_catalog(self) -> Result<TileCatalog> {
        TileCatalog::new(self.tiles)
    }
}

/// Parse and validate catalog text; `path` only labels errors
///
/// # Errors
///
/// Returns `CatalogParse` for malformed JSON and `InvalidConfiguration` for
/// definitions that fail validation.
pub fn parse_catalog(text: &str, path: &Path) -> Result<TileCatalog> {
    let document: CatalogDocument =
        serde_json::from_str(text).map_err(|source| GenerationError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })?;
    document.into_catalog()
}

/// Read, parse and validate a catalog file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, otherwise as
/// [`parse_catalog`].
pub fn load_catalog(path: &Path) -> Result<TileCatalog> {
    let text = fs::read_to_string(path).map_err(file_system_error(path, "read catalog"))?;
    let catalog = parse_catalog(&text, path)?;
    tracing::debug!(path = %path.display(), tiles = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Write a catalog as pretty-printed JSON
///
/// # Errors
///
/// Returns `CatalogParse` if serialization fails or `FileSystem` if the file
/// cannot be written.
pub fn save_catalog(catalog: &TileCatalog, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(&CatalogDocument::from_catalog(catalog)).map_err(
        |source| GenerationError::CatalogParse {
            path: path.to_path_buf(),
            source,
        },
    )?;
    fs::write(path, text).map_err(file_system_error(path, "write catalog"))
}
