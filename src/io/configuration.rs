//! Algorithm constants and runtime configuration defaults

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Generation attempts the command-line driver makes before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;

// Safety limits to prevent excessive memory allocation
/// Maximum allowed extent along any grid axis
pub const MAX_GRID_DIMENSION: usize = 10_000;
/// Maximum allowed number of cells in a grid
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Entropy values closer than this count as tied under random tie-breaking
pub const ENTROPY_TIE_EPSILON: f64 = 1e-12;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Collapses between progress bar redraws
pub const PROGRESS_UPDATE_INTERVAL: usize = 64;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of result documents
pub const OUTPUT_EXTENSION: &str = "json";
