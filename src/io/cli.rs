//! Command-line interface for generating grids from a catalog file

use crate::algorithm::constraints::StructuralRules;
use crate::algorithm::executor::{GenerationConfig, WaveCollapse};
use crate::algorithm::rules::RuleSet;
use crate::algorithm::selection::TieBreak;
use crate::analysis::statistics::TileHistogram;
use crate::io::catalog::load_catalog;
use crate::io::configuration::{DEFAULT_ATTEMPTS, DEFAULT_SEED, OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{Result, file_system_error, invalid_configuration};
use crate::io::export::{ResultDocument, layer_dump, write_result};
use crate::io::progress::ProgressManager;
use crate::spatial::assignment::AssignmentGrid;
use crate::spatial::grid::{Coord, Dimensions};
use crate::spatial::tiles::TileId;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A tile fixed at a cell before generation starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pin {
    /// Target cell
    pub coord: Coord,
    /// Tile to place there
    pub tile: TileId,
}

/// Parse a pin written as `x,y,z=id`
///
/// # Errors
///
/// Returns a message naming the malformed part.
pub fn parse_pin(text: &str) -> std::result::Result<Pin, String> {
    let (position, tile) = text
        .split_once('=')
        .ok_or_else(|| format!("expected x,y,z=id, got '{text}'"))?;
    let tile = tile
        .trim()
        .parse::<TileId>()
        .map_err(|err| format!("invalid tile id '{tile}': {err}"))?;

    let axes = position
        .split(',')
        .map(|axis| {
            axis.trim()
                .parse::<usize>()
                .map_err(|err| format!("invalid coordinate '{axis}': {err}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let [x, y, z] = axes.as_slice() else {
        return Err(format!("expected three coordinates, got '{position}'"));
    };

    Ok(Pin {
        coord: Coord::new(*x, *y, *z),
        tile,
    })
}

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Fill a 3D grid with socket-compatible tiles using wave function collapse"
)]
/// Command-line arguments for the generation tool
pub struct Cli {
    /// Tile catalog JSON file
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Grid extent along x
    #[arg(short = 'W', long)]
    pub width: usize,

    /// Grid extent along y (vertical)
    #[arg(short = 'H', long)]
    pub height: usize,

    /// Grid extent along z
    #[arg(short = 'D', long)]
    pub depth: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Attempts before giving up; attempt n uses seed + n
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Policy for cells with equal entropy
    #[arg(short, long, value_enum, default_value_t = TieBreak::FirstFound)]
    pub tie_break: TieBreak,

    /// Fix a tile before generation, as x,y,z=id (repeatable)
    #[arg(short, long = "pin", value_parser = parse_pin)]
    pub pins: Vec<Pin>,

    /// Allow floor tiles above the base layer
    #[arg(long)]
    pub no_floor_rule: bool,

    /// Result file (defaults to <catalog>_result.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a per-layer text dump next to the result
    #[arg(short, long)]
    pub layers: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Seed used by a zero-based attempt
    pub const fn seed_for(&self, attempt: usize) -> u64 {
        self.seed.wrapping_add(attempt as u64)
    }

    /// Result file path
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::derived_path(&self.catalog, OUTPUT_SUFFIX, OUTPUT_EXTENSION))
    }

    /// Layer dump path, next to the result file
    pub fn layers_path(&self) -> PathBuf {
        Self::derived_path(&self.output_path(), "_layers", "txt")
    }

    fn derived_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}

/// Loads a catalog, runs attempts until one succeeds and writes the result
pub struct GenerationDriver {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl GenerationDriver {
    /// Create a driver for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and export according to the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog cannot be loaded or fails validation
    /// - The grid extents or attempt count are invalid
    /// - A pin is refused for a reason other than a contradiction
    /// - Every attempt ends in a contradiction (the last report is returned)
    /// - The result cannot be written
    pub fn process(&mut self) -> Result<()> {
        if self.cli.attempts == 0 {
            return Err(invalid_configuration(
                "attempts",
                &self.cli.attempts,
                &"at least one attempt is required",
            ));
        }

        let dimensions = Dimensions::new(self.cli.width, self.cli.height, self.cli.depth)?;
        let catalog = load_catalog(&self.cli.catalog)?;
        let structural = if self.cli.no_floor_rule {
            StructuralRules::none()
        } else {
            StructuralRules::standard()
        };
        let rules = Arc::new(RuleSet::new(catalog, structural));

        let (assignment, attempt) = self.generate(&rules, dimensions)?;
        let seed = self.cli.seed_for(attempt);

        let output_path = self.cli.output_path();
        write_result(
            &ResultDocument::new(&assignment, seed, attempt + 1),
            &output_path,
        )?;
        info!(path = %output_path.display(), seed, "wrote result");

        if self.cli.layers {
            let layers_path = self.cli.layers_path();
            std::fs::write(&layers_path, layer_dump(&assignment))
                .map_err(file_system_error(&layers_path, "write layers"))?;
        }

        Self::log_histogram(&assignment, &rules);
        Ok(())
    }

    /// Run attempts until one completes, returning it with its zero-based index
    fn generate(
        &mut self,
        rules: &Arc<RuleSet>,
        dimensions: Dimensions,
    ) -> Result<(AssignmentGrid, usize)> {
        let attempts = self.cli.attempts;
        let mut last_error = None;

        for attempt in 0..attempts {
            let start_time = Instant::now();
            let config = GenerationConfig::new(dimensions)
                .with_seed(self.cli.seed_for(attempt))
                .with_tie_break(self.cli.tie_break);

            if let Some(ref mut pm) = self.progress_manager {
                pm.start_attempt(attempt + 1, attempts, dimensions.cell_count());
            }

            match self.attempt(Arc::clone(rules), config) {
                Ok(assignment) => {
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.finish_attempt(assignment.filled_count(), "done");
                        pm.finish();
                    }
                    info!(
                        attempt = attempt + 1,
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "generation succeeded"
                    );
                    return Ok((assignment, attempt));
                }
                Err(error) if error.contradiction().is_some() => {
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.finish_attempt(pm.last_drawn(), "contradiction");
                    }
                    warn!(attempt = attempt + 1, seed = config.seed, %error, "attempt failed");
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        Err(last_error.unwrap_or_else(|| {
            invalid_configuration("attempts", &attempts, &"no attempt was made")
        }))
    }

    fn attempt(&mut self, rules: Arc<RuleSet>, config: GenerationConfig) -> Result<AssignmentGrid> {
        let mut run = WaveCollapse::new(rules, config);
        for pin in &self.cli.pins {
            run.pin(pin.coord, pin.tile)?;
        }

        let progress = &mut self.progress_manager;
        run.run_with(|_, filled| {
            if let Some(pm) = progress.as_mut() {
                pm.update(filled);
            }
        })
    }

    fn log_histogram(assignment: &AssignmentGrid, rules: &RuleSet) {
        let histogram = TileHistogram::from_assignment(assignment);
        for (id, count) in histogram.iter() {
            info!(
                tile = id,
                count,
                frequency = histogram.frequency(id),
                "tile frequency"
            );
        }
        info!(
            max_deviation = histogram.max_deviation(rules.catalog()),
            "deviation from catalog weights"
        );
    }
}
