//! Progress display for generation attempts

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_UPDATE_INTERVAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks filled cells of the current attempt on a single bar
///
/// Redraws are throttled to every `PROGRESS_UPDATE_INTERVAL` collapses.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    last_drawn: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no active bar
    pub const fn new() -> Self {
        Self {
            bar: None,
            last_drawn: 0,
        }
    }

    /// Replace the bar for a new attempt over `cells` cells
    pub fn start_attempt(&mut self, attempt: usize, attempts: usize, cells: usize) {
        if let Some(previous) = self.bar.take() {
            previous.finish_and_clear();
        }
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(format!("attempt {attempt}/{attempts}"));
        self.bar = Some(bar);
        self.last_drawn = 0;
    }

    /// Report the number of filled cells
    pub fn update(&mut self, filled: usize) {
        if filled < self.last_drawn + PROGRESS_UPDATE_INTERVAL {
            return;
        }
        self.last_drawn = filled;
        if let Some(ref bar) = self.bar {
            bar.set_position(filled as u64);
        }
    }

    /// Close the current attempt with a short outcome message
    pub fn finish_attempt(&mut self, filled: usize, outcome: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_position(filled as u64);
            bar.finish_with_message(outcome.to_string());
        }
        self.last_drawn = filled;
    }

    /// Cells drawn at the last redraw
    pub const fn last_drawn(&self) -> usize {
        self.last_drawn
    }

    /// Remove the bar from the terminal
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
