//! Engine and driver configuration.

use super::error::{OzoneError, Result};
use super::grid::framed_len;
use super::rules::Rules;

pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLS: usize = 15;
pub const DEFAULT_MONTHS: u64 = 24;

/// What happens to cells that no rule matches (an empty cell whose neighbor
/// count is not the growth count).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedCells {
    /// Write `NoHole`; the output depends only on the input grid.
    #[default]
    Clear,
    /// Leave the cell untouched so it keeps whatever the output grid held.
    Retain,
}

/// Configuration for an ozone simulation.
///
/// Use `OzoneConfig::default()` for the 15x15 / 24-month setup, or adjust
/// individual knobs via the builder methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OzoneConfig {
    pub rows: usize,
    pub cols: usize,
    /// Number of simulated months (engine steps).
    pub months: u64,
    pub rules: Rules,
    pub unmatched: UnmatchedCells,
}

impl Default for OzoneConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            months: DEFAULT_MONTHS,
            rules: Rules::default(),
            unmatched: UnmatchedCells::default(),
        }
    }
}

impl OzoneConfig {
    pub fn rows(mut self, n: usize) -> Self {
        self.rows = n;
        self
    }

    pub fn cols(mut self, n: usize) -> Self {
        self.cols = n;
        self
    }

    pub fn months(mut self, n: u64) -> Self {
        self.months = n;
        self
    }

    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn unmatched(mut self, policy: UnmatchedCells) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(OzoneError::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if framed_len(self.rows, self.cols).is_none() {
            return Err(OzoneError::InvalidConfig(format!(
                "a {}x{} grid is too large",
                self.rows, self.cols
            )));
        }
        self.rules.validate()
    }
}
