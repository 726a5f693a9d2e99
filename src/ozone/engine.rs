//! The ozone automaton engine.

use tracing::{debug, trace};

use super::config::{OzoneConfig, UnmatchedCells};
use super::error::{OzoneError, Result};
use super::grid::{Cell, Grid, count_around};
use super::rules::RuleTable;

pub struct OzoneEngine {
    config: OzoneConfig,
    table: RuleTable,
}

impl OzoneEngine {
    /// Create an engine for a validated configuration.
    pub fn new(config: OzoneConfig) -> Result<Self> {
        config.validate()?;
        let table = RuleTable::new(&config.rules);
        debug!(
            rows = config.rows,
            cols = config.cols,
            months = config.months,
            unmatched = ?config.unmatched,
            "ozone engine ready"
        );
        Ok(Self { config, table })
    }

    /// An empty grid of the configured shape.
    pub fn blank_grid(&self) -> Grid {
        Grid::new(self.config.rows, self.config.cols)
    }

    fn check_shape(&self, grid: &Grid) -> Result<()> {
        let expected = (self.config.rows, self.config.cols);
        if grid.shape() == expected {
            Ok(())
        } else {
            Err(OzoneError::ShapeMismatch {
                left: expected,
                right: grid.shape(),
            })
        }
    }

    /// Write the successor of `current` into the interior of `next`.
    ///
    /// The frame of `next` is never written. Under `UnmatchedCells::Retain`,
    /// cells no rule matches keep their previous `next` contents.
    pub fn compute_next_state(&self, current: &Grid, next: &mut Grid) -> Result<()> {
        self.check_shape(current)?;
        current.ensure_same_shape(next)?;
        self.advance(current, next);
        Ok(())
    }

    fn advance(&self, current: &Grid, next: &mut Grid) {
        let stride = current.stride();
        let src = current.cells();
        let retain = self.config.unmatched == UnmatchedCells::Retain;
        let dst = next.cells_mut();

        for row in 1..=self.config.rows {
            let base = row * stride;
            for idx in base + 1..=base + self.config.cols {
                let neighbors = count_around(src, idx, stride);
                match self.table.lookup(src[idx], neighbors) {
                    Some(cell) => dst[idx] = cell,
                    None if retain => {}
                    None => dst[idx] = Cell::NoHole,
                }
            }
        }
    }

    /// Advance `grid` by one month, using `scratch` as the output buffer.
    ///
    /// On return `grid` holds the new state and `scratch` the previous one.
    pub fn step(&self, grid: &mut Grid, scratch: &mut Grid) -> Result<()> {
        self.compute_next_state(grid, scratch)?;
        std::mem::swap(grid, scratch);
        Ok(())
    }

    /// Run `months` steps from `original` and return the final grid.
    pub fn simulate(&self, original: &Grid, months: u64) -> Result<Grid> {
        self.simulate_with(original, months, |_, _| {})
    }

    /// Like [`simulate`](Self::simulate), calling `observer(month, grid)`
    /// after every step with the 1-based month number.
    pub fn simulate_with<F>(&self, original: &Grid, months: u64, mut observer: F) -> Result<Grid>
    where
        F: FnMut(u64, &Grid),
    {
        self.check_shape(original)?;
        let retain = self.config.unmatched == UnmatchedCells::Retain;
        let mut current = original.clone();
        let mut next = self.blank_grid();

        for month in 1..=months {
            // Retained cells fall back to the current month's value.
            if retain {
                next.clone_from(&current);
            }
            self.advance(&current, &mut next);
            std::mem::swap(&mut current, &mut next);
            trace!(month, population = current.population(), "month simulated");
            observer(month, &current);
        }

        debug!(
            months,
            start_population = original.population(),
            end_population = current.population(),
            "simulation finished"
        );
        Ok(current)
    }
}
