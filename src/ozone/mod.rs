//! Ozone hole evolution over a bounded, sentinel-framed grid.

mod config;
mod driver;
mod engine;
mod error;
mod grid;
mod io;
mod rules;

pub use config::{DEFAULT_COLS, DEFAULT_MONTHS, DEFAULT_ROWS, OzoneConfig, UnmatchedCells};
pub use driver::{Outcome, Report, run};
pub use engine::OzoneEngine;
pub use error::{OzoneError, Result};
pub use grid::{Cell, Grid, grids_equal};
pub use io::{HoleReader, read_grid, read_grid_pair, write_grid};
pub use rules::{RuleTable, Rules};
