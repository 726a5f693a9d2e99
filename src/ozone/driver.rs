//! Load, simulate and report.

use std::fmt;
use std::io::{Read, Write};

use tracing::info;

use super::config::OzoneConfig;
use super::engine::OzoneEngine;
use super::error::Result;
use super::grid::Grid;
use super::io::{HoleReader, read_grid_pair, write_grid};

/// Whether the simulated grid matched the prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

impl Outcome {
    pub fn is_valid(self) -> bool {
        self == Outcome::Valid
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Valid => f.write_str("The input prediction was valid!"),
            Outcome::Invalid => f.write_str("The input prediction was invalid!"),
        }
    }
}

/// Everything a run produced, for callers that want more than the report.
#[derive(Clone, Debug)]
pub struct Report {
    pub original: Grid,
    pub prediction: Grid,
    pub simulated: Grid,
    pub outcome: Outcome,
}

/// Run the full pipeline over `input`, writing the report to `out`.
pub fn run<R: Read, W: Write>(config: &OzoneConfig, input: R, out: &mut W) -> Result<Report> {
    let engine = OzoneEngine::new(config.clone())?;
    let mut reader = HoleReader::from_reader(input)?;
    let (original, prediction) = read_grid_pair(&mut reader, config.rows, config.cols)?;

    writeln!(out, "Original Grid:")?;
    write_grid(&original, out)?;
    writeln!(out)?;

    writeln!(out, "Prediction Grid:")?;
    write_grid(&prediction, out)?;
    writeln!(out)?;

    let simulated = engine.simulate(&original, config.months)?;
    writeln!(out, "Simulated Grid After {} Months:", config.months)?;
    write_grid(&simulated, out)?;

    let outcome = if prediction.interior_eq(&simulated)? {
        Outcome::Valid
    } else {
        Outcome::Invalid
    };
    writeln!(out, "{outcome}")?;

    info!(
        months = config.months,
        original = original.population(),
        predicted = prediction.population(),
        simulated = simulated.population(),
        valid = outcome.is_valid(),
        "prediction checked"
    );

    Ok(Report {
        original,
        prediction,
        simulated,
        outcome,
    })
}
