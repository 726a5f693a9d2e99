//! Transition rule table for the ozone automaton.
//!
//! The rule is precomputed once per engine into a table indexed by the
//! current cell state and its hole-neighbor count (0..=8). An entry of
//! `None` means no rule fires for that pair.

use std::ops::RangeInclusive;

use super::error::{OzoneError, Result};
use super::grid::Cell;

const MAX_NEIGHBORS: u8 = 8;

/// Neighbor-count thresholds for the four ozone rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    /// A hole persists with a neighbor count in this range.
    pub persist: RangeInclusive<u8>,
    /// An empty cell grows a hole with exactly this many neighbors.
    pub growth: u8,
    /// A hole starves at or below this count.
    pub starve_max: u8,
    /// A hole is overcrowded at or above this count.
    pub crowd_min: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            persist: 2..=3,
            growth: 3,
            starve_max: 1,
            crowd_min: 4,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<()> {
        let over = [
            ("persist start", *self.persist.start()),
            ("persist end", *self.persist.end()),
            ("growth", self.growth),
            ("starve_max", self.starve_max),
            ("crowd_min", self.crowd_min),
        ]
        .into_iter()
        .find(|&(_, n)| n > MAX_NEIGHBORS);

        match over {
            Some((name, n)) => Err(OzoneError::InvalidConfig(format!(
                "rule threshold {name} = {n} exceeds {MAX_NEIGHBORS} neighbors"
            ))),
            None => Ok(()),
        }
    }
}

pub struct RuleTable {
    table: [[Option<Cell>; 9]; 2],
}

impl RuleTable {
    pub fn new(rules: &Rules) -> Self {
        let mut table = [[None; 9]; 2];
        for state in [Cell::NoHole, Cell::Hole] {
            for neighbors in 0..=MAX_NEIGHBORS {
                table[state as usize][neighbors as usize] = output_for(rules, state, neighbors);
            }
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, state: Cell, neighbors: u8) -> Option<Cell> {
        self.table[state as usize][neighbors as usize]
    }
}

/// Apply persist, growth, starvation and overcrowding in that order; a later
/// match overrides an earlier one.
fn output_for(rules: &Rules, state: Cell, neighbors: u8) -> Option<Cell> {
    let hole = state.is_hole();
    let mut out = None;
    if hole && rules.persist.contains(&neighbors) {
        out = Some(Cell::Hole);
    }
    if !hole && neighbors == rules.growth {
        out = Some(Cell::Hole);
    }
    if hole && neighbors <= rules.starve_max {
        out = Some(Cell::NoHole);
    }
    if hole && neighbors >= rules.crowd_min {
        out = Some(Cell::NoHole);
    }
    out
}
