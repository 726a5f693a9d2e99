//! Hole-list loader and grid printer.
//!
//! Input is a whitespace-separated stream of hole blocks: a count `N`
//! followed by `N` `row col` pairs, 0-based within the interior.

use std::io::{Read, Write};

use tracing::{debug, warn};

use super::error::{OzoneError, Result};
use super::grid::{Cell, Grid};

/// Whitespace tokenizer over a fully buffered input stream.
pub struct HoleReader {
    tokens: Vec<String>,
    pos: usize,
}

impl HoleReader {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_owned).collect(),
            pos: 0,
        }
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    fn next_int(&mut self, expected: &'static str) -> Result<i64> {
        let index = self.pos;
        let token = self
            .tokens
            .get(index)
            .ok_or(OzoneError::UnexpectedEof { expected })?;
        let value = token.parse::<i64>().map_err(|_| OzoneError::Malformed {
            index,
            token: token.clone(),
            expected,
        })?;
        self.pos += 1;
        Ok(value)
    }

    fn next_count(&mut self) -> Result<usize> {
        let index = self.pos;
        let count = self.next_int("hole count")?;
        usize::try_from(count).map_err(|_| OzoneError::Malformed {
            index,
            token: count.to_string(),
            expected: "hole count",
        })
    }
}

/// Read one hole block into a fresh `rows x cols` grid.
pub fn read_grid(reader: &mut HoleReader, rows: usize, cols: usize) -> Result<Grid> {
    let count = reader.next_count()?;
    let mut grid = Grid::try_new(rows, cols)?;

    for _ in 0..count {
        let row = reader.next_int("hole row")?;
        let col = reader.next_int("hole column")?;
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < rows && c < cols => grid.set(r, c, Cell::Hole)?,
            _ => {
                return Err(OzoneError::OutOfRange {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
        }
    }

    debug!(count, population = grid.population(), "hole block loaded");
    Ok(grid)
}

/// Read the original block followed by the prediction block.
pub fn read_grid_pair(reader: &mut HoleReader, rows: usize, cols: usize) -> Result<(Grid, Grid)> {
    let original = read_grid(reader, rows, cols)?;
    let prediction = read_grid(reader, rows, cols)?;
    if reader.remaining() > 0 {
        warn!(
            ignored = reader.remaining(),
            "trailing tokens after prediction block"
        );
    }
    Ok((original, prediction))
}

/// Print the interior as `rows` lines of space-separated 0/1 digits.
pub fn write_grid<W: Write>(grid: &Grid, out: &mut W) -> Result<()> {
    write!(out, "{grid}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{HoleReader, read_grid, read_grid_pair, write_grid};
    use crate::ozone::OzoneError;
    use crate::ozone::grid::Grid;

    #[test]
    fn reads_two_blocks_in_order() {
        let mut reader = HoleReader::from_text("2\n0 0\n14 14\n1 7 3\n");
        let (original, prediction) = read_grid_pair(&mut reader, 15, 15).unwrap();
        assert_eq!(original, Grid::with_holes(15, 15, [(0, 0), (14, 14)]).unwrap());
        assert_eq!(prediction, Grid::with_holes(15, 15, [(7, 3)]).unwrap());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn duplicate_coordinates_set_one_hole() {
        let mut reader = HoleReader::from_text("3 1 1 1 1 2 2");
        let grid = read_grid(&mut reader, 4, 4).unwrap();
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn non_integer_token_is_malformed() {
        let mut reader = HoleReader::from_text("1 3 x");
        let err = read_grid(&mut reader, 15, 15).unwrap_err();
        assert!(matches!(
            err,
            OzoneError::Malformed { index: 2, ref token, expected: "hole column" } if token == "x"
        ));
    }

    #[test]
    fn negative_count_is_malformed() {
        let mut reader = HoleReader::from_text("-1");
        assert!(matches!(
            read_grid(&mut reader, 15, 15),
            Err(OzoneError::Malformed { index: 0, .. })
        ));
    }

    #[test]
    fn short_block_is_unexpected_eof() {
        let mut reader = HoleReader::from_text("2 0 0 5");
        assert!(matches!(
            read_grid(&mut reader, 15, 15),
            Err(OzoneError::UnexpectedEof { expected: "hole column" })
        ));

        let mut reader = HoleReader::from_text("0");
        assert!(matches!(
            read_grid_pair(&mut reader, 15, 15),
            Err(OzoneError::UnexpectedEof { expected: "hole count" })
        ));
    }

    #[test]
    fn coordinates_outside_the_interior_are_rejected() {
        for text in ["1 15 0", "1 0 15", "1 -1 3", "1 3 -1"] {
            let mut reader = HoleReader::from_text(text);
            assert!(
                matches!(
                    read_grid(&mut reader, 15, 15),
                    Err(OzoneError::OutOfRange { rows: 15, cols: 15, .. })
                ),
                "input {text:?} should be out of range"
            );
        }
    }

    #[test]
    fn oversized_shape_is_an_error_not_a_panic() {
        let mut reader = HoleReader::from_text("0");
        assert!(matches!(
            read_grid(&mut reader, usize::MAX, 3),
            Err(OzoneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn printer_emits_one_line_per_row() {
        let grid = Grid::with_holes(3, 3, [(1, 1)]).unwrap();
        let mut out = Vec::new();
        write_grid(&grid, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 0 0\n0 1 0\n0 0 0\n");
    }

    #[test]
    fn reader_buffers_any_read_source() {
        let reader = HoleReader::from_reader("1\n2 2\n".as_bytes()).unwrap();
        assert_eq!(reader.remaining(), 3);
    }
}
